//! Focus tracking within the current wizard step

use crate::state::{ServiceType, Step};

/// Buttons in the navigation row below the step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Save,
    Load,
    Back,
    /// "Próximo", or "Solicitar Orçamento" on the last step
    Next,
}

impl NavButton {
    /// Buttons shown on `step`, left to right
    pub fn available(step: Step) -> Vec<NavButton> {
        let mut buttons = vec![NavButton::Save, NavButton::Load];
        if !step.is_first() {
            buttons.push(NavButton::Back);
        }
        buttons.push(NavButton::Next);
        buttons
    }

    pub fn label(self, step: Step) -> &'static str {
        match self {
            NavButton::Save => "Salvar progresso",
            NavButton::Load => "Carregar salvo",
            NavButton::Back => "◀ Anterior",
            NavButton::Next if step.is_last() => "Solicitar Orçamento",
            NavButton::Next => "Próximo ▶",
        }
    }
}

/// Which field, button, or service row has keyboard focus
///
/// Index `field_count` addresses the button row, so focus cycles through
/// every field and then the buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFocus {
    pub active_field_index: usize,
    pub selected_button: NavButton,
    pub service_cursor: usize,
}

impl Default for StepFocus {
    fn default() -> Self {
        Self {
            active_field_index: 0,
            selected_button: NavButton::Next,
            service_cursor: 0,
        }
    }
}

impl StepFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next field (wraps through the button row)
    pub fn next_field(&mut self, field_count: usize) {
        self.active_field_index = (self.active_field_index + 1) % (field_count + 1);
    }

    /// Move to the previous field (wraps through the button row)
    pub fn prev_field(&mut self, field_count: usize) {
        if self.active_field_index == 0 {
            self.active_field_index = field_count;
        } else {
            self.active_field_index -= 1;
        }
    }

    pub fn is_buttons_row_active(&self, field_count: usize) -> bool {
        self.active_field_index >= field_count
    }

    /// Keep focus in range after the field list shrinks
    pub fn clamp(&mut self, field_count: usize) {
        self.active_field_index = self.active_field_index.min(field_count);
    }

    pub fn next_button(&mut self, step: Step) {
        let buttons = NavButton::available(step);
        let current = self.button_position(&buttons);
        self.selected_button = buttons[(current + 1) % buttons.len()];
    }

    pub fn prev_button(&mut self, step: Step) {
        let buttons = NavButton::available(step);
        let current = self.button_position(&buttons);
        self.selected_button = buttons[(current + buttons.len() - 1) % buttons.len()];
    }

    /// Selected button, falling back to Next when it is not shown on `step`
    pub fn button_for(&self, step: Step) -> NavButton {
        if NavButton::available(step).contains(&self.selected_button) {
            self.selected_button
        } else {
            NavButton::Next
        }
    }

    pub fn cursor_up(&mut self) {
        self.service_cursor = self.service_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        self.service_cursor = (self.service_cursor + 1).min(ServiceType::ALL.len() - 1);
    }

    pub fn cursor_service(&self) -> ServiceType {
        ServiceType::ALL[self.service_cursor.min(ServiceType::ALL.len() - 1)]
    }

    fn button_position(&self, buttons: &[NavButton]) -> usize {
        buttons
            .iter()
            .position(|b| *b == self.selected_button)
            .unwrap_or(buttons.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod nav_button {
        use super::*;

        #[test]
        fn test_first_step_has_no_back() {
            assert_eq!(
                NavButton::available(Step::Contact),
                vec![NavButton::Save, NavButton::Load, NavButton::Next]
            );
        }

        #[test]
        fn test_later_steps_have_back() {
            assert!(NavButton::available(Step::Project).contains(&NavButton::Back));
        }

        #[test]
        fn test_next_label_changes_on_last_step() {
            assert_eq!(NavButton::Next.label(Step::Commercial), "Próximo ▶");
            assert_eq!(
                NavButton::Next.label(Step::Confirmation),
                "Solicitar Orçamento"
            );
        }
    }

    mod step_focus {
        use super::*;

        #[test]
        fn test_new_has_correct_defaults() {
            let focus = StepFocus::new();
            assert_eq!(focus.active_field_index, 0);
            assert_eq!(focus.selected_button, NavButton::Next);
            assert_eq!(focus.service_cursor, 0);
        }

        #[test]
        fn test_next_field_cycles_through_buttons() {
            let mut focus = StepFocus::new();
            focus.next_field(2);
            focus.next_field(2);
            assert!(focus.is_buttons_row_active(2));
            focus.next_field(2);
            assert_eq!(focus.active_field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_buttons() {
            let mut focus = StepFocus::new();
            focus.prev_field(4);
            assert_eq!(focus.active_field_index, 4);
            assert!(focus.is_buttons_row_active(4));
        }

        #[test]
        fn test_clamp() {
            let mut focus = StepFocus {
                active_field_index: 2,
                ..Default::default()
            };
            focus.clamp(1);
            assert_eq!(focus.active_field_index, 1);
        }

        #[test]
        fn test_next_button_wraps() {
            let mut focus = StepFocus::new();
            focus.next_button(Step::Contact);
            assert_eq!(focus.selected_button, NavButton::Save);
        }

        #[test]
        fn test_prev_button_wraps() {
            let mut focus = StepFocus {
                selected_button: NavButton::Save,
                ..Default::default()
            };
            focus.prev_button(Step::Services);
            assert_eq!(focus.selected_button, NavButton::Next);
        }

        #[test]
        fn test_button_for_hides_back_on_first_step() {
            let focus = StepFocus {
                selected_button: NavButton::Back,
                ..Default::default()
            };
            assert_eq!(focus.button_for(Step::Contact), NavButton::Next);
            assert_eq!(focus.button_for(Step::Services), NavButton::Back);
        }

        #[test]
        fn test_service_cursor_is_bounded() {
            let mut focus = StepFocus::new();
            focus.cursor_up();
            assert_eq!(focus.cursor_service(), ServiceType::Website);
            for _ in 0..10 {
                focus.cursor_down();
            }
            assert_eq!(focus.cursor_service(), ServiceType::Other);
        }
    }
}
