//! Body of the current wizard step

use super::field_renderer::{
    draw_choice_field, draw_consent_field, draw_services_field, draw_text_field,
};
use crate::app::App;
use crate::state::{FieldId, Step};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

const CONFIRMATION_INTRO: &str = "Estamos animados para trazer sua ideia à realidade! \
    Nossa equipe analisará sua solicitação e retornará com a melhor solução para seu projeto.";

/// Rows taken by `field`, borders included
pub fn field_height(field: FieldId) -> u16 {
    match field {
        FieldId::Services => 8,
        FieldId::GdprConsent => 4,
        field if field.is_multiline() => 5,
        _ => 3,
    }
}

/// Draw every field of the current step
pub fn draw_step_form(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.wizard.step();
    let form = app.wizard.form();
    let fields = app.current_fields();
    let errors = if app.show_validation {
        app.wizard.validation_errors(step)
    } else {
        Vec::new()
    };

    let mut constraints: Vec<Constraint> = Vec::with_capacity(fields.len() + 2);
    if step == Step::Confirmation {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend(fields.iter().map(|f| Constraint::Length(field_height(*f))));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut offset = 0;
    if step == Step::Confirmation {
        let intro = Paragraph::new(CONFIRMATION_INTRO)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        frame.render_widget(intro, chunks[0]);
        offset = 1;
    }

    for (idx, field) in fields.iter().copied().enumerate() {
        let area = chunks[idx + offset];
        let is_active = app.focus.active_field_index == idx;
        let error = field.error_in(&errors).map(ToString::to_string);
        let error = error.as_deref();

        match field {
            FieldId::Text(text) => {
                draw_text_field(frame, area, field, form.text(text), is_active, error)
            }
            FieldId::Services => draw_services_field(
                frame,
                area,
                form,
                app.focus.service_cursor,
                is_active,
                error,
            ),
            FieldId::HasDomain => {
                draw_choice_field(frame, area, field, form.has_domain.label(), is_active)
            }
            FieldId::Budget => draw_choice_field(frame, area, field, form.budget.label(), is_active),
            FieldId::Deadline => {
                draw_choice_field(frame, area, field, form.deadline.label(), is_active)
            }
            FieldId::GdprConsent => {
                draw_consent_field(frame, area, form.gdpr_consent, is_active, error)
            }
        }
    }
}
