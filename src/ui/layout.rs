//! Layout components (header, button row, status bar)

use super::components::{button_width, render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{FieldId, NavButton, NoticeLevel, Step};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};

/// Header rows: chip, prompt, gauge
const HEADER_HEIGHT: u16 = 4;

/// Screen regions for the wizard
pub struct WizardLayout {
    pub header: Rect,
    pub body: Rect,
    pub buttons: Rect,
}

/// Split the screen, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> WizardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    WizardLayout {
        header: chunks[0],
        body: chunks[1],
        buttons: chunks[2],
    }
}

/// Draw the step chip, the step prompt and the progress gauge
pub fn draw_header(frame: &mut Frame, area: Rect, step: Step) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    let chip = Line::from(vec![
        Span::styled(
            format!(" {} ", step.title()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Solicitar Orçamento",
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(chip), chunks[0]);

    let prompt = Paragraph::new(step.prompt())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(prompt, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(step.progress())
        .label(format!("{}/{}", step.number(), Step::COUNT));
    frame.render_widget(gauge, chunks[2]);
}

/// Draw the navigation buttons for the current step
pub fn draw_button_row(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.wizard.step();
    let buttons = NavButton::available(step);
    let row_active = app
        .focus
        .is_buttons_row_active(app.current_fields().len());
    let selected = app.focus.button_for(step);
    let submitting = app.wizard.is_submitting();
    let step_complete = app.wizard.is_step_valid(step);

    let labels: Vec<&str> = buttons
        .iter()
        .map(|button| match button {
            NavButton::Next if submitting => "Enviando...",
            _ => button.label(step),
        })
        .collect();

    let mut constraints: Vec<Constraint> = labels
        .iter()
        .map(|label| Constraint::Length(button_width(label)))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(1)
        .split(area);

    for (idx, (button, label)) in buttons.iter().zip(&labels).enumerate() {
        render_button(
            frame,
            chunks[idx],
            label,
            row_active && *button == selected,
            !submitting,
            *button == NavButton::Next && step_complete,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {}", get_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(notice) = &app.notice {
        let color = match notice.level {
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            &notice.message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(hint) = app.focused_field().and_then(FieldId::hint) {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(hint, Style::default().fg(Color::Blue)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:sair ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for what currently has focus
fn get_hints(app: &App) -> &'static str {
    if app.has_errors() {
        return "Enter/Esc:fechar";
    }
    if app.wizard.is_submitted() {
        return "Enter/n:nova solicitação  q:sair";
    }
    match app.focused_field() {
        None => "←/→:botão  Enter:ativar  Tab:campo  ^S:salvar  ^O:carregar",
        Some(FieldId::Services) => "↑/↓:mover  Espaço:marcar  Tab:próximo  ^N:avançar",
        Some(FieldId::HasDomain | FieldId::Budget | FieldId::Deadline) => {
            "←/→:alterar  Tab:próximo  ^N:avançar  ^B:voltar"
        }
        Some(FieldId::GdprConsent) => "Espaço:marcar  Tab:botões  ^N:enviar  ^B:voltar",
        Some(field) if field.is_multiline() => "Enter:nova linha  Tab:próximo  ^N:avançar",
        Some(_) => "Tab:próximo  ^N:avançar  ^B:voltar  ^S:salvar",
    }
}
