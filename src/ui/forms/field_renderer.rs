//! Field rendering utilities for the wizard steps

use crate::state::{FieldId, QuoteForm, ServiceType};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

fn field_block(label: &str, is_active: bool, error: Option<&str>) -> Block<'static> {
    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }
    block
}

/// Draw a text field with cursor, placeholder and inline error
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldId,
    value: &str,
    is_active: bool,
    error: Option<&str>,
) {
    let text_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = Span::styled(
        if is_active { CURSOR } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let mut lines: Vec<Line> = if value.is_empty() {
        let placeholder = if is_active { "" } else { field.placeholder() };
        vec![Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ))]
    } else if field.is_multiline() {
        // split('\n') keeps a trailing empty line so the cursor follows Enter
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect()
    } else {
        vec![Line::from(Span::styled(value.to_string(), text_style))]
    };
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor);
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(field_block(field.label(), is_active, error));
    frame.render_widget(paragraph, area);
}

/// Draw the service checklist; the row under `cursor` is highlighted while active
pub fn draw_services_field(
    frame: &mut Frame,
    area: Rect,
    form: &QuoteForm,
    cursor: usize,
    is_active: bool,
    error: Option<&str>,
) {
    let items: Vec<ListItem> = ServiceType::ALL
        .iter()
        .map(|service| {
            let checked = form.services.contains(*service);
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{mark} "), style),
                Span::raw(service.label()),
            ]))
        })
        .collect();

    let highlight = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(field_block(FieldId::Services.label(), is_active, error))
        .highlight_style(highlight);

    let mut state = ListState::default().with_selected(is_active.then_some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw a single-choice field as `◀ value ▶`
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldId,
    value: &str,
    is_active: bool,
) {
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" ▶", arrow_style),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(field_block(field.label(), is_active, None)),
        area,
    );
}

/// Draw the consent checkbox
pub fn draw_consent_field(
    frame: &mut Frame,
    area: Rect,
    checked: bool,
    is_active: bool,
    error: Option<&str>,
) {
    let mark = if checked { "[x] " } else { "[ ] " };
    let mark_style = if checked {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(
            "Autorizo o contato para envio da proposta e concordo com a \
             Política de Privacidade e Termos de Uso.",
        ),
    ]);
    let paragraph = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(field_block(FieldId::GdprConsent.label(), is_active, error));
    frame.render_widget(paragraph, area);
}
