//! Confirmation screen shown after a successful submission

use crate::submission::Delivery;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn delivery_message(delivery: Delivery) -> &'static str {
    match delivery {
        Delivery::Relay => {
            "Sua solicitação de orçamento foi registrada com sucesso! Estamos animados \
             para trazer sua ideia à realidade e retornaremos com a melhor solução para \
             seu projeto em até 24 horas."
        }
        Delivery::MailClientFallback => {
            "Não conseguimos enviar automaticamente, então abrimos seu cliente de email \
             com a solicitação preenchida. Basta enviar a mensagem para concluir."
        }
    }
}

/// Draw the success panel centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, delivery: Delivery) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Max(64),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    let (title, accent) = match delivery {
        Delivery::Relay => ("✓ Solicitação Enviada com Sucesso!", Color::Green),
        Delivery::MailClientFallback => ("✉ Conclua o envio pelo seu email", Color::Yellow),
    };

    let content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(delivery_message(delivery)),
        Line::from(""),
        Line::from(Span::styled(
            "Nossa equipe analisará os detalhes e entrará em contato em breve.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" nova solicitação   "),
            Span::styled(
                "q",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" sair"),
        ]),
    ];

    let panel = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        );
    frame.render_widget(panel, cols[1]);
}
