//! Field rendering utilities for forms

use fieldwire::form::Field;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one rendered field
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field; invalid fields carry their message on the bottom border
pub fn draw_field(frame: &mut Frame, area: Rect, field: &Field, is_active: bool) {
    let border_style = if field.validity.is_invalid() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if field.readonly {
        Style::default().fg(Color::Yellow)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = field.display_value();
    let mut spans = Vec::new();
    if field.is_choice() {
        let arrow = Style::default().fg(if is_active { Color::Cyan } else { Color::DarkGray });
        spans.push(Span::styled("◂ ", arrow));
        spans.push(Span::styled(display_value, value_style));
        spans.push(Span::styled(" ▸", arrow));
    } else if display_value.is_empty() && !is_active {
        spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(display_value, value_style));
        if is_active {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
    }

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(message) = field.validity.message() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
