//! UI module for rendering the TUI

mod field_renderer;

use crate::app::App;
use crate::platform::SUBMIT_HINT;
use field_renderer::{draw_field, FIELD_HEIGHT};
use fieldwire::engine::visibility;
use fieldwire::form::{Field, Presentation};
use fieldwire::rules::FormKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    draw_form(frame, chunks[0], app);
    draw_status_bar(frame, chunks[1], app);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.form();
    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields: Vec<&Field> = form
        .fields()
        .iter()
        .filter(|f| visibility::is_visible(form, f))
        .collect();
    let active = app.active_field();

    match form.presentation() {
        Presentation::Wide => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);
            let (left, right) = fields.split_at(fields.len().div_ceil(2));
            draw_column(frame, columns[0], left, active);
            draw_column(frame, columns[1], right, active);
        }
        Presentation::Compact => draw_column(frame, inner, &fields, active),
    }
}

/// Stack fields vertically, scrolled so the active one stays in view
fn draw_column(frame: &mut Frame, area: Rect, fields: &[&Field], active: Option<&str>) {
    let rows = (area.height / FIELD_HEIGHT).max(1) as usize;
    let active_index = active
        .and_then(|name| fields.iter().position(|f| f.name == name))
        .unwrap_or(0);
    let offset = scroll_offset(active_index, rows, fields.len());

    for (row, field) in fields.iter().skip(offset).take(rows).enumerate() {
        let field_area = Rect {
            x: area.x,
            y: area.y + row as u16 * FIELD_HEIGHT,
            width: area.width,
            height: FIELD_HEIGHT.min(area.height),
        };
        draw_field(frame, field_area, field, active == Some(field.name.as_str()));
    }
}

/// First row to draw so that `active` is within a window of `rows`
fn scroll_offset(active: usize, rows: usize, total: usize) -> usize {
    if total <= rows || active < rows {
        return 0;
    }
    (active + 1 - rows).min(total - rows)
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let form_name = match app.kind {
        FormKind::Invoice => "invoice",
        FormKind::Costing => "costing",
    };
    let mut spans = vec![
        Span::styled(
            format!(" {form_name} "),
            Style::default().bg(Color::Cyan).fg(Color::Black),
        ),
        Span::raw(format!(
            " Tab/↓:next  ⇧Tab/↑:prev  ←/→:choose  {SUBMIT_HINT}  Esc:quit"
        )),
    ];
    if let Some(msg) = &app.status_message {
        let color = if msg == "Submitted" {
            Color::Green
        } else {
            Color::Red
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
