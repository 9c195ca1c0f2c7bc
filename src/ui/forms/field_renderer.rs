//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let value_style = if field.issue().is_some() && !field.raw().is_empty() {
        // Present but invalid
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_value = field.display_value();
    let is_choice = field.name.options().is_some();

    let mut spans = Vec::new();
    if display_value.is_empty() && !is_active {
        spans.push(Span::styled(
            if is_choice { "(select)" } else { "(empty)" },
            Style::default().fg(Color::DarkGray),
        ));
    } else if is_choice {
        spans.push(Span::styled("◀ ", Style::default().fg(accent)));
        spans.push(Span::styled(display_value, value_style));
        spans.push(Span::styled(" ▶", Style::default().fg(accent)));
    } else {
        spans.push(Span::styled(display_value, value_style));
        if is_active {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
    }

    let title = if field.name.is_required() {
        format!(" {} * ", field.label())
    } else {
        format!(" {} ", field.label())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
