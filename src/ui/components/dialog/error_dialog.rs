//! Error dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Maximum width of the dialog
const MAX_WIDTH: u16 = 64;

/// Render an error dialog overlay centered on the screen.
///
/// The first paragraph of `message` becomes the dialog title; the rest is the
/// body.
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    let (title, body) = message.split_once("\n\n").unwrap_or(("Error", message));

    let mut content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(body.lines().map(|l| Line::from(l.to_string())));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" or "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to dismiss"),
    ]));

    let area = dialog_area(frame.area(), content.len() as u16);
    frame.render_widget(Clear, area);

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, area);
}

/// Centered rectangle sized for `lines` rows of content plus borders
fn dialog_area(screen: Rect, lines: u16) -> Rect {
    let width = MAX_WIDTH.min(screen.width);
    // Leave room for wrapped lines
    let height = (lines + 4).min(screen.height);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}
