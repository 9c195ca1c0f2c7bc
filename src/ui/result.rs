//! Result view rendering

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the verdict returned by the prediction service
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(record) = &app.state.result else {
        frame.render_widget(
            Paragraph::new("No result").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };
    let verdict = &record.verdict;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary
            Constraint::Min(3),    // Raw payload
        ])
        .split(area);

    let label_style = Style::default().fg(Color::DarkGray);
    let prediction = verdict.prediction().unwrap_or_else(|| "-".to_string());
    let prediction_color = match prediction.as_str() {
        "1" | "high_risk" => Color::Red,
        "0" | "low_risk" => Color::Green,
        _ => Color::Yellow,
    };

    let mut summary = vec![Line::from(vec![
        Span::styled("Prediction:  ", label_style),
        Span::styled(
            prediction,
            Style::default()
                .fg(prediction_color)
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    if let Some(p) = verdict.risk_probability() {
        summary.push(Line::from(vec![
            Span::styled("Risk:        ", label_style),
            Span::raw(format!("{:.1}%", p * 100.0)),
        ]));
    }
    summary.push(Line::from(vec![
        Span::styled("Received:    ", label_style),
        Span::raw(
            record
                .received_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ),
    ]));

    frame.render_widget(
        Paragraph::new(summary).block(
            Block::default()
                .title(" Result ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(verdict.to_pretty_string())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Verdict payload ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        chunks[1],
    );
}
