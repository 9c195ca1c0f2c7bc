//! Risk assessment form rendering

use super::field_renderer::draw_field;
use crate::app::App;
use crate::prediction::zscore_preview;
use crate::state::{FieldName, ParsedValue};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Fields are laid out two per row
const FIELD_ROWS: usize = FieldName::ALL.len() / 2;

/// Draw the assessment form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;

    let block = Block::default()
        .title(" Heart Disease Risk Assessment ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(3); FIELD_ROWS];
    constraints.push(Constraint::Length(1)); // z-score preview
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, pair) in FieldName::ALL.chunks(2).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[row]);
        for (column, name) in pair.iter().enumerate() {
            let is_active = form.active_field_index == name.index();
            draw_field(frame, columns[column], form.field(*name), is_active);
        }
    }

    frame.render_widget(preview_line(app), rows[FIELD_ROWS]);

    let button_area = Rect {
        width: rows[FIELD_ROWS + 1].width.min(24),
        ..rows[FIELD_ROWS + 1]
    };
    let label = if form.is_submitting() {
        "Submitting..."
    } else {
        "Submit"
    };
    render_button(
        frame,
        button_area,
        label,
        form.is_submit_row_active(),
        !form.is_submitting(),
    );
}

/// Hint under the optional z-score field
fn preview_line(app: &App) -> Paragraph<'static> {
    let form = &app.state.form;
    let text = match form.field(FieldName::ZscoreChol).parse() {
        ParsedValue::Number(_) => "Using the supplied cholesterol z-score".to_string(),
        _ => match zscore_preview(form) {
            Some(z) => format!("Z-score will be derived by the service: {z:.2}"),
            None => "Z-score will be derived from the cholesterol level".to_string(),
        },
    };
    Paragraph::new(Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(Color::DarkGray),
    )))
}
