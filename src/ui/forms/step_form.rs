//! Step card rendering

use super::field_renderer::{draw_field, field_height, text_height, FieldView};
use crate::app::App;
use crate::state::{FieldSpec, StepDefinition};
use crate::ui::components::{button_label, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the card for the current step: field grid, notes, consent, button
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App, definition: &StepDefinition) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", definition.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let inner = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };

    let rows: Vec<&[FieldSpec]> = definition
        .fields
        .chunks(usize::from(definition.columns.max(1)))
        .collect();
    let column_width = inner.width / definition.columns.max(1);

    let mut constraints: Vec<Constraint> = rows
        .iter()
        .map(|row| {
            let height = row
                .iter()
                .map(|spec| field_height(spec, column_width))
                .max()
                .unwrap_or(0);
            Constraint::Length(height)
        })
        .collect();

    let description_height: u16 = definition
        .description
        .iter()
        .map(|item| text_height(item, inner.width.saturating_sub(2)))
        .sum();
    constraints.push(Constraint::Length(description_height));
    let terms_height = definition
        .terms
        .as_ref()
        .map(|spec| field_height(spec, inner.width))
        .unwrap_or(0);
    constraints.push(Constraint::Length(terms_height));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, row_area) in rows.iter().zip(chunks.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, u32::from(definition.columns.max(1)));
                usize::from(definition.columns.max(1))
            ])
            .split(*row_area);
        for (spec, cell) in row.iter().zip(cells.iter()) {
            draw_field(frame, *cell, &field_view(app, definition, spec));
        }
    }

    let description_area = chunks[rows.len()];
    draw_description(frame, description_area, definition.description);

    if let Some(terms) = &definition.terms {
        draw_field(
            frame,
            chunks[rows.len() + 1],
            &field_view(app, definition, terms),
        );
    }

    draw_submit_button(frame, chunks[rows.len() + 2], app, definition);
}

fn field_view<'a>(app: &'a App, definition: &StepDefinition, spec: &'a FieldSpec) -> FieldView<'a> {
    FieldView {
        spec,
        value: app.wizard.values().get(spec.name),
        error: app.wizard.error_for(spec.name),
        is_active: !app.wizard.is_otp_open() && app.wizard.focus.is_active(definition, spec.name),
    }
}

fn draw_description(frame: &mut Frame, area: Rect, items: &[&str]) {
    if items.is_empty() {
        return;
    }
    let lines: Vec<Line> = items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::raw("• "),
                Span::styled(*item, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_submit_button(frame: &mut Frame, area: Rect, app: &App, definition: &StepDefinition) {
    let busy = app.wizard.is_submitting();
    let label = button_label(definition.submit_label, busy, app.tick);
    let width = (label.chars().count() as u16 + 4).min(area.width);
    let button_area = Rect { width, ..area };

    let selected = app.wizard.is_button_focused() && !app.wizard.is_otp_open();
    render_button(frame, button_area, &label, selected, !busy);
}
