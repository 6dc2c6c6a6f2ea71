//! Field rendering utilities for the wizard form

use crate::state::{FieldKind, FieldSpec, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows used by a bordered text box
const TEXT_BOX_HEIGHT: u16 = 3;

/// How one field is drawn this frame
pub struct FieldView<'a> {
    pub spec: &'a FieldSpec,
    pub value: FieldValue,
    pub error: Option<&'a str>,
    pub is_active: bool,
}

/// Rows needed to render `text` wrapped at `width` columns
pub fn text_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    text.split('\n')
        .map(|line| line.chars().count().max(1).div_ceil(width) as u16)
        .sum()
}

/// Height of a field including its error row
pub fn field_height(spec: &FieldSpec, width: u16) -> u16 {
    let body = match spec.kind {
        FieldKind::Text { .. } => TEXT_BOX_HEIGHT,
        FieldKind::Radio { options } => options.len() as u16 + 2,
        // "[ ] " prefix takes four columns
        FieldKind::Checkbox => text_height(spec.label, width.saturating_sub(4)),
    };
    body + 1
}

/// Draw any field kind; the spacer draws nothing
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView) {
    if field.spec.name.is_spacer() || area.height == 0 {
        return;
    }

    let body_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    match field.spec.kind {
        FieldKind::Text {
            placeholder,
            read_only,
        } => draw_text(frame, body_area, field, placeholder, read_only),
        FieldKind::Checkbox => draw_checkbox(frame, body_area, field),
        FieldKind::Radio { .. } => draw_radio(frame, body_area, field),
    }

    if let Some(error) = field.error {
        let error_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
            error_area,
        );
    }
}

fn border_style(field: &FieldView) -> Style {
    if field.error.is_some() {
        Style::default().fg(Color::Red)
    } else if field.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_text(frame: &mut Frame, area: Rect, field: &FieldView, placeholder: &str, read_only: bool) {
    let value = field.value.as_text();
    let mut spans = if value.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        let style = if read_only {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::White)
        };
        vec![Span::styled(value.to_string(), style)]
    };
    if field.is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut title = format!(" {} ", field.spec.label);
    if read_only {
        title.push_str("(auto) ");
    }
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(field));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_checkbox(frame: &mut Frame, area: Rect, field: &FieldView) {
    let mark = if field.value.as_flag() { "[x] " } else { "[ ] " };
    let style = if field.is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(mark, style),
        Span::styled(field.spec.label, Style::default().fg(Color::Gray)),
    ]))
    .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_radio(frame: &mut Frame, area: Rect, field: &FieldView) {
    let FieldKind::Radio { options } = field.spec.kind else {
        return;
    };
    let selected = field.value.as_text();

    let lines: Vec<Line> = options
        .iter()
        .map(|option| {
            let is_selected = option.value == selected;
            let marker = if is_selected { "(•) " } else { "( ) " };
            let style = if is_selected && field.is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{marker}{}", option.label), style))
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", field.spec.label))
        .borders(Borders::ALL)
        .border_style(border_style(field));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldName, ORGANISATION_TYPES};

    #[test]
    fn test_text_height_single_line() {
        assert_eq!(text_height("short", 40), 1);
    }

    #[test]
    fn test_text_height_wraps() {
        assert_eq!(text_height(&"x".repeat(81), 40), 3);
    }

    #[test]
    fn test_text_height_empty_still_takes_a_row() {
        assert_eq!(text_height("", 40), 1);
    }

    #[test]
    fn test_field_heights() {
        let text = FieldSpec::text(FieldName::PinCode, "PIN Code", "");
        assert_eq!(field_height(&text, 40), 4);

        let radio = FieldSpec::radio(FieldName::OrganisationType, "Type", ORGANISATION_TYPES);
        assert_eq!(field_height(&radio, 40), 12);

        let checkbox = FieldSpec::checkbox(FieldName::PanTerms, "I agree");
        assert_eq!(field_height(&checkbox, 40), 2);
    }
}
