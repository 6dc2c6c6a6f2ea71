//! Step progress tracker

use crate::state::WizardStep;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TRACKED_STEPS: [WizardStep; 3] = [WizardStep::Aadhaar, WizardStep::Pan, WizardStep::Address];

/// Where a tracked step sits relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Complete,
    Current,
    Upcoming,
}

pub fn step_status(step: WizardStep, current: WizardStep) -> StepStatus {
    match step.cmp(&current) {
        std::cmp::Ordering::Less => StepStatus::Complete,
        std::cmp::Ordering::Equal => StepStatus::Current,
        std::cmp::Ordering::Greater => StepStatus::Upcoming,
    }
}

pub fn draw(frame: &mut Frame, area: Rect, current: WizardStep) {
    let mut spans = Vec::new();
    for (idx, step) in TRACKED_STEPS.iter().enumerate() {
        if idx > 0 {
            let connector_color = if step_status(*step, current) == StepStatus::Upcoming {
                Color::DarkGray
            } else {
                Color::Cyan
            };
            spans.push(Span::styled(" ──── ", Style::default().fg(connector_color)));
        }

        let (marker, style) = match step_status(*step, current) {
            StepStatus::Complete => ("✔", Style::default().fg(Color::Cyan)),
            StepStatus::Current => (
                "●",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            StepStatus::Upcoming => ("○", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(format!("{marker} {}", step.progress_label()), style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
