//! Layout components (header, notices, side note, status bar)

use crate::app::App;
use crate::platform::{QUIT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::Wizard;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of the side note panel
const NOTE_WIDTH: u16 = 32;

const DEMO_NOTICE: &str = "This is a demo application. Please do not enter real Aadhaar or PAN numbers. All functionality, including OTP, is simulated.";

const NOTES: &[&str] = &[
    "Udyam Registration is free of cost. No fee is charged for this process.",
    "For Registration, Aadhaar number is mandatory.",
    "The Aadhaar number should be of the Proprietor for a Proprietorship firm, the Managing Partner for a Partnership firm, or the Karta for a Hindu Undivided Family (HUF).",
    "In case of a Company, LLP, Co-operative Society, Society, or Trust, the authorised signatory must provide the organization's GSTIN and PAN along with their Aadhaar number.",
];

/// Screen regions, top to bottom
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub fn create_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title + progress
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Split the body into demo notice, step card and side note
pub fn split_body(area: Rect) -> (Rect, Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(NOTE_WIDTH)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(columns[0]);

    (rows[0], rows[1], columns[1])
}

pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = vec![
        Line::from(Span::styled(
            "UDYAM REGISTRATION FORM",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "For New Enterprise who are not Registered yet as MSME and those who are registered as EM-II/UAM",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        chunks[0],
    );

    super::progress::draw(frame, chunks[1], app.wizard.step());
}

pub fn draw_demo_notice(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            " Demonstration Only ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(
        Paragraph::new(Span::styled(DEMO_NOTICE, Style::default().fg(Color::Yellow)))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

pub fn draw_note_panel(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for (idx, note) in NOTES.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(*note));
    }

    let block = Block::default()
        .title(Span::styled(
            " Note: ",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_hints(&app.wizard)),
        Style::default().fg(Color::Gray),
    )];

    // Latest success toast
    if let Some(notice) = app.wizard.notice() {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            format!("{}: {} ", notice.title, notice.description),
            Style::default().fg(Color::Green),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = format!(" {QUIT_SHORTCUT}:quit ");
    let hint_width = quit_hint.len() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(hint_width),
        width: hint_width.min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current wizard state
fn get_hints(wizard: &Wizard) -> String {
    if wizard.failure().is_some() {
        "Enter/Esc:dismiss".to_string()
    } else if wizard.step().is_terminal() {
        "r:start over  q:quit".to_string()
    } else if wizard.is_submitting() {
        "Please wait...".to_string()
    } else if wizard.is_otp_open() {
        "0-9:type  Enter:validate  Esc:cancel".to_string()
    } else {
        format!("Tab:next  Space:toggle  ←/→:choose  Enter/{SUBMIT_SHORTCUT}:continue")
    }
}
