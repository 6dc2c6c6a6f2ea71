//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Spinner glyph for the given frame counter
pub fn spinner(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Button caption, prefixed with a spinner while busy
pub fn button_label(label: &str, busy: bool, tick: usize) -> String {
    if busy {
        format!("{} {label}", spinner(tick))
    } else {
        label.to_string()
    }
}

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else if is_enabled {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), "|");
        assert_eq!(spinner(1), "/");
        assert_eq!(spinner(4), "|");
    }

    #[test]
    fn test_button_label_idle() {
        assert_eq!(button_label("Validate PAN", false, 3), "Validate PAN");
    }

    #[test]
    fn test_button_label_busy() {
        assert_eq!(button_label("Validate PAN", true, 2), "- Validate PAN");
    }
}
