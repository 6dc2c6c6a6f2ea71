//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod progress;
mod submitted;

use crate::app::App;
use components::{render_error_dialog, render_otp_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = layout::create_layout(frame.area());

    layout::draw_header(frame, screen.header, app);

    match app.wizard.definition() {
        Some(definition) => {
            let (notice_area, card_area, note_area) = layout::split_body(screen.body);
            layout::draw_demo_notice(frame, notice_area);
            forms::draw_step(frame, card_area, app, definition);
            layout::draw_note_panel(frame, note_area);
        }
        None => submitted::draw(frame, screen.body, app),
    }

    layout::draw_status_bar(frame, screen.status, app);

    // Modal overlays last so they sit on top
    if let Some(otp) = app.wizard.otp() {
        render_otp_dialog(frame, otp, app.wizard.is_submitting(), app.tick);
    }
    if let Some(message) = app.wizard.failure() {
        render_error_dialog(frame, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        MockAddressLookup, MockRegistrationStore, MockVerificationGateway, Services,
    };
    use crate::state::FieldName;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn test_app() -> App {
        App::new(Services {
            lookup: Arc::new(MockAddressLookup::new()),
            store: Arc::new(MockRegistrationStore::new()),
            verifier: Arc::new(MockVerificationGateway::new()),
        })
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_first_step_renders_card_and_notes() {
        let screen = render(&test_app());
        assert!(screen.contains("UDYAM REGISTRATION FORM"));
        assert!(screen.contains("1. Aadhaar Verification With OTP"));
        assert!(screen.contains("Validate & Generate OTP"));
        assert!(screen.contains("Demonstration Only"));
        assert!(screen.contains("Note:"));
    }

    #[tokio::test]
    async fn test_inline_error_is_rendered() {
        let mut app = test_app();
        app.wizard
            .set_text(FieldName::AadhaarNumber, "123")
            .unwrap();
        app.wizard.touch(FieldName::AadhaarNumber);

        let screen = render(&app);
        assert!(screen.contains("Aadhaar number must be 12 digits."));
    }
}
