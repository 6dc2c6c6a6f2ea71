//! OTP entry dialog

use super::base::{key_span, render_dialog, DialogConfig};
use crate::state::{OtpPrompt, OTP_LENGTH};
use crate::ui::components::button_label;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

const OTP_DESCRIPTION: &str =
    "An OTP has been sent to your Aadhaar linked mobile number. Please enter it below to proceed.";

/// Render the OTP prompt over the Aadhaar step
pub fn render_otp_dialog(frame: &mut Frame, otp: &OtpPrompt, confirming: bool, tick: usize) {
    let entered = otp.code.chars().count();
    let mut input = vec![
        Span::raw("OTP: "),
        Span::styled(otp.code.as_str(), Style::default().fg(Color::Cyan)),
    ];
    if entered < OTP_LENGTH {
        input.push(Span::styled(
            "_".repeat(OTP_LENGTH - entered),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut body = vec![Line::from(""), Line::from(input)];
    if let Some(error) = &otp.error {
        body.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let hint = if confirming {
        vec![Span::styled(
            button_label("Validating OTP...", true, tick),
            Style::default().fg(Color::Yellow),
        )]
    } else {
        vec![
            key_span("Enter"),
            Span::raw(" Validate OTP  "),
            key_span("Esc"),
            Span::raw(" Cancel"),
        ]
    };

    render_dialog(
        frame,
        DialogConfig {
            title: "Enter OTP",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: OTP_DESCRIPTION,
            body,
            hint: Some(hint),
            max_width: 56,
        },
    );
}
