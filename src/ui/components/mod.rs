//! Reusable UI components

mod button;
mod dialog;

pub use button::{button_label, render_button, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, render_otp_dialog};
