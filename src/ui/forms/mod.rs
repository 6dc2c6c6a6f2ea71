//! Form rendering module
//!
//! - `field_renderer`: text, checkbox and radio fields with inline errors
//! - `step_form`: the card for the current wizard step

mod field_renderer;
mod step_form;

pub use step_form::draw_step;
