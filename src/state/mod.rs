//! Wizard state module

mod forms;
mod records;
mod wizard;

pub use forms::*;
pub use records::*;
pub use wizard::*;
