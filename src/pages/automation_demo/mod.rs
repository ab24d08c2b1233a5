//! Automation Testing demo site pages

pub mod alerts;
pub mod date_picker;

pub use alerts::AlertPage;
pub use date_picker::DatePickerPage;
