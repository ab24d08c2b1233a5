//! Page interaction layer
//!
//! Locators describe how to find elements; [`PageActions`] is the shared
//! capability set page objects compose to act on them.

pub mod actions;
pub mod locator;

pub use actions::PageActions;
pub use locator::{Locator, Strategy};
