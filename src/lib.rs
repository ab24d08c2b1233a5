//! webharness: Page Object Model UI test automation framework
//!
//! Drives a web browser through the WebDriver protocol (via `thirtyfour`),
//! across Chrome, Firefox, and Edge, locally or against a Selenium Grid hub.
//! Layered configuration selects the environment and browser; a per-context
//! registry owns session lifecycles; page objects compose the shared
//! interaction façade into site-specific actions and verifications.

pub mod config;
pub mod error;

pub mod harness;
pub mod page;
pub mod pages;
pub mod session;
pub mod util;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use harness::{Harness, TestContext};
pub use page::{Locator, PageActions, Strategy};

/// webharness library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
