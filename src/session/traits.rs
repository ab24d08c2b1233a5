//! Session traits
//!
//! Abstract interfaces for the live browser session and its construction. The
//! façade and the lifecycle registry depend only on these, so tests run
//! against the mock implementation.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::config::BrowserKind;
use crate::page::Locator;
use crate::Result;

/// Whether the session runs against a local driver binary or a remote hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    Local,
    Remote,
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locality::Local => f.write_str("local"),
            Locality::Remote => f.write_str("remote"),
        }
    }
}

/// Opaque browser window/tab identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One live browser automation session
///
/// Element operations take a [`Locator`] and resolve it per call; waiting and
/// polling live in the façade, not here.
#[async_trait]
pub trait DriverSession: Send + Sync + fmt::Debug {
    /// Session handle id
    fn id(&self) -> &str;

    /// Browser kind this session was created for
    fn browser(&self) -> BrowserKind;

    /// Local driver or remote hub
    fn locality(&self) -> Locality;

    /// False once the session has been quit
    fn is_active(&self) -> bool;

    /// Load a URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// Current page title
    async fn title(&self) -> Result<String>;

    /// Current page URL
    async fn current_url(&self) -> Result<String>;

    /// Execute JavaScript in the page, returning the JSON result
    async fn execute_script(&self, script: &str) -> Result<serde_json::Value>;

    /// Whether the located element exists and is currently displayed
    async fn is_displayed(&self, locator: &Locator) -> Result<bool>;

    /// Whether the located element is displayed and interactable
    async fn is_clickable(&self, locator: &Locator) -> Result<bool>;

    /// Click the located element
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// Send keystrokes to the located element
    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()>;

    /// Rendered text of the located element
    async fn text_of(&self, locator: &Locator) -> Result<String>;

    /// Named attribute of the located element
    async fn attribute_of(&self, locator: &Locator, name: &str) -> Result<Option<String>>;

    /// Named DOM property of the located element
    async fn property_of(&self, locator: &Locator, name: &str) -> Result<Option<String>>;

    /// Move the pointer over the located element
    async fn hover(&self, locator: &Locator) -> Result<()>;

    /// Drag the source element onto the target element
    async fn drag_and_drop(&self, source: &Locator, target: &Locator) -> Result<()>;

    /// Accept the open native dialog
    async fn accept_alert(&self) -> Result<()>;

    /// Dismiss the open native dialog
    async fn dismiss_alert(&self) -> Result<()>;

    /// Text of the open native dialog
    async fn alert_text(&self) -> Result<String>;

    /// Handle of the focused window
    async fn current_window(&self) -> Result<WindowId>;

    /// Handles of all open windows
    async fn windows(&self) -> Result<Vec<WindowId>>;

    /// Focus the given window
    async fn switch_to_window(&self, window: &WindowId) -> Result<()>;

    /// Close the focused window
    async fn close_window(&self) -> Result<()>;

    /// End the session, closing all windows
    async fn quit(&self) -> Result<()>;
}

/// Constructs sessions for the lifecycle registry
///
/// Injected so tests swap in a mock; the production implementation connects a
/// WebDriver session against the configured endpoint.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn create(&self, browser: BrowserKind) -> Result<Arc<dyn DriverSession>>;
}
