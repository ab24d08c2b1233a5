//! Mock session implementation for testing
//!
//! Scriptable in-memory [`DriverSession`] used by the lifecycle, façade, and
//! page-object tests. Elements, windows, and alerts are plain state that tests
//! arrange up front and inspect afterwards; no browser is involved.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::BrowserKind;
use crate::page::Locator;
use crate::session::traits::{DriverSession, Locality, SessionFactory, WindowId};
use crate::{Error, Result};

/// Scripted element state
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    /// Whether the element is currently displayed
    pub displayed: bool,
    /// Whether the element is displayed and interactable
    pub clickable: bool,
    /// Number of visibility polls before the element reports displayed
    pub appears_after_polls: u32,
    /// Rendered text
    pub text: String,
    /// DOM attributes
    pub attributes: HashMap<String, String>,
    /// DOM properties
    pub properties: HashMap<String, String>,
    /// Keystrokes received so far
    pub keys: String,
    /// Click count
    pub clicks: u32,
    /// Hover count
    pub hovers: u32,
    /// Window handle opened when this element is clicked
    pub opens_window: Option<String>,
}

impl MockElement {
    /// A displayed, interactable element with the given text
    pub fn visible(text: &str) -> Self {
        Self {
            displayed: true,
            clickable: true,
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// An element that exists but never reports displayed
    pub fn hidden() -> Self {
        Self::default()
    }

    /// A displayed element that becomes visible only after the given number
    /// of visibility polls
    pub fn visible_after(polls: u32) -> Self {
        Self {
            displayed: true,
            clickable: true,
            appears_after_polls: polls,
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.properties.insert(name.to_string(), value.to_string());
        self
    }

    pub fn opening_window(mut self, handle: &str) -> Self {
        self.opens_window = Some(handle.to_string());
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    title: String,
    visited: Vec<String>,
    elements: HashMap<String, MockElement>,
    windows: Vec<WindowId>,
    current_window: Option<WindowId>,
    closed_windows: Vec<WindowId>,
    alert: Option<String>,
    alerts_accepted: u32,
    alerts_dismissed: u32,
    drags: Vec<(String, String)>,
    scripts: Vec<String>,
}

/// In-memory session
pub struct MockSession {
    id: String,
    browser: BrowserKind,
    active: AtomicBool,
    fail_navigation: AtomicBool,
    fail_quit: AtomicBool,
    state: Mutex<MockState>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::for_browser(BrowserKind::Chrome)
    }

    pub fn for_browser(browser: BrowserKind) -> Self {
        let main = WindowId("w-main".to_string());
        Self {
            id: Uuid::new_v4().to_string(),
            browser,
            active: AtomicBool::new(true),
            fail_navigation: AtomicBool::new(false),
            fail_quit: AtomicBool::new(false),
            state: Mutex::new(MockState {
                windows: vec![main.clone()],
                current_window: Some(main),
                ..Default::default()
            }),
        }
    }

    /// Make the next quit report an error (the session still goes inactive)
    pub fn fail_quit(&self) {
        self.fail_quit.store(true, Ordering::SeqCst);
    }

    /// Make navigation fail
    pub fn fail_navigation(&self) {
        self.fail_navigation.store(true, Ordering::SeqCst);
    }

    /// Install or replace a scripted element
    pub async fn put_element(&self, locator: &Locator, element: MockElement) {
        self.state
            .lock()
            .await
            .elements
            .insert(locator.to_string(), element);
    }

    /// Snapshot of a scripted element for assertions
    pub async fn element(&self, locator: &Locator) -> Option<MockElement> {
        self.state.lock().await.elements.get(&locator.to_string()).cloned()
    }

    pub async fn set_title(&self, title: &str) {
        self.state.lock().await.title = title.to_string();
    }

    /// Open an extra window without going through an element click
    pub async fn open_window(&self, handle: &str) {
        self.state
            .lock()
            .await
            .windows
            .push(WindowId(handle.to_string()));
    }

    /// Raise a native dialog
    pub async fn open_alert(&self, text: &str) {
        self.state.lock().await.alert = Some(text.to_string());
    }

    pub async fn visited(&self) -> Vec<String> {
        self.state.lock().await.visited.clone()
    }

    pub async fn alerts_accepted(&self) -> u32 {
        self.state.lock().await.alerts_accepted
    }

    pub async fn alerts_dismissed(&self) -> u32 {
        self.state.lock().await.alerts_dismissed
    }

    pub async fn drags(&self) -> Vec<(String, String)> {
        self.state.lock().await.drags.clone()
    }

    pub async fn scripts(&self) -> Vec<String> {
        self.state.lock().await.scripts.clone()
    }

    pub async fn open_window_count(&self) -> usize {
        self.state.lock().await.windows.len()
    }

    pub async fn closed_windows(&self) -> Vec<WindowId> {
        self.state.lock().await.closed_windows.clone()
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverSession for MockSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn browser(&self) -> BrowserKind {
        self.browser
    }

    fn locality(&self) -> Locality {
        Locality::Local
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn goto(&self, url: &str) -> Result<()> {
        if self.fail_navigation.load(Ordering::SeqCst) {
            return Err(Error::navigation(url, "mock transport failure"));
        }
        self.state.lock().await.visited.push(url.to_string());
        Ok(())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.state.lock().await.title.clone())
    }

    async fn current_url(&self) -> Result<String> {
        let state = self.state.lock().await;
        Ok(state.visited.last().cloned().unwrap_or_default())
    }

    async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        self.state.lock().await.scripts.push(script.to_string());
        Ok(serde_json::Value::Null)
    }

    async fn is_displayed(&self, locator: &Locator) -> Result<bool> {
        let mut state = self.state.lock().await;
        match state.elements.get_mut(&locator.to_string()) {
            Some(element) => {
                if element.appears_after_polls > 0 {
                    element.appears_after_polls -= 1;
                    Ok(false)
                } else {
                    Ok(element.displayed)
                }
            }
            None => Ok(false),
        }
    }

    async fn is_clickable(&self, locator: &Locator) -> Result<bool> {
        let mut state = self.state.lock().await;
        match state.elements.get_mut(&locator.to_string()) {
            Some(element) => {
                if element.appears_after_polls > 0 {
                    element.appears_after_polls -= 1;
                    Ok(false)
                } else {
                    Ok(element.displayed && element.clickable)
                }
            }
            None => Ok(false),
        }
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let mut state = self.state.lock().await;
        let element = state
            .elements
            .get_mut(&locator.to_string())
            .ok_or_else(|| Error::element_not_found(locator.to_string()))?;
        element.clicks += 1;

        if let Some(handle) = element.opens_window.clone() {
            state.windows.push(WindowId(handle));
        }
        Ok(())
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let element = state
            .elements
            .get_mut(&locator.to_string())
            .ok_or_else(|| Error::element_not_found(locator.to_string()))?;
        element.keys.push_str(text);
        Ok(())
    }

    async fn text_of(&self, locator: &Locator) -> Result<String> {
        let state = self.state.lock().await;
        state
            .elements
            .get(&locator.to_string())
            .map(|e| e.text.clone())
            .ok_or_else(|| Error::element_not_found(locator.to_string()))
    }

    async fn attribute_of(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        let state = self.state.lock().await;
        state
            .elements
            .get(&locator.to_string())
            .map(|e| e.attributes.get(name).cloned())
            .ok_or_else(|| Error::element_not_found(locator.to_string()))
    }

    async fn property_of(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        let state = self.state.lock().await;
        state
            .elements
            .get(&locator.to_string())
            .map(|e| e.properties.get(name).cloned())
            .ok_or_else(|| Error::element_not_found(locator.to_string()))
    }

    async fn hover(&self, locator: &Locator) -> Result<()> {
        let mut state = self.state.lock().await;
        let element = state
            .elements
            .get_mut(&locator.to_string())
            .ok_or_else(|| Error::element_not_found(locator.to_string()))?;
        element.hovers += 1;
        Ok(())
    }

    async fn drag_and_drop(&self, source: &Locator, target: &Locator) -> Result<()> {
        let mut state = self.state.lock().await;
        if !state.elements.contains_key(&source.to_string()) {
            return Err(Error::element_not_found(source.to_string()));
        }
        if !state.elements.contains_key(&target.to_string()) {
            return Err(Error::element_not_found(target.to_string()));
        }
        state.drags.push((source.to_string(), target.to_string()));
        Ok(())
    }

    async fn accept_alert(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state
            .alert
            .take()
            .ok_or_else(|| Error::internal("no alert open"))?;
        state.alerts_accepted += 1;
        Ok(())
    }

    async fn dismiss_alert(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state
            .alert
            .take()
            .ok_or_else(|| Error::internal("no alert open"))?;
        state.alerts_dismissed += 1;
        Ok(())
    }

    async fn alert_text(&self) -> Result<String> {
        let state = self.state.lock().await;
        state
            .alert
            .clone()
            .ok_or_else(|| Error::internal("no alert open"))
    }

    async fn current_window(&self) -> Result<WindowId> {
        let state = self.state.lock().await;
        state
            .current_window
            .clone()
            .ok_or_else(|| Error::internal("no window open"))
    }

    async fn windows(&self) -> Result<Vec<WindowId>> {
        Ok(self.state.lock().await.windows.clone())
    }

    async fn switch_to_window(&self, window: &WindowId) -> Result<()> {
        let mut state = self.state.lock().await;
        if !state.windows.contains(window) {
            return Err(Error::internal(format!("no such window: {}", window)));
        }
        state.current_window = Some(window.clone());
        Ok(())
    }

    async fn close_window(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let current = state
            .current_window
            .clone()
            .ok_or_else(|| Error::internal("no window open"))?;
        state.windows.retain(|w| *w != current);
        state.closed_windows.push(current);
        state.current_window = state.windows.first().cloned();
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        self.active.store(false, Ordering::SeqCst);
        if self.fail_quit.load(Ordering::SeqCst) {
            return Err(Error::internal("mock quit failure"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for MockSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSession")
            .field("id", &self.id)
            .field("browser", &self.browser)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Factory producing [`MockSession`]s
pub struct MockFactory {
    fail: bool,
    created: AtomicUsize,
    last: Mutex<Option<Arc<MockSession>>>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self {
            fail: false,
            created: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Factory whose create always fails, for driver-init fault tests
    pub fn failing() -> Self {
        Self {
            fail: true,
            created: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Number of sessions created so far
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Most recently created session, for state inspection
    pub async fn last_session(&self) -> Option<Arc<MockSession>> {
        self.last.lock().await.clone()
    }
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionFactory for MockFactory {
    async fn create(&self, browser: BrowserKind) -> Result<Arc<dyn DriverSession>> {
        if self.fail {
            return Err(Error::driver_init(
                browser.as_str(),
                Error::timeout("mock endpoint unreachable"),
            ));
        }

        let session = Arc::new(MockSession::for_browser(browser));
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().await = Some(session.clone());
        Ok(session)
    }
}
