//! Page interaction façade
//!
//! The shared operation set page objects compose: navigate, find-with-wait,
//! click, type, read, pointer gestures, alerts, window switching, and
//! verifications. Held by composition; the only state beyond the session
//! handle is the remembered original window.
//!
//! Every wait is a bounded poll (100 ms interval) against the session's
//! visibility/clickability checks; expiry raises the typed fault for the
//! condition being waited on.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::Settings;
use crate::page::Locator;
use crate::session::{DriverSession, WindowId};
use crate::util;
use crate::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared page interaction capability set
///
/// Cheap to clone; clones share the session and the remembered original
/// window.
#[derive(Clone)]
pub struct PageActions {
    session: Arc<dyn DriverSession>,
    base_url: String,
    element_wait: Duration,
    download_dir: PathBuf,
    original_window: Arc<Mutex<Option<WindowId>>>,
}

impl PageActions {
    pub fn new(session: Arc<dyn DriverSession>, settings: &Settings) -> Self {
        Self {
            session,
            base_url: settings.base_url.clone(),
            element_wait: Duration::from_secs(settings.wait_element_secs),
            download_dir: settings.download_dir.clone(),
            original_window: Arc::new(Mutex::new(None)),
        }
    }

    /// Override the default element wait (tests use sub-second waits)
    pub fn with_element_wait(mut self, wait: Duration) -> Self {
        self.element_wait = wait;
        self
    }

    /// Override the download directory
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// The session this façade operates on
    pub fn session(&self) -> &Arc<dyn DriverSession> {
        &self.session
    }

    /// Navigate to the configured base URL
    pub async fn open_base(&self) -> Result<()> {
        let url = self.base_url.clone();
        self.open(&url).await
    }

    /// Navigate to a URL
    pub async fn open(&self, url: &str) -> Result<()> {
        info!(url, "Navigating to URL");
        self.session.goto(url).await?;
        debug!(url, "Navigation completed");
        Ok(())
    }

    /// Current page title
    pub async fn title(&self) -> Result<String> {
        let title = self.session.title().await?;
        debug!(title, "Current page title");
        Ok(title)
    }

    /// Current page URL
    pub async fn current_url(&self) -> Result<String> {
        self.session.current_url().await
    }

    /// Execute JavaScript in the page
    pub async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        debug!(script, "Executing JavaScript");
        self.session.execute_script(script).await
    }

    /// Poll until the located element is visible, using the default wait
    pub async fn find_visible(&self, locator: &Locator) -> Result<()> {
        self.find_visible_within(locator, self.element_wait).await
    }

    /// Poll until the located element is visible or the timeout elapses
    #[instrument(skip(self))]
    pub async fn find_visible_within(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.session.is_displayed(locator).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::ElementNotVisible {
                    locator: locator.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Poll until the located element is visible and interactable, using the
    /// default wait
    pub async fn find_clickable(&self, locator: &Locator) -> Result<()> {
        self.find_clickable_within(locator, self.element_wait).await
    }

    /// Poll until the located element is visible and interactable or the
    /// timeout elapses
    #[instrument(skip(self))]
    pub async fn find_clickable_within(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.session.is_clickable(locator).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::ElementNotClickable {
                    locator: locator.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Poll until the locator no longer resolves to a visible element
    #[instrument(skip(self))]
    pub async fn wait_for_invisible(&self, locator: &Locator) -> Result<()> {
        let timeout = self.element_wait;
        let deadline = Instant::now() + timeout;
        loop {
            if !self.session.is_displayed(locator).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::timeout(format!(
                    "Element still visible after {:?}: {}",
                    timeout, locator
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for visibility, then send keystrokes
    pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        info!(%locator, text, "Entering text");
        self.find_visible(locator).await?;
        self.session.send_keys(locator, text).await
    }

    /// Send keystrokes without the visibility poll (hidden file inputs)
    pub async fn type_text_no_wait(&self, locator: &Locator, text: &str) -> Result<()> {
        info!(%locator, text, "Entering text without wait");
        self.session.send_keys(locator, text).await
    }

    /// Wait for clickability, then click
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        info!(%locator, "Clicking element");
        self.find_clickable(locator).await?;
        self.session.click(locator).await
    }

    /// Rendered text of a visible element
    pub async fn read_text(&self, locator: &Locator) -> Result<String> {
        self.find_visible(locator).await?;
        let text = self.session.text_of(locator).await?;
        debug!(%locator, text, "Retrieved element text");
        Ok(text)
    }

    /// Named attribute of a visible element
    pub async fn read_attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        debug!(%locator, name, "Getting element attribute");
        self.find_visible(locator).await?;
        self.session.attribute_of(locator, name).await
    }

    /// Rendered text, falling back to the `value` property when empty
    pub async fn read_value(&self, locator: &Locator) -> Result<String> {
        self.find_visible(locator).await?;
        let text = self.session.text_of(locator).await?;
        if !text.is_empty() {
            return Ok(text);
        }
        Ok(self
            .session
            .property_of(locator, "value")
            .await?
            .unwrap_or_default())
    }

    /// Move the pointer over a visible element
    pub async fn hover(&self, locator: &Locator) -> Result<()> {
        info!(%locator, "Hovering over element");
        self.find_visible(locator).await?;
        self.session.hover(locator).await
    }

    /// Drag the source element onto the target element
    pub async fn drag_and_drop(&self, source: &Locator, target: &Locator) -> Result<()> {
        info!(%source, %target, "Dragging element");
        self.find_visible(source).await?;
        self.find_visible(target).await?;
        self.session.drag_and_drop(source, target).await
    }

    /// Accept the open native dialog
    pub async fn accept_alert(&self) -> Result<()> {
        info!("Accepting alert");
        self.session.accept_alert().await
    }

    /// Dismiss the open native dialog
    pub async fn dismiss_alert(&self) -> Result<()> {
        info!("Dismissing alert");
        self.session.dismiss_alert().await
    }

    /// Text of the open native dialog
    pub async fn alert_text(&self) -> Result<String> {
        self.session.alert_text().await
    }

    /// Remember the current window as original and switch to the first other
    /// window
    ///
    /// Staying put when no other window exists is a warning, not an error.
    pub async fn switch_to_new_window(&self) -> Result<()> {
        let current = self.session.current_window().await?;
        info!(window = %current, "Switching to new window");
        *self.original_window.lock().await = Some(current.clone());

        for window in self.session.windows().await? {
            if window != current {
                self.session.switch_to_window(&window).await?;
                info!(window = %window, "Switched to new window");
                return Ok(());
            }
        }

        warn!("No new window found to switch to");
        Ok(())
    }

    /// Close every window except the remembered original, then switch back
    ///
    /// Destructive by design: any extra window is closed, however it was
    /// opened.
    pub async fn switch_back_to_original(&self) -> Result<()> {
        let original = match self.original_window.lock().await.clone() {
            Some(window) => window,
            None => {
                warn!("No original window recorded; staying on the current window");
                return Ok(());
            }
        };
        info!(window = %original, "Switching back to original window");

        for window in self.session.windows().await? {
            if window != original {
                self.session.switch_to_window(&window).await?;
                self.session.close_window().await?;
                debug!(window = %window, "Closed extra window");
            }
        }

        self.session.switch_to_window(&original).await
    }

    /// Fail with the message unless the condition holds
    pub fn verify_true(&self, condition: bool, message: &str) -> Result<()> {
        debug!("Verifying condition is true");
        if condition {
            Ok(())
        } else {
            Err(Error::assertion(message))
        }
    }

    /// Fail with the message if the condition holds
    pub fn verify_false(&self, condition: bool, message: &str) -> Result<()> {
        debug!("Verifying condition is false");
        if condition {
            Err(Error::assertion(message))
        } else {
            Ok(())
        }
    }

    /// Fail with the message unless the values are equal
    pub fn verify_eq<T: PartialEq + fmt::Debug>(
        &self,
        expected: T,
        actual: T,
        message: &str,
    ) -> Result<()> {
        debug!("Verifying equality of expected and actual values");
        if expected == actual {
            Ok(())
        } else {
            Err(Error::assertion(format!(
                "{} (expected {:?}, found {:?})",
                message, expected, actual
            )))
        }
    }

    /// Fail with the message unless the element becomes visible
    ///
    /// The underlying wait fault is kept as the assertion's source, so a
    /// visibility timeout stays distinguishable from any other failure.
    pub async fn verify_visible(&self, locator: &Locator, message: &str) -> Result<()> {
        info!(%locator, "Verifying element visibility");
        self.find_visible(locator)
            .await
            .map_err(|e| Error::assertion_caused_by(message, e))
    }

    /// Wait for a named file to appear in the download directory
    pub async fn wait_for_file_download(
        &self,
        file_name: &str,
        timeout: Duration,
    ) -> Result<PathBuf> {
        util::fs::wait_for_download(&self.download_dir, file_name, timeout).await
    }

    /// Fail unless the downloaded file exists and contains the expectation
    pub async fn verify_downloaded_file_contains(
        &self,
        file_name: &str,
        expected: &str,
    ) -> Result<()> {
        info!(file_name, "Verifying downloaded file content");
        let content = util::fs::read_file_content(&self.download_dir.join(file_name))?;
        self.verify_true(
            content.contains(expected),
            "The downloaded file content does not match the expected content",
        )
    }

    /// Directory the browser downloads into
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Fail unless the current page title equals the expectation
    pub async fn verify_title(&self, expected: &str) -> Result<()> {
        info!(expected, "Verifying page title");
        let actual = self.title().await?;
        self.verify_eq(
            expected,
            actual.as_str(),
            &format!("Expected title '{}' but found '{}'", expected, actual),
        )
    }
}

impl fmt::Debug for PageActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageActions")
            .field("session", &self.session.id())
            .field("element_wait", &self.element_wait)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvironmentRecord, Environments, Settings, SettingsLayer};
    use crate::session::{MockElement, MockSession};
    use std::collections::HashMap;

    fn test_settings() -> Settings {
        let mut map = HashMap::new();
        map.insert(
            "GURU".to_string(),
            EnvironmentRecord {
                base_url: "https://demo.guru99.com".to_string(),
            },
        );
        Settings::resolve(
            SettingsLayer::default(),
            SettingsLayer::default(),
            &Environments(map),
        )
        .unwrap()
    }

    fn actions_for(session: &Arc<MockSession>) -> PageActions {
        let session: Arc<dyn DriverSession> = session.clone();
        PageActions::new(session, &test_settings())
            .with_element_wait(Duration::from_millis(350))
    }

    #[tokio::test]
    async fn open_base_navigates_to_environment_url() {
        let session = Arc::new(MockSession::new());
        let actions = actions_for(&session);

        actions.open_base().await.unwrap();
        assert_eq!(session.visited().await, vec!["https://demo.guru99.com"]);
    }

    #[tokio::test]
    async fn find_visible_waits_out_delayed_elements() {
        let session = Arc::new(MockSession::new());
        let banner = Locator::id("banner");
        session.put_element(&banner, MockElement::visible_after(2)).await;

        let actions = actions_for(&session);
        actions.find_visible(&banner).await.unwrap();
    }

    #[tokio::test]
    async fn find_visible_times_out_with_the_visibility_fault() {
        let session = Arc::new(MockSession::new());
        let ghost = Locator::id("ghost");
        session.put_element(&ghost, MockElement::hidden()).await;

        let actions = actions_for(&session);
        let err = actions.find_visible(&ghost).await.unwrap_err();
        assert!(matches!(err, Error::ElementNotVisible { .. }));
    }

    #[tokio::test]
    async fn click_waits_for_clickability_first() {
        let session = Arc::new(MockSession::new());
        let button = Locator::id("OKTab");
        session.put_element(&button, MockElement::visible_after(1)).await;

        let actions = actions_for(&session);
        actions.click(&button).await.unwrap();
        assert_eq!(session.element(&button).await.unwrap().clicks, 1);
    }

    #[tokio::test]
    async fn click_on_unclickable_element_fails_typed() {
        let session = Arc::new(MockSession::new());
        let label = Locator::id("label");
        let mut element = MockElement::visible("static");
        element.clickable = false;
        session.put_element(&label, element).await;

        let actions = actions_for(&session);
        let err = actions.click(&label).await.unwrap_err();
        assert!(matches!(err, Error::ElementNotClickable { .. }));
    }

    #[tokio::test]
    async fn type_text_requires_visibility_but_no_wait_variant_does_not() {
        let session = Arc::new(MockSession::new());
        let hidden_input = Locator::id("input-4");
        let mut element = MockElement::hidden();
        element.text = String::new();
        session.put_element(&hidden_input, element).await;

        let actions = actions_for(&session);
        let err = actions.type_text(&hidden_input, "file.jpg").await.unwrap_err();
        assert!(matches!(err, Error::ElementNotVisible { .. }));

        actions
            .type_text_no_wait(&hidden_input, "file.jpg")
            .await
            .unwrap();
        assert_eq!(session.element(&hidden_input).await.unwrap().keys, "file.jpg");
    }

    #[tokio::test]
    async fn read_value_falls_back_to_the_value_property() {
        let session = Arc::new(MockSession::new());
        let field = Locator::id("datepicker1");
        let element = MockElement::visible("").with_property("value", "02/10/2026");
        session.put_element(&field, element).await;

        let actions = actions_for(&session);
        assert_eq!(actions.read_value(&field).await.unwrap(), "02/10/2026");
    }

    #[tokio::test]
    async fn read_value_prefers_rendered_text() {
        let session = Arc::new(MockSession::new());
        let field = Locator::id("field");
        let element = MockElement::visible("shown").with_property("value", "stored");
        session.put_element(&field, element).await;

        let actions = actions_for(&session);
        assert_eq!(actions.read_value(&field).await.unwrap(), "shown");
    }

    #[tokio::test]
    async fn wait_for_invisible_observes_disappearance() {
        let session = Arc::new(MockSession::new());
        let spinner = Locator::class_name("ui-datepicker-calendar");
        session.put_element(&spinner, MockElement::hidden()).await;

        let actions = actions_for(&session);
        actions.wait_for_invisible(&spinner).await.unwrap();
    }

    #[tokio::test]
    async fn window_round_trip_leaves_only_the_original() {
        let session = Arc::new(MockSession::new());
        let actions = actions_for(&session);

        session.open_window("w-2").await;
        session.open_window("w-3").await;

        actions.switch_to_new_window().await.unwrap();
        assert_ne!(
            session.current_window().await.unwrap(),
            WindowId("w-main".to_string())
        );

        actions.switch_back_to_original().await.unwrap();
        assert_eq!(session.open_window_count().await, 1);
        assert_eq!(
            session.current_window().await.unwrap(),
            WindowId("w-main".to_string())
        );
    }

    #[tokio::test]
    async fn switch_with_no_extra_window_stays_put() {
        let session = Arc::new(MockSession::new());
        let actions = actions_for(&session);

        actions.switch_to_new_window().await.unwrap();
        assert_eq!(
            session.current_window().await.unwrap(),
            WindowId("w-main".to_string())
        );
    }

    #[tokio::test]
    async fn verify_visible_preserves_the_wait_fault() {
        let session = Arc::new(MockSession::new());
        let actions = actions_for(&session);
        let missing = Locator::id("missing");

        let err = actions
            .verify_visible(&missing, "tooltip should appear")
            .await
            .unwrap_err();

        assert!(err.is_assertion());
        let source = std::error::Error::source(&err).expect("wait fault kept as source");
        assert!(source.to_string().contains("not visible"));
    }

    #[tokio::test]
    async fn verifications_raise_assertion_faults() {
        let session = Arc::new(MockSession::new());
        let actions = actions_for(&session);

        assert!(actions.verify_true(true, "ok").is_ok());
        assert!(actions.verify_false(false, "ok").is_ok());
        assert!(actions.verify_eq("a", "a", "ok").is_ok());

        let err = actions.verify_eq("a", "b", "values differ").unwrap_err();
        assert!(err.is_assertion());
        assert!(err.to_string().contains("values differ"));
    }

    #[tokio::test]
    async fn verify_title_compares_against_the_page() {
        let session = Arc::new(MockSession::new());
        session.set_title("Frames & windows").await;
        let actions = actions_for(&session);

        actions.verify_title("Frames & windows").await.unwrap();
        assert!(actions.verify_title("Selenium").await.unwrap_err().is_assertion());
    }

    #[tokio::test]
    async fn navigation_failure_is_typed() {
        let session = Arc::new(MockSession::new());
        session.fail_navigation();
        let actions = actions_for(&session);

        let err = actions.open("https://example.com").await.unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }));
    }
}
