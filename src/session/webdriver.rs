//! WebDriver-backed session
//!
//! Wraps a live `thirtyfour` session behind the [`DriverSession`] trait. The
//! driver is held in an `RwLock<Option<_>>` so quit can take ownership while
//! every other operation borrows it for the duration of one call.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thirtyfour::WindowHandle;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{BrowserKind, Settings};
use crate::page::Locator;
use crate::session::traits::{DriverSession, Locality, WindowId};
use crate::{Error, Result};

/// Live WebDriver session
pub struct WebDriverSession {
    id: String,
    browser: BrowserKind,
    locality: Locality,
    active: AtomicBool,
    driver: RwLock<Option<WebDriver>>,
}

fn require<'a>(driver: &'a Option<WebDriver>, id: &str) -> Result<&'a WebDriver> {
    driver
        .as_ref()
        .ok_or_else(|| Error::not_initialized(id.to_string()))
}

/// Resolve a locator, mapping a missing element to the framework's not-found
/// fault
async fn find(driver: &WebDriver, locator: &Locator) -> Result<WebElement> {
    driver.find(locator.to_by()).await.map_err(|e| match e {
        WebDriverError::NoSuchElement(_) => Error::element_not_found(locator.to_string()),
        other => Error::WebDriver(other),
    })
}

impl WebDriverSession {
    /// Connect a new session against `endpoint` and apply the configured
    /// timeouts
    pub async fn connect(
        endpoint: &str,
        capabilities: Capabilities,
        browser: BrowserKind,
        locality: Locality,
        settings: &Settings,
    ) -> Result<Self> {
        let driver = WebDriver::new(endpoint, capabilities).await?;

        driver
            .set_implicit_wait_timeout(Duration::from_secs(settings.implicit_wait_secs))
            .await?;
        driver
            .set_page_load_timeout(Duration::from_secs(settings.page_load_timeout_secs))
            .await?;

        debug!(%browser, %locality, endpoint, "WebDriver session connected");

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            browser,
            locality,
            active: AtomicBool::new(true),
            driver: RwLock::new(Some(driver)),
        })
    }
}

#[async_trait]
impl DriverSession for WebDriverSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn browser(&self) -> BrowserKind {
        self.browser
    }

    fn locality(&self) -> Locality {
        self.locality
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn goto(&self, url: &str) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        driver
            .goto(url)
            .await
            .map_err(|e| Error::navigation(url, e.to_string()))
    }

    async fn title(&self) -> Result<String> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        Ok(driver.title().await?)
    }

    async fn current_url(&self) -> Result<String> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        Ok(driver.current_url().await?.to_string())
    }

    async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let ret = driver.execute(script, vec![]).await?;
        Ok(ret.json().clone())
    }

    async fn is_displayed(&self, locator: &Locator) -> Result<bool> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        match find(driver, locator).await {
            Ok(element) => Ok(element.is_displayed().await?),
            Err(Error::ElementNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn is_clickable(&self, locator: &Locator) -> Result<bool> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        match find(driver, locator).await {
            Ok(element) => Ok(element.is_clickable().await?),
            Err(Error::ElementNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let element = find(driver, locator).await?;
        Ok(element.click().await?)
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let element = find(driver, locator).await?;
        Ok(element.send_keys(text).await?)
    }

    async fn text_of(&self, locator: &Locator) -> Result<String> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let element = find(driver, locator).await?;
        Ok(element.text().await?)
    }

    async fn attribute_of(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let element = find(driver, locator).await?;
        Ok(element.attr(name).await?)
    }

    async fn property_of(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let element = find(driver, locator).await?;
        Ok(element.prop(name).await?)
    }

    async fn hover(&self, locator: &Locator) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let element = find(driver, locator).await?;
        driver
            .action_chain()
            .move_to_element_center(&element)
            .perform()
            .await?;
        Ok(())
    }

    async fn drag_and_drop(&self, source: &Locator, target: &Locator) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let source_element = find(driver, source).await?;
        let target_element = find(driver, target).await?;
        driver
            .action_chain()
            .drag_and_drop_element(&source_element, &target_element)
            .perform()
            .await?;
        Ok(())
    }

    async fn accept_alert(&self) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        Ok(driver.accept_alert().await?)
    }

    async fn dismiss_alert(&self) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        Ok(driver.dismiss_alert().await?)
    }

    async fn alert_text(&self) -> Result<String> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        Ok(driver.get_alert_text().await?)
    }

    async fn current_window(&self) -> Result<WindowId> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let handle = driver.window().await?;
        Ok(WindowId(handle.to_string()))
    }

    async fn windows(&self) -> Result<Vec<WindowId>> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let handles = driver.windows().await?;
        Ok(handles
            .into_iter()
            .map(|h| WindowId(h.to_string()))
            .collect())
    }

    async fn switch_to_window(&self, window: &WindowId) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        let handle = WindowHandle::from(window.0.clone());
        Ok(driver.switch_to_window(handle).await?)
    }

    async fn close_window(&self) -> Result<()> {
        let guard = self.driver.read().await;
        let driver = require(&guard, &self.id)?;
        Ok(driver.close_window().await?)
    }

    async fn quit(&self) -> Result<()> {
        let driver = self.driver.write().await.take();
        self.active.store(false, Ordering::SeqCst);

        match driver {
            Some(driver) => Ok(driver.quit().await?),
            None => {
                warn!(session = %self.id, "quit called on an already closed session");
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for WebDriverSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriverSession")
            .field("id", &self.id)
            .field("browser", &self.browser)
            .field("locality", &self.locality)
            .field("active", &self.is_active())
            .finish()
    }
}
