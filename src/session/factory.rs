//! Session factory
//!
//! One capability builder per supported browser kind; dispatch is over the
//! closed [`BrowserKind`] enum, so an unsupported browser cannot reach the
//! factory (string parsing already rejected it naming the allowed set).
//! Construction failures are wrapped in `Error::DriverInit` with the cause
//! preserved; they are fatal to the test and never retried.

use async_trait::async_trait;
use std::sync::Arc;
use thirtyfour::prelude::*;
use tracing::{debug, info};

use crate::config::{BrowserKind, HubKind, Settings};
use crate::session::traits::{DriverSession, Locality, SessionFactory};
use crate::session::webdriver::WebDriverSession;
use crate::{Error, Result};

/// Connects WebDriver sessions against the configured endpoint (local driver
/// binary, or the Grid hub when hub kind is `Grid`)
pub struct WebDriverFactory {
    settings: Arc<Settings>,
}

impl WebDriverFactory {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    fn locality(&self) -> Locality {
        match self.settings.hub {
            HubKind::None => Locality::Local,
            HubKind::Grid => Locality::Remote,
        }
    }
}

#[async_trait]
impl SessionFactory for WebDriverFactory {
    async fn create(&self, browser: BrowserKind) -> Result<Arc<dyn DriverSession>> {
        let endpoint = self.settings.endpoint_for(browser);
        let locality = self.locality();
        info!(%browser, %locality, endpoint, "Initializing browser session");

        let capabilities = build_capabilities(browser, &self.settings)
            .map_err(|e| Error::driver_init(browser.as_str(), e))?;

        let session =
            WebDriverSession::connect(&endpoint, capabilities, browser, locality, &self.settings)
                .await
                .map_err(|e| Error::driver_init(browser.as_str(), e))?;

        info!(%browser, session = session.id(), "Browser session initialized");
        Ok(Arc::new(session))
    }
}

/// Build capabilities for the requested browser kind
pub fn build_capabilities(browser: BrowserKind, settings: &Settings) -> Result<Capabilities> {
    let mut caps = match browser {
        BrowserKind::Chrome => chrome_capabilities(settings)?,
        BrowserKind::Firefox => firefox_capabilities(settings)?,
        BrowserKind::Edge => edge_capabilities(settings)?,
    };

    // Grid nodes match on a static platform/browser pair
    if settings.hub == HubKind::Grid {
        caps.insert("platformName".to_string(), serde_json::json!("windows"));
    }

    Ok(caps)
}

fn chrome_capabilities(settings: &Settings) -> Result<Capabilities> {
    let mut caps = DesiredCapabilities::chrome();
    caps.add_arg("--start-maximized")?;
    caps.add_arg(&format!("--window-size={}", settings.resolution))?;
    caps.add_arg("--disable-notifications")?;
    caps.add_arg("--disable-popup-blocking")?;

    if settings.headless {
        caps.add_arg("--headless=new")?;
        debug!("Chrome configured in headless mode");
    }

    Ok(caps.into())
}

fn firefox_capabilities(settings: &Settings) -> Result<Capabilities> {
    let mut caps = DesiredCapabilities::firefox();

    if settings.headless {
        caps.add_arg("-headless")?;
        debug!("Firefox configured in headless mode");
    }

    Ok(caps.into())
}

fn edge_capabilities(settings: &Settings) -> Result<Capabilities> {
    let mut caps = DesiredCapabilities::edge();
    caps.add_arg("--start-maximized")?;

    if settings.headless {
        caps.add_arg("--headless")?;
        debug!("Edge configured in headless mode");
    }

    Ok(caps.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environments, EnvironmentRecord, SettingsLayer};
    use std::collections::HashMap;

    fn settings_with(layer: SettingsLayer) -> Settings {
        let mut map = HashMap::new();
        map.insert(
            "GURU".to_string(),
            EnvironmentRecord {
                base_url: "https://demo.guru99.com".to_string(),
            },
        );
        Settings::resolve(layer, SettingsLayer::default(), &Environments(map)).unwrap()
    }

    #[test]
    fn chrome_headless_flag_is_applied() {
        let settings = settings_with(SettingsLayer {
            headless: Some(true),
            ..Default::default()
        });

        let caps = build_capabilities(BrowserKind::Chrome, &settings).unwrap();
        let args = caps["goog:chromeOptions"]["args"].to_string();
        assert!(args.contains("--headless=new"));
        assert!(args.contains("--window-size=1920,1080"));
        assert!(args.contains("--disable-notifications"));
    }

    #[test]
    fn chrome_defaults_are_headed() {
        let settings = settings_with(SettingsLayer::default());

        let caps = build_capabilities(BrowserKind::Chrome, &settings).unwrap();
        let args = caps["goog:chromeOptions"]["args"].to_string();
        assert!(!args.contains("--headless"));
        assert!(args.contains("--start-maximized"));
    }

    #[test]
    fn grid_capabilities_pin_the_platform() {
        let settings = settings_with(SettingsLayer {
            hub: Some("GRID".to_string()),
            ..Default::default()
        });

        let caps = build_capabilities(BrowserKind::Chrome, &settings).unwrap();
        assert_eq!(caps["platformName"], serde_json::json!("windows"));
    }

    #[test]
    fn every_browser_kind_builds() {
        let settings = settings_with(SettingsLayer {
            headless: Some(true),
            ..Default::default()
        });

        for browser in [BrowserKind::Chrome, BrowserKind::Firefox, BrowserKind::Edge] {
            assert!(build_capabilities(browser, &settings).is_ok());
        }
    }
}
