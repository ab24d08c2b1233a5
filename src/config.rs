//! Configuration management for webharness
//!
//! Settings are resolved exactly once at process start from three layers, in
//! precedence order: environment-variable override > settings file value >
//! hardcoded default. The per-environment record (base URL) is looked up in a
//! JSON data file keyed by environment name; a missing key or unparseable file
//! is a startup fault.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default environment name
pub const DEFAULT_ENVIRONMENT: &str = "GURU";

/// Selenium Grid hub endpoint, used only when the hub kind is `Grid`
pub const GRID_HUB_URL: &str = "http://localhost:4444";

/// Default location of the environment data file
pub const ENVIRONMENTS_FILE: &str = "resources/environments.json";

/// Default location of the optional settings file layer
pub const SETTINGS_FILE: &str = "webharness.toml";

/// Element visibility wait timeout in seconds
pub const WAIT_ELEMENT_SECS: u64 = 5;

/// Implicit wait timeout in seconds
pub const IMPLICIT_WAIT_SECS: u64 = 2;

/// Page load timeout in seconds
pub const PAGE_LOAD_TIMEOUT_SECS: u64 = 15;

/// Supported browser kinds
///
/// A closed set: adding a browser means adding a variant and a capability
/// builder, not editing string dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Edge,
}

impl BrowserKind {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Edge => "edge",
        }
    }

    /// Default endpoint of the locally running driver binary for this browser
    pub fn local_endpoint(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "http://localhost:9515",
            BrowserKind::Firefox => "http://localhost:4444",
            BrowserKind::Edge => "http://localhost:9515",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            "edge" => Ok(BrowserKind::Edge),
            _ => Err(Error::unsupported_browser(s)),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where sessions are provisioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HubKind {
    /// Local driver binary, no hub
    #[default]
    None,
    /// Selenium Grid hub
    Grid,
}

impl FromStr for HubKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(HubKind::None),
            "GRID" => Ok(HubKind::Grid),
            _ => Err(Error::configuration(format!(
                "Invalid hub type: {}. Supported types: NONE, GRID",
                s
            ))),
        }
    }
}

impl fmt::Display for HubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HubKind::None => f.write_str("NONE"),
            HubKind::Grid => f.write_str("GRID"),
        }
    }
}

/// Browser window resolution, written as `"width,height"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once(',')
            .ok_or_else(|| Error::configuration(format!("Invalid resolution: {}", s)))?;
        let width = w
            .trim()
            .parse()
            .map_err(|_| Error::configuration(format!("Invalid resolution width: {}", s)))?;
        let height = h
            .trim()
            .parse()
            .map_err(|_| Error::configuration(format!("Invalid resolution height: {}", s)))?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

/// One layer of raw settings values, all optional
///
/// The same shape serves the settings file (deserialized from TOML) and the
/// environment-variable override layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsLayer {
    pub environment: Option<String>,
    pub browser: Option<String>,
    pub resolution: Option<String>,
    pub headless: Option<bool>,
    pub hub: Option<String>,
    pub hub_url: Option<String>,
    pub webdriver_url: Option<String>,
    pub download_dir: Option<String>,
}

impl SettingsLayer {
    /// Load the settings file layer; a missing file yields an empty layer, an
    /// unreadable or unparseable one is a startup fault
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("Failed to parse settings file {}: {}", path.display(), e))
        })
    }

    /// Build the override layer from `WEBHARNESS_*` environment variables
    pub fn from_env() -> Result<Self> {
        let headless = match env::var("WEBHARNESS_HEADLESS") {
            Ok(v) => Some(v.parse().map_err(|_| {
                Error::configuration(format!("Invalid WEBHARNESS_HEADLESS: {}", v))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            environment: env::var("WEBHARNESS_ENV").ok(),
            browser: env::var("WEBHARNESS_BROWSER").ok(),
            resolution: env::var("WEBHARNESS_RESOLUTION").ok(),
            headless,
            hub: env::var("WEBHARNESS_HUB").ok(),
            hub_url: env::var("WEBHARNESS_HUB_URL").ok(),
            webdriver_url: env::var("WEBHARNESS_WEBDRIVER_URL").ok(),
            download_dir: env::var("WEBHARNESS_DOWNLOAD_DIR").ok(),
        })
    }
}

/// Per-environment record from the environment data file
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentRecord {
    pub base_url: String,
}

/// Environment name to record mapping
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Environments(pub HashMap<String, EnvironmentRecord>);

impl Environments {
    /// Load the environment data file; missing or unparseable is a startup fault
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read environment data file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse environment data file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Look up an environment by name; an unknown name is a startup fault
    pub fn get(&self, name: &str) -> Result<&EnvironmentRecord> {
        self.0.get(name).ok_or_else(|| {
            Error::configuration(format!("No environment record for: {}", name))
        })
    }
}

/// Immutable test settings, resolved once at process start and threaded
/// explicitly into the factory, façade, and harness
#[derive(Debug, Clone)]
pub struct Settings {
    /// Selected environment name
    pub environment: String,

    /// Base URL of the selected environment
    pub base_url: String,

    /// Browser to run tests against
    pub browser: BrowserKind,

    /// Headless mode flag
    pub headless: bool,

    /// Browser window resolution
    pub resolution: Resolution,

    /// Hub kind (local drivers or Selenium Grid)
    pub hub: HubKind,

    /// Grid hub endpoint
    pub hub_url: String,

    /// Explicit WebDriver endpoint; when unset, the per-browser local default
    /// applies for local runs
    pub webdriver_url: Option<String>,

    /// Directory polled for downloaded files
    pub download_dir: PathBuf,

    /// Element visibility wait timeout in seconds
    pub wait_element_secs: u64,

    /// Implicit wait timeout in seconds
    pub implicit_wait_secs: u64,

    /// Page load timeout in seconds
    pub page_load_timeout_secs: u64,
}

impl Settings {
    /// Resolve settings from the default file locations and process
    /// environment. Invoked once at process entry.
    pub fn load() -> Result<Self> {
        let file = SettingsLayer::from_file(Path::new(SETTINGS_FILE))?;
        let overrides = SettingsLayer::from_env()?;
        let environments = Environments::from_file(Path::new(ENVIRONMENTS_FILE))?;
        Self::resolve(overrides, file, &environments)
    }

    /// Resolve settings from explicit layers: override > file > default
    pub fn resolve(
        overrides: SettingsLayer,
        file: SettingsLayer,
        environments: &Environments,
    ) -> Result<Self> {
        let environment = overrides
            .environment
            .or(file.environment)
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let browser = match overrides.browser.or(file.browser) {
            Some(raw) => raw.parse()?,
            None => BrowserKind::Chrome,
        };

        let resolution = match overrides.resolution.or(file.resolution) {
            Some(raw) => raw.parse()?,
            None => Resolution::default(),
        };

        let headless = overrides.headless.or(file.headless).unwrap_or(false);

        let hub = match overrides.hub.or(file.hub) {
            Some(raw) => raw.parse()?,
            None => HubKind::None,
        };

        let hub_url = overrides
            .hub_url
            .or(file.hub_url)
            .unwrap_or_else(|| GRID_HUB_URL.to_string());

        let webdriver_url = overrides.webdriver_url.or(file.webdriver_url);

        let download_dir = overrides
            .download_dir
            .or(file.download_dir)
            .map(PathBuf::from)
            .unwrap_or_else(default_download_dir);

        let base_url = environments.get(&environment)?.base_url.clone();

        Ok(Self {
            environment,
            base_url,
            browser,
            headless,
            resolution,
            hub,
            hub_url,
            webdriver_url,
            download_dir,
            wait_element_secs: WAIT_ELEMENT_SECS,
            implicit_wait_secs: IMPLICIT_WAIT_SECS,
            page_load_timeout_secs: PAGE_LOAD_TIMEOUT_SECS,
        })
    }

    /// Endpoint a session for `browser` should be constructed against
    pub fn endpoint_for(&self, browser: BrowserKind) -> String {
        match self.hub {
            HubKind::Grid => self.hub_url.clone(),
            HubKind::None => self
                .webdriver_url
                .clone()
                .unwrap_or_else(|| browser.local_endpoint().to_string()),
        }
    }
}

fn default_download_dir() -> PathBuf {
    env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("."))
}
