//! Unified error types for webharness

use std::time::Duration;
use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for webharness
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebDriver protocol errors
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error (startup fault, fatal before any test runs)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Requested browser kind is not one of the supported set
    #[error("Unsupported browser type: {requested}. Supported types: chrome, firefox, edge")]
    UnsupportedBrowser {
        /// The rejected browser-type string
        requested: String,
    },

    /// Session construction failed (driver endpoint unreachable, bad capabilities)
    #[error("Failed to initialize WebDriver session for {browser}")]
    DriverInit {
        /// Browser kind the session was requested for
        browser: String,
        #[source]
        source: Box<Error>,
    },

    /// No session exists for the calling execution context
    #[error("WebDriver not initialized for context: {0}")]
    NotInitialized(String),

    /// Navigation failed
    #[error("Navigation failed to {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// Element did not become visible within the wait timeout
    #[error("Element not visible within {timeout:?}: {locator}")]
    ElementNotVisible { locator: String, timeout: Duration },

    /// Element did not become clickable within the wait timeout
    #[error("Element not clickable within {timeout:?}: {locator}")]
    ElementNotClickable { locator: String, timeout: Duration },

    /// Element could not be located at all
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Generic bounded-wait expiry
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Downloaded file did not appear within the wait timeout
    #[error("File not found within {timeout:?}: {path}")]
    FileWait { path: String, timeout: Duration },

    /// Expectation mismatch raised by a verification, not an infrastructure fault.
    /// Keeps the underlying fault as `source` when one caused the failure.
    #[error("Assertion failed: {message}")]
    Assertion {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new unsupported-browser error
    pub fn unsupported_browser<S: Into<String>>(requested: S) -> Self {
        Error::UnsupportedBrowser {
            requested: requested.into(),
        }
    }

    /// Wrap a session construction failure, preserving the cause
    pub fn driver_init<S: Into<String>>(browser: S, source: Error) -> Self {
        Error::DriverInit {
            browser: browser.into(),
            source: Box::new(source),
        }
    }

    /// Create a new not-initialized error
    pub fn not_initialized<S: Into<String>>(context: S) -> Self {
        Error::NotInitialized(context.into())
    }

    /// Create a new navigation error
    pub fn navigation<S: Into<String>, R: Into<String>>(url: S, reason: R) -> Self {
        Error::Navigation {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a new element not found error
    pub fn element_not_found<S: Into<String>>(locator: S) -> Self {
        Error::ElementNotFound(locator.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a bare assertion failure (expectation mismatch)
    pub fn assertion<S: Into<String>>(message: S) -> Self {
        Error::Assertion {
            message: message.into(),
            source: None,
        }
    }

    /// Create an assertion failure caused by an underlying fault
    pub fn assertion_caused_by<S: Into<String>>(message: S, cause: Error) -> Self {
        Error::Assertion {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// True when the error represents an expectation mismatch rather than an
    /// infrastructure fault
    pub fn is_assertion(&self) -> bool {
        matches!(self, Error::Assertion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_browser_names_allowed_set() {
        let err = Error::unsupported_browser("safari");
        let msg = err.to_string();
        assert!(msg.contains("safari"));
        assert!(msg.contains("chrome, firefox, edge"));
    }

    #[test]
    fn driver_init_preserves_cause() {
        let cause = Error::timeout("endpoint unreachable");
        let err = Error::driver_init("chrome", cause);
        assert!(err.to_string().contains("chrome"));

        let source = std::error::Error::source(&err).expect("cause should be preserved");
        assert!(source.to_string().contains("endpoint unreachable"));
    }

    #[test]
    fn assertion_keeps_underlying_fault_kind() {
        let wait_fault = Error::ElementNotVisible {
            locator: "id=missing".to_string(),
            timeout: Duration::from_secs(5),
        };
        let err = Error::assertion_caused_by("banner should show", wait_fault);

        assert!(err.is_assertion());
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert!(source.to_string().contains("not visible"));
    }

    #[test]
    fn bare_assertion_has_no_source() {
        let err = Error::assertion("values differ");
        assert!(err.is_assertion());
        assert!(std::error::Error::source(&err).is_none());
    }
}
