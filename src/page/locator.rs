//! Element locators
//!
//! A locator is an immutable strategy + value pair describing how to find a
//! page element. Page objects declare them statically; the session layer
//! converts them to the WebDriver selector at the call boundary.

use std::borrow::Cow;
use std::fmt;
use thirtyfour::By;

/// Element location strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Id,
    Name,
    Css,
    XPath,
    ClassName,
    LinkText,
}

impl Strategy {
    fn as_str(&self) -> &'static str {
        match self {
            Strategy::Id => "id",
            Strategy::Name => "name",
            Strategy::Css => "css",
            Strategy::XPath => "xpath",
            Strategy::ClassName => "class",
            Strategy::LinkText => "link",
        }
    }
}

/// Strategy + value pair identifying a page element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub strategy: Strategy,
    pub value: Cow<'static, str>,
}

impl Locator {
    /// Locator with a runtime-built value (e.g. an XPath formatted around data)
    pub fn new(strategy: Strategy, value: impl Into<Cow<'static, str>>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// Locate by element id
    pub const fn id(value: &'static str) -> Self {
        Self {
            strategy: Strategy::Id,
            value: Cow::Borrowed(value),
        }
    }

    /// Locate by name attribute
    pub const fn name(value: &'static str) -> Self {
        Self {
            strategy: Strategy::Name,
            value: Cow::Borrowed(value),
        }
    }

    /// Locate by CSS selector
    pub const fn css(value: &'static str) -> Self {
        Self {
            strategy: Strategy::Css,
            value: Cow::Borrowed(value),
        }
    }

    /// Locate by XPath expression
    pub const fn xpath(value: &'static str) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: Cow::Borrowed(value),
        }
    }

    /// Locate by class name
    pub const fn class_name(value: &'static str) -> Self {
        Self {
            strategy: Strategy::ClassName,
            value: Cow::Borrowed(value),
        }
    }

    /// Locate by exact link text
    pub const fn link_text(value: &'static str) -> Self {
        Self {
            strategy: Strategy::LinkText,
            value: Cow::Borrowed(value),
        }
    }

    /// Convert to the WebDriver selector
    pub fn to_by(&self) -> By {
        match self.strategy {
            Strategy::Id => By::Id(self.value.as_ref()),
            Strategy::Name => By::Name(self.value.as_ref()),
            Strategy::Css => By::Css(self.value.as_ref()),
            Strategy::XPath => By::XPath(self.value.as_ref()),
            Strategy::ClassName => By::ClassName(self.value.as_ref()),
            Strategy::LinkText => By::LinkText(self.value.as_ref()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.as_str(), self.value)
    }
}
