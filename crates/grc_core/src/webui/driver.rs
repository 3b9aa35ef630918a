//! Browser automation boundary.
//!
//! # Responsibility
//! - Define the minimal browser session contract the services drive.
//! - Carry browser-layer failures unchanged to callers.
//!
//! # Invariants
//! - Implementations never retry element lookups; a missing element is an
//!   `ElementNotFound` error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DriverResult<T> = Result<T, DriverError>;

/// Failure categories reported by the browser layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverErrorKind {
    ElementNotFound,
    Navigation,
    StaleElement,
    Other,
}

impl DriverErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ElementNotFound => "element_not_found",
            Self::Navigation => "navigation",
            Self::StaleElement => "stale_element",
            Self::Other => "other",
        }
    }
}

/// Error raised by the browser automation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    pub kind: DriverErrorKind,
    pub message: String,
}

impl DriverError {
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::ElementNotFound, locator)
    }
}

impl Display for DriverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl Error for DriverError {}

/// One synchronous browser session.
pub trait Browser {
    /// Navigates with a regular page load.
    fn open_url(&mut self, url: &str) -> DriverResult<()>;
    /// Navigates by assigning `window.location` from script.
    fn open_url_via_js(&mut self, url: &str) -> DriverResult<()>;
    fn refresh(&mut self) -> DriverResult<()>;
    fn current_url(&mut self) -> DriverResult<String>;
    /// Text of the currently shown alert/flash message, if any.
    fn alert_text(&mut self) -> DriverResult<Option<String>>;
    fn is_element_visible(&mut self, css: &str) -> DriverResult<bool>;
    /// Blocks until pending page scripts settle.
    fn wait_for_js(&mut self) -> DriverResult<()>;
}
