use crate::model::object_type::ObjectType;
use crate::scope::ScopeError;
use crate::webui::driver::DriverError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub type WebUiResult<T> = Result<T, WebUiError>;

/// Failures of web-UI service operations.
#[derive(Debug)]
pub enum WebUiError {
    /// Raised by the browser layer, passed through unchanged.
    Driver(DriverError),
    Timeout { what: String, waited: Duration },
    /// Export payload declares another object type; carries the payload.
    CsvFormat { expected: ObjectType, payload: String },
    Scope(ScopeError),
    /// Navigation needs an object URL that the entity does not carry.
    MissingObjectUrl { obj_type: ObjectType, title: String },
    UnsupportedOperation {
        operation: &'static str,
        obj_type: ObjectType,
    },
    /// The "Add tab" dropdown does not list the requested tab.
    TabNotOffered { tab: String, offered: Vec<String> },
    Io(std::io::Error),
    Csv(csv::Error),
}

impl Display for WebUiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Driver(err) => write!(f, "{err}"),
            Self::Timeout { what, waited } => {
                write!(f, "timed out after {}ms waiting for {what}", waited.as_millis())
            }
            Self::CsvFormat { expected, payload } => write!(
                f,
                "CSV export does not contain {expected} objects: {payload}"
            ),
            Self::Scope(err) => write!(f, "{err}"),
            Self::MissingObjectUrl { obj_type, title } => {
                write!(f, "{obj_type} `{title}` has no object URL")
            }
            Self::UnsupportedOperation {
                operation,
                obj_type,
            } => write!(f, "`{operation}` is not supported for {obj_type} objects"),
            Self::TabNotOffered { tab, offered } => {
                write!(f, "tab `{tab}` is not offered by \"Add tab\"; offered: {offered:?}")
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WebUiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Driver(err) => Some(err),
            Self::Scope(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Timeout { .. }
            | Self::CsvFormat { .. }
            | Self::MissingObjectUrl { .. }
            | Self::UnsupportedOperation { .. }
            | Self::TabNotOffered { .. } => None,
        }
    }
}

impl From<DriverError> for WebUiError {
    fn from(value: DriverError) -> Self {
        Self::Driver(value)
    }
}

impl From<ScopeError> for WebUiError {
    fn from(value: ScopeError) -> Self {
        Self::Scope(value)
    }
}

impl From<std::io::Error> for WebUiError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for WebUiError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
