//! Crate-wide error types.
//!
//! Server-reported failures arrive as an exception envelope inside the JSON
//! body (`relatedHTTPCode`, `exceptionErrorMessage`, ...). They are carried
//! in an [`ExceptionReport`] and sorted into a small set of variants so
//! callers can match on the kind of failure without parsing messages.

use std::fmt;

use thiserror::Error;

pub type Result<T, E = EgeriaError> = std::result::Result<T, E>;

/// Details of an exception reported by the Egeria platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionReport {
    pub related_http_code: u16,
    pub class_name: Option<String>,
    pub message_id: Option<String>,
    pub message: String,
    pub system_action: Option<String>,
    pub user_action: Option<String>,
}

impl fmt::Display for ExceptionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.related_http_code)?;
        if let Some(id) = &self.message_id {
            write!(f, " {id}")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Debug, Error)]
pub enum EgeriaError {
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("not authorized: {0}")]
    NotAuthorized(ExceptionReport),

    #[error("not found: {0}")]
    NotFound(ExceptionReport),

    #[error("server exception: {0}")]
    Api(ExceptionReport),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EgeriaError {
    pub fn invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { parameter: parameter.into(), reason: reason.into() }
    }

    /// The server-side report, when the error came from the platform.
    pub fn report(&self) -> Option<&ExceptionReport> {
        match self {
            Self::NotAuthorized(r) | Self::NotFound(r) | Self::Api(r) => Some(r),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EgeriaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Connection(e.to_string())
        }
    }
}
