//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, rejected site records, unknown templates, parse failures of persisted
//! site lists, terrain engine failures, IO, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid site record #{index}: {reason}")]
    InvalidSite { index: usize, reason: String },

    #[error("unknown template '{name}'")]
    UnknownTemplate { name: String },

    #[cfg(feature = "serde")]
    #[error("malformed site list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("terrain synthesis failed: {0}")]
    Terrain(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid_site(index: usize, reason: impl Into<String>) -> Self {
        Error::InvalidSite {
            index,
            reason: reason.into(),
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
