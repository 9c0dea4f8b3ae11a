//! Error types for docnav.

use std::io;
use thiserror::Error;

/// Result type alias for docnav operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can surface from a list or extract request.
///
/// Sniffing probes never produce these; they degrade to a format default
/// instead. Only the primary document fetch and parse are fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// The request carried no source URL.
    #[error("missing required parameter: url")]
    MissingUrl,

    /// The source URL is not absolute or lacks a host.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Network failure or timeout while fetching a document.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// The bytes do not form a readable word-processor package.
    #[error("failed to parse package document: {0}")]
    PackageParse(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be read or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// A blocking worker panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Task(String),
}

impl Error {
    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MissingUrl | Error::InvalidUrl(_) => 400,
            _ => 500,
        }
    }

    pub(crate) fn fetch(url: impl ToString, reason: impl ToString) -> Self {
        Error::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<docx_rs::ReaderError> for Error {
    fn from(err: docx_rs::ReaderError) -> Self {
        Error::PackageParse(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
