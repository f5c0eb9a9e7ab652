use isg_http::HttpError;
use thiserror::Error;

/// A page did not contain the structure an extractor looks for.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no {pattern} match for '{key}'")]
    Missing { pattern: &'static str, key: String },

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failures of the read and write paths.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The device could not be reached or answered with a non-success status.
    #[error("device request failed: {0}")]
    Transport(#[from] HttpError),

    /// A page was fetched but its layout did not match.
    #[error("unexpected page layout: {0}")]
    Extraction(#[from] ExtractError),

    /// The value cannot be embedded in the device's hand-built JSON payload.
    #[error("{field} {value:?} contains characters the device payload cannot carry")]
    InvalidPayload { field: &'static str, value: String },

    /// The key is not one of the readable settings.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
}
