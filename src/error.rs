//! Typed errors for the review analyzer library.

use thiserror::Error;

/// Errors raised while turning scraped strings into typed values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Rating text is not of the form `"X.Y out of 5 stars"`
    #[error("malformed rating {text:?}: {reason}")]
    Rating { text: String, reason: String },
}

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Browser could not be launched or driven
    #[error("browser error: {0}")]
    Browser(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
