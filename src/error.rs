//! Error types for a single flight search.

use thiserror::Error;

/// Everything that can stop a search from producing flight cards.
///
/// The validation variants are raised before any request is sent; the rest
/// come from the fetcher.
#[derive(Error, Debug)]
pub enum SearchError {
    /// One of origin, destination or departure date was left blank.
    #[error("Please fill in origin, destination, and departure date.")]
    MissingFields,

    /// A date field did not parse as `YYYY-MM-DD`.
    #[error("Invalid {field}: '{value}' (expected YYYY-MM-DD).")]
    InvalidDate { field: &'static str, value: String },

    /// The configured base URL could not be turned into a request URL.
    #[error("Invalid base URL '{0}'")]
    InvalidUrl(String),

    /// Transport level failure (DNS, refused connection, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Search endpoint returned status {0}")]
    Status(u16),

    /// The body was not the JSON object we expect.
    #[error("Malformed search response: {0}")]
    Decode(String),
}
