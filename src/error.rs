//! Typed errors for the trip-planning core.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each failure domain has its
//! own enum so a failed flight search can never be confused with a failed
//! conversation turn.

use thiserror::Error;

use crate::catalog::FieldKey;

/// Errors from the extraction collaborator (conversation -> structured record).
///
/// These are recoverable at the dialogue layer: the user is asked to restate
/// their request. The raw cause is logged, never shown to the user.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The underlying NLU provider failed (network, quota, model error).
    #[error("extraction provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned output that does not fit the expected structure.
    #[error("malformed extraction output: {reason}")]
    MalformedOutput { reason: String },

    /// JSON parsing of structured provider output failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Errors from a search collaborator (flights or lodging).
///
/// Recorded on the owning task as `failed` and surfaced via `poll`.
/// An empty result list is success, not an error.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The underlying search provider failed (network, scrape, API).
    #[error("search provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider is temporarily unavailable.
    #[error("search provider unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Validation failures on a trip request, raised before any search is
/// submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Return date precedes departure date.
    #[error("end date {end} is before start date {start}")]
    DateOrder { start: chrono::NaiveDate, end: chrono::NaiveDate },

    /// A required field was absent from the request.
    #[error("missing required field: {field}")]
    MissingField { field: FieldKey },

    /// Guest count must be a positive integer.
    #[error("invalid guest count: {count}")]
    InvalidGuestCount { count: u32 },
}

/// Errors from the summarizer collaborator.
///
/// Best-effort only: callers degrade to presenting raw ranked data.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The underlying language model failed to produce a summary.
    #[error("summarizer provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}
