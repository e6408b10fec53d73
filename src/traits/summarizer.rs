//! Summarizer collaborator trait.
//!
//! The summarizer turns ranked search results plus trip metadata into a
//! human-readable recommendation. It is best-effort: when it fails, the
//! caller presents the raw ranked data instead of aborting the flow.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SummarizeError;

/// Trip metadata handed to the summarizer alongside search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripMetadata {
    /// Where the trip starts (city name, falling back to airport code).
    pub origin: Option<String>,
    /// Destination city.
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub num_guests: Option<u32>,
    /// Flattened preference description (see [`crate::format`]).
    pub preferences: String,
}

impl TripMetadata {
    /// Pull summary-relevant metadata out of a trip request.
    pub fn from_request(request: &crate::types::request::TripRequest) -> Self {
        Self {
            origin: request
                .origin_city_name
                .clone()
                .or_else(|| request.origin_airport_code.clone()),
            destination: request.destination_city_name.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            num_guests: request.num_guests,
            preferences: crate::format::format_preferences(request),
        }
    }
}

/// Everything the summarizer needs for one recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Ranked flight options rendered as markdown, including error notes
    /// for failed searches.
    pub flights: String,
    /// Lodging options rendered as markdown, including error notes.
    pub lodging: String,
    /// Trip metadata.
    pub metadata: TripMetadata,
}

/// Produces the final recommendation text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize ranked results into a recommendation.
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, SummarizeError>;
}
