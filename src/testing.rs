//! Testing utilities including mock collaborators.
//!
//! These are useful for testing applications that use the planning core
//! without making real LLM or network calls. All mocks are deterministic
//! and configurable through builder methods.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use crate::error::{ExtractionError, SearchError, SummarizeError};
use crate::traits::extractor::Extractor;
use crate::traits::searcher::{FlightCriteria, FlightSearcher, LodgingCriteria, LodgingSearcher};
use crate::traits::summarizer::{Summarizer, SummaryRequest};
use crate::types::candidate::{Candidate, FlightEndpoint, Price};
use crate::types::conversation::ConversationTurn;
use crate::types::lodging::LodgingOption;
use crate::types::request::TripRequest;

/// A scripted extraction collaborator.
///
/// Responses are consumed in order; once the script is exhausted the
/// fallback (if any) repeats forever. An empty mock fails every call.
#[derive(Default)]
pub struct MockExtractor {
    script: Mutex<VecDeque<Result<TripRequest, String>>>,
    fallback: Option<TripRequest>,
}

impl MockExtractor {
    /// Create an empty mock; every call fails until scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that returns the same request on every call.
    pub fn always(request: TripRequest) -> Self {
        Self {
            fallback: Some(request),
            ..Default::default()
        }
    }

    /// Queue a successful extraction.
    pub fn with_result(self, request: TripRequest) -> Self {
        self.script.lock().unwrap().push_back(Ok(request));
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(reason.into()));
        self
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, _history: &[ConversationTurn]) -> Result<TripRequest, ExtractionError> {
        if let Some(step) = self.script.lock().unwrap().pop_front() {
            return step.map_err(|reason| ExtractionError::MalformedOutput { reason });
        }
        self.fallback
            .clone()
            .ok_or_else(|| ExtractionError::MalformedOutput {
                reason: "mock extractor script exhausted".to_string(),
            })
    }
}

/// A flight search collaborator with canned candidates per date.
#[derive(Default)]
pub struct MockFlightSearcher {
    by_date: RwLock<HashMap<NaiveDate, Vec<Candidate>>>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<NaiveDate>>>,
}

impl MockFlightSearcher {
    /// Create a mock that returns no candidates for any date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose every search fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Add canned candidates for a date.
    pub fn with_candidates(self, date: NaiveDate, candidates: Vec<Candidate>) -> Self {
        self.by_date.write().unwrap().insert(date, candidates);
        self
    }

    /// Sleep this long before answering, to widen race windows in tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Dates searched so far.
    pub fn calls(&self) -> Vec<NaiveDate> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl FlightSearcher for MockFlightSearcher {
    async fn search(
        &self,
        _criteria: &FlightCriteria,
        date: NaiveDate,
    ) -> Result<Vec<Candidate>, SearchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.write().unwrap().push(date);
        if let Some(reason) = &self.failure {
            return Err(SearchError::Unavailable {
                reason: reason.clone(),
            });
        }
        Ok(self
            .by_date
            .read()
            .unwrap()
            .get(&date)
            .cloned()
            .unwrap_or_default())
    }
}

/// A lodging search collaborator with one canned option list.
#[derive(Default)]
pub struct MockLodgingSearcher {
    options: Vec<LodgingOption>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<LodgingCriteria>>>,
}

impl MockLodgingSearcher {
    /// Create a mock that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose every search fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Set the canned options.
    pub fn with_options(mut self, options: Vec<LodgingOption>) -> Self {
        self.options = options;
        self
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Criteria searched so far.
    pub fn calls(&self) -> Vec<LodgingCriteria> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl LodgingSearcher for MockLodgingSearcher {
    async fn search(&self, criteria: &LodgingCriteria) -> Result<Vec<LodgingOption>, SearchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.write().unwrap().push(criteria.clone());
        if let Some(reason) = &self.failure {
            return Err(SearchError::Unavailable {
                reason: reason.clone(),
            });
        }
        Ok(self.options.clone())
    }
}

/// A summarizer with a fixed response, or none (every call fails).
#[derive(Default)]
pub struct MockSummarizer {
    response: Option<String>,
    calls: Arc<RwLock<Vec<SummaryRequest>>>,
}

impl MockSummarizer {
    /// Create a failing summarizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizer that always answers with this text.
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.response = Some(text.into());
        self
    }

    /// Requests summarized so far.
    pub fn calls(&self) -> Vec<SummaryRequest> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, SummarizeError> {
        self.calls.write().unwrap().push(request.clone());
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(SummarizeError::Provider(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "mock summarizer has no response",
            )))),
        }
    }
}

/// A trip request with every required field filled, for tests.
pub fn sample_trip_request() -> TripRequest {
    TripRequest {
        origin_airport_code: Some("AMS".to_string()),
        destination_airport_code: Some("CDG".to_string()),
        origin_city_name: Some("Amsterdam".to_string()),
        destination_city_name: Some("Paris".to_string()),
        num_guests: Some(2),
        start_date: NaiveDate::from_ymd_opt(2025, 5, 10),
        end_date: NaiveDate::from_ymd_opt(2025, 5, 15),
        ..Default::default()
    }
}

/// A viable flight candidate with the given price and duration, made
/// unique by `tag`.
pub fn sample_candidate(tag: u32, price: u64, duration_minutes: u32) -> Candidate {
    Candidate {
        departure: FlightEndpoint {
            date: NaiveDate::from_ymd_opt(2025, 5, 10),
            time: Some(format!("{}:00AM", tag)),
            location: Some("Schiphol (AMS)".to_string()),
        },
        arrival: FlightEndpoint {
            date: NaiveDate::from_ymd_opt(2025, 5, 10),
            time: Some("1:00PM".to_string()),
            location: Some("Charles de Gaulle (CDG)".to_string()),
        },
        price: Some(Price::new(price, "EUR")),
        duration_minutes: Some(duration_minutes),
        stop_count: Some(0),
        stop_locations: vec![],
        carriers: vec!["KLM".to_string()],
    }
}
