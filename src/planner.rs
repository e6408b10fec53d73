//! The trip planner facade.
//!
//! Ties the dialogue state machine, the search orchestrator, and the
//! summarizer together into the flow the surrounding product consumes:
//! advance the conversation until the request is ready, run the flight and
//! lodging searches concurrently, then summarize.
//!
//! The summarizer is best-effort. When it fails, or when a search task
//! fails, the recommendation still carries the raw task snapshots; the
//! caller presents those instead of the missing prose.

use tracing::warn;

use crate::dialogue::{DialogueState, Outcome};
use crate::error::ValidationError;
use crate::format::{lodging_to_markdown, round_trip_to_markdown};
use crate::orchestrator::SearchOrchestrator;
use crate::traits::extractor::Extractor;
use crate::traits::searcher::{FlightSearcher, LodgingSearcher};
use crate::traits::summarizer::{Summarizer, SummaryRequest, TripMetadata};
use crate::types::conversation::ConversationTurn;
use crate::types::request::TripRequest;
use crate::types::task::{SearchCategory, TaskData, TaskId, TaskSnapshot, TaskStatus};

/// Outcome of one full search-and-summarize cycle.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// The summarizer's prose, when it succeeded.
    pub summary: Option<String>,
    /// Terminal flight task snapshot (completed or failed).
    pub flights: TaskSnapshot,
    /// Terminal lodging task snapshot (completed or failed).
    pub lodging: TaskSnapshot,
}

/// One trip-planning session: a dialogue plus its searches.
///
/// Create a fresh planner per trip; the dialogue state (including the
/// one-shot optional-fields pass) belongs to a single conversation.
pub struct TripPlanner<X, F, L, S> {
    extractor: X,
    summarizer: S,
    orchestrator: SearchOrchestrator<F, L>,
    dialogue: DialogueState,
}

impl<X, F, L, S> TripPlanner<X, F, L, S>
where
    X: Extractor,
    F: FlightSearcher + 'static,
    L: LodgingSearcher + 'static,
    S: Summarizer,
{
    /// Create a planner from its four collaborators.
    pub fn new(extractor: X, flights: F, lodging: L, summarizer: S) -> Self {
        Self {
            extractor,
            summarizer,
            orchestrator: SearchOrchestrator::new(flights, lodging),
            dialogue: DialogueState::new(),
        }
    }

    /// Advance the conversation by one turn.
    pub async fn advance_conversation(&mut self, history: &[ConversationTurn]) -> Outcome {
        self.dialogue.advance(&self.extractor, history).await
    }

    /// Schedule one category search for a completed request.
    pub fn submit_search(
        &self,
        category: SearchCategory,
        request: &TripRequest,
    ) -> Result<TaskId, ValidationError> {
        self.orchestrator.submit(category, request)
    }

    /// Snapshot a search task; `None` for unknown ids.
    pub fn poll_search(&self, id: &TaskId) -> Option<TaskSnapshot> {
        self.orchestrator.poll(id)
    }

    /// The underlying orchestrator, for callers that poll directly.
    pub fn orchestrator(&self) -> &SearchOrchestrator<F, L> {
        &self.orchestrator
    }

    /// Run the full search-and-summarize cycle for a completed request.
    ///
    /// Both searches run concurrently; the summarizer is not invoked until
    /// each has reached a terminal state. Failed searches become error
    /// notes in the summary input rather than aborting the cycle.
    pub async fn recommend(&self, request: &TripRequest) -> Result<Recommendation, ValidationError> {
        let flight_id = self.orchestrator.submit(SearchCategory::Flights, request)?;
        let lodging_id = self.orchestrator.submit(SearchCategory::Lodging, request)?;

        let flights = self.await_task(flight_id, SearchCategory::Flights).await;
        let lodging = self.await_task(lodging_id, SearchCategory::Lodging).await;

        let summary_request = SummaryRequest {
            flights: render_flights(&flights, request),
            lodging: render_lodging(&lodging),
            metadata: TripMetadata::from_request(request),
        };

        let summary = match self.summarizer.summarize(&summary_request).await {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, "summarizer failed; returning raw ranked data");
                None
            }
        };

        Ok(Recommendation {
            summary,
            flights,
            lodging,
        })
    }

    async fn await_task(&self, id: TaskId, category: SearchCategory) -> TaskSnapshot {
        match self.orchestrator.wait_terminal(&id).await {
            Some(snapshot) => snapshot,
            // Unreachable for ids this planner just allocated, but a lost
            // task must not hang the cycle.
            None => TaskSnapshot {
                id,
                category,
                status: TaskStatus::Failed,
                data: None,
                error: Some("task not found".to_string()),
            },
        }
    }
}

fn render_flights(snapshot: &TaskSnapshot, request: &TripRequest) -> String {
    match (&snapshot.data, &snapshot.error) {
        (Some(TaskData::Flights(itineraries)), _) => round_trip_to_markdown(
            &itineraries.outbound,
            &itineraries.inbound,
            request.start_date,
            request.end_date,
        ),
        (_, Some(error)) => format!(
            "Flight search data not available.\n\n*Note: Encountered an error during flight search: {}*",
            error
        ),
        _ => "Flight search data not available.".to_string(),
    }
}

fn render_lodging(snapshot: &TaskSnapshot) -> String {
    match (&snapshot.data, &snapshot.error) {
        (Some(TaskData::Lodging { options }), _) => lodging_to_markdown(options),
        (_, Some(error)) => format!(
            "Accommodation search data not available.\n\n*Note: Encountered an error during hotel search: {}*",
            error
        ),
        _ => "Accommodation search data not available.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        sample_candidate, sample_trip_request, MockExtractor, MockFlightSearcher,
        MockLodgingSearcher, MockSummarizer,
    };
    use crate::types::lodging::LodgingOption;
    use chrono::NaiveDate;

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn planner_with(
        flights: MockFlightSearcher,
        lodging: MockLodgingSearcher,
        summarizer: MockSummarizer,
    ) -> TripPlanner<MockExtractor, MockFlightSearcher, MockLodgingSearcher, MockSummarizer> {
        TripPlanner::new(
            MockExtractor::always(sample_trip_request()),
            flights,
            lodging,
            summarizer,
        )
    }

    #[tokio::test]
    async fn test_recommend_summarizes_both_categories() {
        let flights = MockFlightSearcher::new()
            .with_candidates(may(10), vec![sample_candidate(1, 120, 95)])
            .with_candidates(may(15), vec![sample_candidate(2, 140, 100)]);
        let lodging =
            MockLodgingSearcher::new().with_options(vec![LodgingOption::new("Hotel du Nord")]);
        let summarizer = MockSummarizer::new().with_response("Take the morning KLM flight.");

        let planner = planner_with(flights, lodging, summarizer);
        let recommendation = planner.recommend(&sample_trip_request()).await.unwrap();

        assert_eq!(
            recommendation.summary.as_deref(),
            Some("Take the morning KLM flight.")
        );
        assert_eq!(recommendation.flights.status, TaskStatus::Completed);
        assert_eq!(recommendation.lodging.status, TaskStatus::Completed);

        // The summarizer saw rendered results and trip metadata.
        let calls = planner.summarizer.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].flights.contains("120 EUR"));
        assert!(calls[0].lodging.contains("Hotel du Nord"));
        assert_eq!(calls[0].metadata.destination.as_deref(), Some("Paris"));
    }

    #[tokio::test]
    async fn test_summarizer_failure_degrades_to_raw_data() {
        let flights = MockFlightSearcher::new()
            .with_candidates(may(10), vec![sample_candidate(1, 120, 95)]);
        let planner = planner_with(flights, MockLodgingSearcher::new(), MockSummarizer::new());

        let recommendation = planner.recommend(&sample_trip_request()).await.unwrap();

        assert!(recommendation.summary.is_none());
        assert_eq!(recommendation.flights.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_failed_search_becomes_error_note_not_abort() {
        let flights = MockFlightSearcher::failing("provider down");
        let lodging =
            MockLodgingSearcher::new().with_options(vec![LodgingOption::new("Hotel du Nord")]);
        let summarizer = MockSummarizer::new().with_response("Stay at Hotel du Nord.");

        let planner = planner_with(flights, lodging, summarizer);
        let recommendation = planner.recommend(&sample_trip_request()).await.unwrap();

        assert_eq!(recommendation.flights.status, TaskStatus::Failed);
        assert_eq!(recommendation.lodging.status, TaskStatus::Completed);
        assert!(recommendation.summary.is_some());

        let calls = planner.summarizer.calls();
        assert!(calls[0].flights.contains("error during flight search"));
        assert!(calls[0].flights.contains("provider down"));
    }

    #[tokio::test]
    async fn test_recommend_rejects_invalid_request_before_searching() {
        let planner = planner_with(
            MockFlightSearcher::new(),
            MockLodgingSearcher::new(),
            MockSummarizer::new().with_response("unused"),
        );

        let mut request = sample_trip_request();
        request.end_date = Some(may(5));

        let err = planner.recommend(&request).await.unwrap_err();
        assert!(matches!(err, ValidationError::DateOrder { .. }));
        assert_eq!(planner.orchestrator().task_count(), 0);
        assert!(planner.summarizer.calls().is_empty());
    }
}
