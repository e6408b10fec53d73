//! Conversational Trip-Planning Core
//!
//! A library for planning a trip through multi-turn conversation: it
//! incrementally collects required and optional trip parameters, schedules
//! flight and lodging searches as concurrent tasks, and narrows noisy
//! results to a bounded best-of set before summarization.
//!
//! # Design Philosophy
//!
//! **"The core decides, collaborators do"**
//!
//! - Slot filling and ranking are pure, deterministic state logic
//! - Natural-language understanding, search, and prose generation live
//!   behind narrow collaborator traits
//! - No field is ever invented: a value exists only if the user said it
//! - The cheapest options are never ranked out of a recommendation
//!
//! # Usage
//!
//! ```rust,ignore
//! use trip_planner::{ConversationTurn, Outcome, SearchCategory, TripPlanner};
//! use trip_planner::testing::{MockExtractor, MockFlightSearcher, MockLodgingSearcher, MockSummarizer};
//!
//! let mut planner = TripPlanner::new(extractor, flights, lodging, summarizer);
//!
//! // Drive the conversation until the request is complete enough.
//! let history = vec![ConversationTurn::user("2 of us, AMS to Paris, May 10-15")];
//! match planner.advance_conversation(&history).await {
//!     Outcome::AskUser(question) => println!("{question}"),
//!     Outcome::Ready(request) => {
//!         let recommendation = planner.recommend(&request).await?;
//!         println!("{}", recommendation.summary.unwrap_or_default());
//!     }
//!     Outcome::Error(message) => println!("{message}"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`dialogue`] - Slot-filling conversation state machine
//! - [`catalog`] - Required/optional field catalog and classification
//! - [`ranking`] - Candidate deduplication and bounded best-of selection
//! - [`parse`] - Raw flight description parsing
//! - [`orchestrator`] - Concurrent search task scheduling and polling
//! - [`planner`] - Facade combining dialogue, search, and summarization
//! - [`traits`] - Collaborator abstractions (extractor, searchers, summarizer)
//! - [`testing`] - Mock collaborators for testing

pub mod catalog;
pub mod dialogue;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod parse;
pub mod planner;
pub mod ranking;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractionError, SearchError, SummarizeError, ValidationError};

pub use catalog::{FieldCatalog, FieldKey, FieldKind, FieldRequirement, MissingFields};
pub use dialogue::{DialogueState, Outcome};
pub use orchestrator::SearchOrchestrator;
pub use parse::FlightParser;
pub use planner::{Recommendation, TripPlanner};
pub use ranking::{rank, RankedSet, RankingConfig};

pub use traits::{
    extractor::Extractor,
    searcher::{FlightCriteria, FlightSearcher, LodgingCriteria, LodgingSearcher},
    summarizer::{Summarizer, SummaryRequest, TripMetadata},
};
pub use types::{
    candidate::{Candidate, FlightEndpoint, Price, StopLocation},
    conversation::{format_history, ConversationTurn, Role},
    lodging::LodgingOption,
    request::{AccommodationPreferences, CabinClass, FlightPreferences, TripRequest},
    task::{FlightItineraries, SearchCategory, TaskData, TaskId, TaskSnapshot, TaskStatus},
};
