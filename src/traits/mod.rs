//! Collaborator trait abstractions.
//!
//! Everything the core cannot compute itself lives behind one of these
//! narrow boundaries: natural-language extraction, per-category search,
//! and summary generation. Implementations are out of scope for this
//! crate; [`crate::testing`] provides mocks.

pub mod extractor;
pub mod searcher;
pub mod summarizer;

pub use extractor::Extractor;
pub use searcher::{FlightCriteria, FlightSearcher, LodgingCriteria, LodgingSearcher};
pub use summarizer::{Summarizer, SummaryRequest, TripMetadata};
