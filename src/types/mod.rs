//! Data model for the trip-planning core.

pub mod candidate;
pub mod conversation;
pub mod lodging;
pub mod request;
pub mod task;

pub use candidate::{Candidate, FlightEndpoint, Price, StopLocation};
pub use conversation::{format_history, ConversationTurn, Role};
pub use lodging::LodgingOption;
pub use request::{AccommodationPreferences, CabinClass, FlightPreferences, TripRequest};
pub use task::{
    FlightItineraries, SearchCategory, TaskData, TaskId, TaskSnapshot, TaskStatus,
};
