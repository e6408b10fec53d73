//! Extraction collaborator trait.
//!
//! The extractor is the narrow boundary to an external NLU service that
//! turns free-text conversation into a structured trip request. The core
//! treats it as an opaque function; prompting and provider specifics live
//! behind implementations.

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::types::conversation::ConversationTurn;
use crate::types::request::TripRequest;

/// Turns a conversation history into a structured trip request.
///
/// # Contract
///
/// Implementations must never fabricate field values absent from the
/// conversation: a field the user has not stated stays `None`/empty. The
/// dialogue layer relies on this to decide what to ask next.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract the accumulated trip request from the full turn history.
    ///
    /// Fails with [`ExtractionError`] when the provider is unavailable or
    /// its output cannot be parsed into the expected shape.
    async fn extract(&self, history: &[ConversationTurn]) -> Result<TripRequest, ExtractionError>;
}
