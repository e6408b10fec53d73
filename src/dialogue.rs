//! The conversation slot-filling state machine.
//!
//! One [`DialogueState`] instance covers one trip's conversation. Each turn,
//! [`DialogueState::advance`] calls the extraction collaborator, classifies
//! missing fields against the catalog, and decides: ask a follow-up
//! question, or signal that the request is complete enough to search.
//!
//! Completeness is two-phase. Required fields block readiness outright.
//! Optional fields trigger at most one best-effort follow-up per
//! conversation; the `optional_pass_done` flag persists across turns so the
//! question is never repeated, whether or not the user answers it.
//!
//! Progression is strictly linear: error beats everything, required beats
//! optional, and `Ready` is terminal for the invocation. A new trip gets a
//! fresh instance so a prior trip's optional pass cannot leak into it.

use tracing::{debug, warn};

use crate::catalog::{FieldCatalog, FieldKey};
use crate::traits::extractor::Extractor;
use crate::types::conversation::ConversationTurn;
use crate::types::request::TripRequest;

/// Shown when extraction fails; the real cause goes to the log, never to
/// the user.
const EXTRACTION_APOLOGY: &str =
    "Sorry, I ran into a problem understanding your request. Could you try rephrasing it?";

/// At most this many required-field questions per turn.
const MAX_QUESTIONS_PER_TURN: usize = 3;

/// Result of advancing the conversation by one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The request is incomplete; ask the user this question.
    AskUser(String),
    /// The request is complete enough to search.
    Ready(TripRequest),
    /// This turn could not be processed; the message is safe to show the
    /// user. The conversation itself survives.
    Error(String),
}

/// Per-conversation dialogue state.
///
/// Create one instance per trip being planned. Reusing an instance across
/// trips would suppress the optional-fields question for the later trip.
pub struct DialogueState {
    catalog: FieldCatalog,
    required_complete: bool,
    optional_pass_done: bool,
}

impl Default for DialogueState {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueState {
    /// Fresh state with the standard field catalog.
    pub fn new() -> Self {
        Self::with_catalog(FieldCatalog::standard())
    }

    /// Fresh state with a custom catalog.
    pub fn with_catalog(catalog: FieldCatalog) -> Self {
        Self {
            catalog,
            required_complete: false,
            optional_pass_done: false,
        }
    }

    /// Whether every required field was present on the last advance.
    pub fn required_complete(&self) -> bool {
        self.required_complete
    }

    /// Whether the one-shot optional follow-up has been spent.
    pub fn optional_pass_done(&self) -> bool {
        self.optional_pass_done
    }

    /// Advance the conversation by one turn.
    pub async fn advance<X>(&mut self, extractor: &X, history: &[ConversationTurn]) -> Outcome
    where
        X: Extractor + ?Sized,
    {
        let request = match extractor.extract(history).await {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "extraction failed; asking user to restate");
                return Outcome::Error(EXTRACTION_APOLOGY.to_string());
            }
        };

        let missing = self.catalog.classify(&request);
        self.required_complete = missing.required.is_empty();
        debug!(
            missing_required = missing.required.len(),
            missing_optional = missing.optional.len(),
            optional_pass_done = self.optional_pass_done,
            "classified trip request"
        );

        if !missing.required.is_empty() {
            return Outcome::AskUser(self.required_question(&missing.required));
        }

        if !self.optional_pass_done {
            // Spend the pass now: the question is asked at most once,
            // regardless of whether the user answers it.
            self.optional_pass_done = true;
            if !missing.optional.is_empty() {
                return Outcome::AskUser(self.optional_question(&missing.optional));
            }
        }

        Outcome::Ready(request)
    }

    /// Compose the question for missing required fields, in catalog order.
    fn required_question(&self, missing: &[FieldKey]) -> String {
        if let [field] = missing {
            return format!("Thanks! To continue planning, {}", self.catalog.prompt(*field));
        }

        let mut message =
            String::from("Thanks! I need a few more details to help you plan your trip:\n\n");
        for field in missing.iter().take(MAX_QUESTIONS_PER_TURN) {
            message.push_str(&format!("* {}\n", self.catalog.prompt(*field)));
        }
        if missing.len() > MAX_QUESTIONS_PER_TURN {
            message.push_str("\nLet's start with those, and we can fill in the rest after.");
        }
        message
    }

    /// Compose the single best-effort optional-fields question.
    fn optional_question(&self, missing: &[FieldKey]) -> String {
        let asks: Vec<&str> = missing.iter().map(|f| self.catalog.prompt(*f)).collect();
        format!(
            "Great, I have the main details! To help find the best options, \
             you can also tell me about {}. Or, just say 'continue' and I'll use defaults.",
            asks.join(", ")
        )
    }
}
