//! Search task lifecycle types.
//!
//! A task is one independently scheduled unit of search work (one category,
//! one trip). Its identity is a freshly generated UUID, never reused; its
//! terminal state is immutable once written.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ranking::RankedSet;
use crate::types::lodging::LodgingOption;

/// Opaque task identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Allocate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which collaborator a task searches with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Flights,
    Lodging,
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flights => write!(f, "flights"),
            Self::Lodging => write!(f, "lodging"),
        }
    }
}

/// Lifecycle status of a search task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Accepted, worker not yet running.
    Pending,
    /// Worker executing the search + rank pipeline.
    Processing,
    /// Terminal: result stored in `data`.
    Completed,
    /// Terminal: error message stored in `error`.
    Failed,
}

impl TaskStatus {
    /// Whether the task has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Ranked flight results for one round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightItineraries {
    /// Best-of set for the departure date.
    pub outbound: RankedSet,
    /// Best-of set for the return date.
    pub inbound: RankedSet,
}

/// Result payload of a completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum TaskData {
    Flights(FlightItineraries),
    Lodging { options: Vec<LodgingOption> },
}

/// Point-in-time view of a task, as returned by `poll`.
///
/// Snapshots are copies; holding one never blocks the owning worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub category: SearchCategory,
    pub status: TaskStatus,
    /// Present only when `status` is `Completed`.
    pub data: Option<TaskData>,
    /// Present only when `status` is `Failed`.
    pub error: Option<String>,
}
