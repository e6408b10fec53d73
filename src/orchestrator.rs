//! The search task orchestrator.
//!
//! `submit` validates the trip request, allocates a fresh task, and spawns
//! the search + rank pipeline as an independent tokio task; `poll` reads a
//! snapshot. Each worker is the sole writer of its task record, and a
//! terminal state (status plus data or error) is committed in one registry
//! write, so a concurrent `poll` can never observe a partially written
//! result.
//!
//! The registry is owned by the orchestrator instance: no ambient state,
//! so tests get isolated registries for free. There is no cancellation or
//! automatic retry; a failed task stays failed and re-submitting is the
//! caller's decision.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::catalog::FieldKey;
use crate::error::ValidationError;
use crate::ranking::{rank, RankingConfig};
use crate::traits::searcher::{FlightCriteria, FlightSearcher, LodgingCriteria, LodgingSearcher};
use crate::types::request::TripRequest;
use crate::types::task::{
    FlightItineraries, SearchCategory, TaskData, TaskId, TaskSnapshot, TaskStatus,
};

/// How often `wait_terminal` re-polls.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Internal task record. Snapshots hand copies of this out.
#[derive(Debug, Clone)]
struct SearchTask {
    category: SearchCategory,
    status: TaskStatus,
    data: Option<TaskData>,
    error: Option<String>,
}

type Registry = Arc<RwLock<HashMap<TaskId, SearchTask>>>;

/// Schedules and tracks search tasks for one planning session.
pub struct SearchOrchestrator<F, L> {
    flights: Arc<F>,
    lodging: Arc<L>,
    tasks: Registry,
    ranking: RankingConfig,
}

impl<F, L> SearchOrchestrator<F, L>
where
    F: FlightSearcher + 'static,
    L: LodgingSearcher + 'static,
{
    /// Create an orchestrator with its own empty registry.
    pub fn new(flights: F, lodging: L) -> Self {
        Self {
            flights: Arc::new(flights),
            lodging: Arc::new(lodging),
            tasks: Arc::new(RwLock::new(HashMap::new())),
            ranking: RankingConfig::default(),
        }
    }

    /// Override the ranking configuration.
    pub fn with_ranking_config(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    /// Validate the request and schedule one search task.
    ///
    /// Validation failures are returned to the caller directly; no task is
    /// ever created for an invalid request. On success the task starts
    /// `pending` and runs to a terminal state independently of the caller.
    pub fn submit(
        &self,
        category: SearchCategory,
        request: &TripRequest,
    ) -> Result<TaskId, ValidationError> {
        let id = match category {
            SearchCategory::Flights => {
                let criteria = FlightCriteria::from_request(request)?;
                let start = request.start_date.ok_or(ValidationError::MissingField {
                    field: FieldKey::StartDate,
                })?;
                let end = request.end_date.ok_or(ValidationError::MissingField {
                    field: FieldKey::EndDate,
                })?;

                let id = self.allocate(category);
                tokio::spawn(run_flight_task(
                    Arc::clone(&self.flights),
                    Arc::clone(&self.tasks),
                    id,
                    criteria,
                    start,
                    end,
                    self.ranking.clone(),
                ));
                id
            }
            SearchCategory::Lodging => {
                let criteria = LodgingCriteria::from_request(request)?;

                let id = self.allocate(category);
                tokio::spawn(run_lodging_task(
                    Arc::clone(&self.lodging),
                    Arc::clone(&self.tasks),
                    id,
                    criteria,
                ));
                id
            }
        };

        info!(task = %id, %category, "search task submitted");
        Ok(id)
    }

    /// Snapshot a task's current state. `None` means the id is unknown,
    /// which is distinct from a `pending` task.
    pub fn poll(&self, id: &TaskId) -> Option<TaskSnapshot> {
        self.tasks.read().unwrap().get(id).map(|task| TaskSnapshot {
            id: *id,
            category: task.category,
            status: task.status,
            data: task.data.clone(),
            error: task.error.clone(),
        })
    }

    /// Poll until the task reaches a terminal state. `None` for unknown ids.
    pub async fn wait_terminal(&self, id: &TaskId) -> Option<TaskSnapshot> {
        loop {
            let snapshot = self.poll(id)?;
            if snapshot.status.is_terminal() {
                return Some(snapshot);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Number of tasks ever submitted to this orchestrator.
    pub fn task_count(&self) -> usize {
        self.tasks.read().unwrap().len()
    }

    fn allocate(&self, category: SearchCategory) -> TaskId {
        let id = TaskId::new();
        self.tasks.write().unwrap().insert(
            id,
            SearchTask {
                category,
                status: TaskStatus::Pending,
                data: None,
                error: None,
            },
        );
        id
    }
}

fn set_processing(tasks: &Registry, id: &TaskId) {
    if let Some(task) = tasks.write().unwrap().get_mut(id) {
        task.status = TaskStatus::Processing;
    }
}

/// Commit a successful terminal state in one write.
fn complete(tasks: &Registry, id: &TaskId, data: TaskData) {
    if let Some(task) = tasks.write().unwrap().get_mut(id) {
        if task.status.is_terminal() {
            return;
        }
        task.status = TaskStatus::Completed;
        task.data = Some(data);
    }
    info!(task = %id, "search task completed");
}

/// Commit a failed terminal state in one write.
fn fail(tasks: &Registry, id: &TaskId, message: String) {
    warn!(task = %id, error = %message, "search task failed");
    if let Some(task) = tasks.write().unwrap().get_mut(id) {
        if task.status.is_terminal() {
            return;
        }
        task.status = TaskStatus::Failed;
        task.error = Some(message);
    }
}

async fn run_flight_task<F: FlightSearcher>(
    flights: Arc<F>,
    tasks: Registry,
    id: TaskId,
    criteria: FlightCriteria,
    start: NaiveDate,
    end: NaiveDate,
    ranking: RankingConfig,
) {
    set_processing(&tasks, &id);

    let outbound = match flights.search(&criteria, start).await {
        Ok(candidates) => rank(candidates, &ranking),
        Err(err) => {
            return fail(&tasks, &id, format!("Flight search failed: {}", err));
        }
    };
    let inbound = match flights.search(&criteria, end).await {
        Ok(candidates) => rank(candidates, &ranking),
        Err(err) => {
            return fail(&tasks, &id, format!("Flight search failed: {}", err));
        }
    };

    complete(
        &tasks,
        &id,
        TaskData::Flights(FlightItineraries { outbound, inbound }),
    );
}

async fn run_lodging_task<L: LodgingSearcher>(
    lodging: Arc<L>,
    tasks: Registry,
    id: TaskId,
    criteria: LodgingCriteria,
) {
    set_processing(&tasks, &id);

    match lodging.search(&criteria).await {
        Ok(options) => complete(&tasks, &id, TaskData::Lodging { options }),
        Err(err) => fail(&tasks, &id, format!("Lodging search failed: {}", err)),
    }
}
