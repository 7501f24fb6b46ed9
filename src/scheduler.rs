//! Task scheduling service.
//!
//! The only entry point that creates tasks. Enforces the per-rover no-overlap
//! invariant through the store's atomic insert, orders daily task lists, and
//! derives utilization figures.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::store::{InsertRejection, SharedTaskStore};
use crate::task::{RoverTask, TaskStatus, TaskType, MINUTES_PER_DAY};

/// Errors raised while scheduling.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The requested interval intersects an existing task for the rover.
    /// A legitimate business outcome, not a transient fault; callers should
    /// reject the request rather than retry.
    #[error("task from {starts_at} to {ends_at} overlaps an existing task for rover {rover_name}")]
    Conflict {
        rover_name: String,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },
    /// A freshly generated task id was already present in the store. This is
    /// an invariant violation, never expected in normal operation.
    #[error("task id {0} already exists; id generation is broken")]
    IdCollision(Uuid),
}

/// Fields of a task to create. Boundary validation (coordinate ranges,
/// duration range, start in the future) is assumed to have already happened
/// by the time a draft reaches the scheduler.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub task_type: TaskType,
    pub latitude: f64,
    pub longitude: f64,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// A rover's planned load for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Utilization {
    pub rover_name: String,
    pub date: NaiveDate,
    /// Planned minutes over the 1440-minute day, rounded to two decimals.
    /// Not clamped; a day with cross-midnight tasks can exceed 100.
    pub utilization_percentage: f64,
    pub total_planned_minutes: u32,
    pub total_available_minutes: u32,
}

/// Scheduling service over a shared task store.
#[derive(Clone)]
pub struct Scheduler {
    store: SharedTaskStore,
}

impl Scheduler {
    pub fn new(store: SharedTaskStore) -> Self {
        Self { store }
    }

    /// Create a task for the rover, failing with [`ScheduleError::Conflict`]
    /// if its interval intersects an existing task for the same rover.
    ///
    /// The overlap check and the insert happen atomically in the store, so
    /// two racing creations with intersecting intervals resolve to exactly
    /// one success.
    pub async fn create_task(
        &self,
        rover_name: &str,
        draft: TaskDraft,
    ) -> Result<RoverTask, ScheduleError> {
        let task = RoverTask {
            id: Uuid::new_v4(),
            rover_name: rover_name.to_string(),
            task_type: draft.task_type,
            latitude: draft.latitude,
            longitude: draft.longitude,
            starts_at: draft.starts_at,
            duration_minutes: draft.duration_minutes,
            status: TaskStatus::Planned,
        };
        let id = task.id;
        let starts_at = task.starts_at;
        let ends_at = task.ends_at();

        match self.store.insert_if_no_overlap(task).await {
            Ok(stored) => {
                tracing::info!(
                    "Scheduled {:?} task {} for {} at {}",
                    stored.task_type,
                    stored.id,
                    stored.rover_name,
                    stored.starts_at
                );
                Ok(stored)
            }
            Err(InsertRejection::Overlap) => Err(ScheduleError::Conflict {
                rover_name: rover_name.to_string(),
                starts_at,
                ends_at,
            }),
            Err(InsertRejection::DuplicateId) => Err(ScheduleError::IdCollision(id)),
        }
    }

    /// All tasks for the rover starting on the given UTC date, ascending by
    /// start time. Ties are broken by id so the order is deterministic.
    pub async fn tasks_by_date(&self, rover_name: &str, date: NaiveDate) -> Vec<RoverTask> {
        let mut tasks = self.store.tasks_on_date(rover_name, date).await;
        tasks.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));
        tasks
    }

    /// Planned-minutes-to-day-length ratio for the rover on the given date.
    ///
    /// Sums the full duration of every task starting on `date`, including
    /// minutes that spill past midnight, so the percentage can exceed 100.
    pub async fn utilization(&self, rover_name: &str, date: NaiveDate) -> Utilization {
        let tasks = self.store.tasks_on_date(rover_name, date).await;
        let total_planned_minutes: u32 = tasks.iter().map(|t| t.duration_minutes).sum();
        let ratio = f64::from(total_planned_minutes) / f64::from(MINUTES_PER_DAY);

        Utilization {
            rover_name: rover_name.to_string(),
            date,
            utilization_percentage: round2(ratio * 100.0),
            total_planned_minutes,
            total_available_minutes: MINUTES_PER_DAY,
        }
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
