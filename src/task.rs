//! Rover task domain model.
//!
//! A task is created once through the [`Scheduler`](crate::scheduler::Scheduler),
//! stored for the lifetime of the process, and read many times. The end time is
//! always derived from the start time and duration; it is never stored, so the
//! two can never diverge.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minutes in a full operational day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Kind of work a rover performs at the target location.
///
/// Purely descriptive; scheduling treats all types alike.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskType {
    Drill,
    Sample,
    Photo,
    Charge,
}

/// Execution state of a task.
///
/// Every task starts out as `Planned`; no state transitions are driven by
/// this service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    Planned,
    InProgress,
    Completed,
    Aborted,
}

/// A scheduled unit of rover work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverTask {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Name of the rover the task is assigned to. Compared case-insensitively
    /// in all rover-scoped queries.
    pub rover_name: String,
    /// Kind of work to perform.
    pub task_type: TaskType,
    /// Target latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Target longitude in degrees, [-180, 180].
    pub longitude: f64,
    /// Start instant, UTC.
    pub starts_at: DateTime<Utc>,
    /// Duration in minutes, 1..=1440.
    pub duration_minutes: u32,
    /// Current execution state.
    pub status: TaskStatus,
}

impl RoverTask {
    /// End instant, computed as `starts_at + duration_minutes`.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// The UTC calendar date the task starts on.
    ///
    /// A task that crosses midnight still belongs to this date; classification
    /// is by start date only.
    pub fn start_date(&self) -> NaiveDate {
        self.starts_at.date_naive()
    }

    /// Whether this task's `[starts_at, ends_at)` interval intersects the
    /// given half-open interval. Touching endpoints do not count as overlap.
    pub fn overlaps(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        starts_at < self.ends_at() && ends_at > self.starts_at
    }
}
