//! In-memory task storage.
//!
//! The store owns the canonical copy of every task, keyed by id, behind a
//! single `RwLock`. Individual operations are safe under concurrent callers;
//! the composite check-then-insert needed for the no-overlap invariant is
//! exposed as one atomic operation, [`TaskStore::insert_if_no_overlap`], so
//! two racing creations can never both commit overlapping intervals.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::task::RoverTask;

/// Why the store refused an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRejection {
    /// The task's interval intersects an existing task for the same rover.
    Overlap,
    /// A task with the same id is already stored. Ids are generated fresh at
    /// creation, so hitting this means id generation is broken.
    DuplicateId,
}

/// Thread-safe in-memory store of rover tasks.
pub struct TaskStore {
    tasks: RwLock<HashMap<Uuid, RoverTask>>,
}

/// Shared task store for concurrent access.
pub type SharedTaskStore = Arc<TaskStore>;

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Add a task keyed by its id. Fails on a duplicate id rather than
    /// silently overwriting the stored task.
    pub async fn insert(&self, task: RoverTask) -> Result<RoverTask, InsertRejection> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(InsertRejection::DuplicateId);
        }
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    /// Atomically check the no-overlap invariant and insert.
    ///
    /// Holds the write guard across both steps, so no other caller can commit
    /// a conflicting task between the check and the insert.
    pub async fn insert_if_no_overlap(&self, task: RoverTask) -> Result<RoverTask, InsertRejection> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(InsertRejection::DuplicateId);
        }
        if overlap_exists(&tasks, &task.rover_name, task.starts_at, task.ends_at(), None) {
            return Err(InsertRejection::Overlap);
        }
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    /// Point lookup by task id.
    pub async fn find_by_id(&self, id: Uuid) -> Option<RoverTask> {
        let tasks = self.tasks.read().await;
        tasks.get(&id).cloned()
    }

    /// All tasks for the rover (case-insensitive match) whose start falls on
    /// the given UTC calendar date. A task that starts on `date` but ends the
    /// following day is still included. Order is unspecified.
    pub async fn tasks_on_date(&self, rover_name: &str, date: NaiveDate) -> Vec<RoverTask> {
        let tasks = self.tasks.read().await;
        tasks
            .values()
            .filter(|t| t.rover_name.eq_ignore_ascii_case(rover_name))
            .filter(|t| t.start_date() == date)
            .cloned()
            .collect()
    }

    /// Whether any stored task for the rover intersects `[starts_at, ends_at)`.
    ///
    /// `exclude_id` skips one task, for callers re-checking an interval they
    /// already own. This read-only check does not reserve the interval; use
    /// [`TaskStore::insert_if_no_overlap`] when inserting.
    pub async fn has_overlap(
        &self,
        rover_name: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> bool {
        let tasks = self.tasks.read().await;
        overlap_exists(&tasks, rover_name, starts_at, ends_at, exclude_id)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlap scan against a locked view of the map.
fn overlap_exists(
    tasks: &HashMap<Uuid, RoverTask>,
    rover_name: &str,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    exclude_id: Option<Uuid>,
) -> bool {
    tasks
        .values()
        .filter(|t| t.rover_name.eq_ignore_ascii_case(rover_name))
        .filter(|t| exclude_id != Some(t.id))
        .any(|t| t.overlaps(starts_at, ends_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskStatus, TaskType};
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 5, 17, 8, 0, 0).unwrap()
    }

    fn task(rover: &str, starts_at: DateTime<Utc>, duration_minutes: u32) -> RoverTask {
        RoverTask {
            id: Uuid::new_v4(),
            rover_name: rover.to_string(),
            task_type: TaskType::Photo,
            latitude: 0.0,
            longitude: 0.0,
            starts_at,
            duration_minutes,
            status: TaskStatus::Planned,
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = TaskStore::new();
        let task = task("Rover1", base_time(), 60);
        let stored = store.insert(task.clone()).await.unwrap();
        assert_eq!(stored.id, task.id);

        let found = store.find_by_id(task.id).await.unwrap();
        assert_eq!(found.rover_name, "Rover1");
        assert!(store.find_by_id(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = TaskStore::new();
        let first = task("Rover1", base_time(), 60);
        let mut second = task("Rover1", base_time() + Duration::minutes(120), 30);
        second.id = first.id;

        store.insert(first).await.unwrap();
        assert_eq!(
            store.insert(second).await.unwrap_err(),
            InsertRejection::DuplicateId
        );
    }

    #[tokio::test]
    async fn has_overlap_uses_half_open_intervals() {
        let store = TaskStore::new();
        let start = base_time();
        store.insert(task("Rover1", start, 60)).await.unwrap();

        // Strict intersection overlaps.
        assert!(
            store
                .has_overlap("Rover1", start + Duration::minutes(30), start + Duration::minutes(90), None)
                .await
        );
        // Touching endpoints do not.
        assert!(
            !store
                .has_overlap("Rover1", start + Duration::minutes(60), start + Duration::minutes(90), None)
                .await
        );
        assert!(
            !store
                .has_overlap("Rover1", start - Duration::minutes(30), start, None)
                .await
        );
    }

    #[tokio::test]
    async fn has_overlap_matches_rover_case_insensitively() {
        let store = TaskStore::new();
        let start = base_time();
        store.insert(task("Rover1", start, 60)).await.unwrap();

        assert!(store.has_overlap("ROVER1", start, start + Duration::minutes(30), None).await);
        assert!(!store.has_overlap("Rover2", start, start + Duration::minutes(30), None).await);
    }

    #[tokio::test]
    async fn has_overlap_can_exclude_a_task() {
        let store = TaskStore::new();
        let start = base_time();
        let existing = store.insert(task("Rover1", start, 60)).await.unwrap();

        assert!(store.has_overlap("Rover1", start, start + Duration::minutes(30), None).await);
        assert!(
            !store
                .has_overlap("Rover1", start, start + Duration::minutes(30), Some(existing.id))
                .await
        );
    }

    #[tokio::test]
    async fn insert_if_no_overlap_rejects_conflicts() {
        let store = TaskStore::new();
        let start = base_time();
        store.insert_if_no_overlap(task("Rover1", start, 60)).await.unwrap();

        let overlapping = task("Rover1", start + Duration::minutes(30), 60);
        assert_eq!(
            store.insert_if_no_overlap(overlapping).await.unwrap_err(),
            InsertRejection::Overlap
        );

        // Back-to-back is allowed.
        let adjacent = task("Rover1", start + Duration::minutes(60), 30);
        store.insert_if_no_overlap(adjacent).await.unwrap();
    }

    #[tokio::test]
    async fn tasks_on_date_classifies_by_start_date() {
        let store = TaskStore::new();
        let date = NaiveDate::from_ymd_opt(2030, 5, 17).unwrap();
        let late = Utc.with_ymd_and_hms(2030, 5, 17, 23, 50, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2030, 5, 18, 9, 0, 0).unwrap();

        store.insert(task("Rover1", base_time(), 60)).await.unwrap();
        // Crosses midnight; still belongs to the 17th.
        store.insert(task("Rover1", late, 60)).await.unwrap();
        store.insert(task("Rover1", next_day, 60)).await.unwrap();
        store.insert(task("Rover2", base_time() + Duration::minutes(90), 60)).await.unwrap();

        let tasks = store.tasks_on_date("rover1", date).await;
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.start_date() == date));
    }
}
