//! Wire types for the rover API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheduler::Utilization;
use crate::task::{RoverTask, TaskStatus, TaskType};

/// Body of a task creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub rover_name: String,
    pub task_type: TaskType,
    pub latitude: f64,
    pub longitude: f64,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// A task as returned to callers, with the derived end time materialized.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub rover_name: String,
    pub task_type: TaskType,
    pub latitude: f64,
    pub longitude: f64,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: TaskStatus,
    pub ends_at: DateTime<Utc>,
}

impl From<RoverTask> for TaskResponse {
    fn from(task: RoverTask) -> Self {
        let ends_at = task.ends_at();
        Self {
            id: task.id,
            rover_name: task.rover_name,
            task_type: task.task_type,
            latitude: task.latitude,
            longitude: task.longitude,
            starts_at: task.starts_at,
            duration_minutes: task.duration_minutes,
            status: task.status,
            ends_at,
        }
    }
}

/// Utilization report for a rover on one date.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationResponse {
    pub rover_id: String,
    pub date: NaiveDate,
    pub utilization_percentage: f64,
    pub total_planned_minutes: u32,
    pub total_available_minutes: u32,
}

impl From<Utilization> for UtilizationResponse {
    fn from(u: Utilization) -> Self {
        Self {
            rover_id: u.rover_name,
            date: u.date,
            utilization_percentage: u.utilization_percentage,
            total_planned_minutes: u.total_planned_minutes,
            total_available_minutes: u.total_available_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn task_response_serializes_camel_case_with_end_time() {
        let task = RoverTask {
            id: Uuid::nil(),
            rover_name: "Rover1".to_string(),
            task_type: TaskType::Charge,
            latitude: 1.5,
            longitude: -2.5,
            starts_at: Utc.with_ymd_and_hms(2030, 5, 17, 8, 0, 0).unwrap(),
            duration_minutes: 90,
            status: TaskStatus::Planned,
        };

        let value = serde_json::to_value(TaskResponse::from(task)).unwrap();
        assert_eq!(value["roverName"], "Rover1");
        assert_eq!(value["taskType"], "Charge");
        assert_eq!(value["status"], "Planned");
        assert_eq!(value["durationMinutes"], 90);
        assert_eq!(value["endsAt"], "2030-05-17T09:30:00Z");
    }

    #[test]
    fn create_request_parses_camel_case() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{
                "roverName": "Rover1",
                "taskType": "Drill",
                "latitude": -23.55,
                "longitude": -46.63,
                "startsAt": "2030-05-17T08:00:00Z",
                "durationMinutes": 120
            }"#,
        )
        .unwrap();

        assert_eq!(req.rover_name, "Rover1");
        assert_eq!(req.task_type, TaskType::Drill);
        assert_eq!(req.duration_minutes, 120);
    }
}
