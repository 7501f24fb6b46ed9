//! # Rover Mission Planner
//!
//! An in-memory scheduling service for rover tasks.
//!
//! This library provides:
//! - An HTTP API for creating rover tasks and querying daily schedules
//! - A scheduler that guarantees no rover ever has two overlapping tasks,
//!   including under concurrent creation
//! - Daily utilization reports derived from planned task durations
//!
//! ## Task Flow
//! 1. Receive a creation request via the API and validate its fields
//! 2. Atomically check the rover's schedule for overlap and insert
//! 3. Answer date-scoped task lists and utilization queries from the store
//!
//! ## Modules
//! - `task`: the task domain model with its derived end time
//! - `store`: thread-safe in-memory storage with the atomic overlap guard
//! - `scheduler`: task creation, daily listings, utilization
//! - `api`: axum routes, request validation, error shaping

pub mod api;
pub mod config;
pub mod scheduler;
pub mod store;
pub mod task;

pub use config::Config;
pub use scheduler::{ScheduleError, Scheduler, TaskDraft, Utilization};
pub use store::{SharedTaskStore, TaskStore};
pub use task::{RoverTask, TaskStatus, TaskType};
