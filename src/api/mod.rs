//! HTTP API for the mission planner.

pub mod routes;
pub mod tasks;
pub mod types;

pub use routes::{serve, AppState};
