//! # Tasks Routes Module
//!
//! Routes for the `/api/tasks` endpoint group.
//!
//! ## Structure
//! - `get.rs`: catalog listing and lookup
//! - `post.rs`: reference solving and submissions
//! - `common.rs`: request types and error mapping shared by the handlers

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use get::{get_task, list_tasks};
use post::{solve, submit};

pub mod common;
pub mod get;
pub mod post;

/// Builds the `/tasks` route group.
///
/// - `GET  /tasks`                          → list all task specs
/// - `GET  /tasks/{task_id}`                → one task spec
/// - `POST /tasks/{task_id}/solve`          → run the task's oracle on one test case
/// - `POST /tasks/{task_id}/submissions`    → judge user code against the oracle
pub fn tasks_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/{task_id}", get(get_task))
        .route("/{task_id}/solve", post(solve))
        .route("/{task_id}/submissions", post(submit))
}
