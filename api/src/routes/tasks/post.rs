//! Task solving and submission routes.

use crate::response::ApiResponse;
use crate::routes::tasks::common::{SubmissionRequest, format_validation_errors, task_error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tasks::registry;
use tasks::submit::{SubmitSolutionInput, submit_solution};
use tracing::error;
use util::task_spec::Params;
use validator::Validate;

/// POST /api/tasks/{task_id}/solve
///
/// Runs the task's oracle on a single test case.
///
/// ### Request Body
/// ```json
/// { "a": 120, "b": 3, "c": -10, "d": 2, "mode": "tax", "t": 10 }
/// ```
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "success": true, "data": { "p_eq": 30.0, "q_eq": 30.0 }, "message": "Task solved" }
/// ```
/// - `400 Bad Request` if the params do not match the task's inputs or admit no solution
/// - `404 Not Found` if no task has this id
pub async fn solve(Path(task_id): Path<String>, Json(params): Json<Params>) -> Response {
    match registry::solve_task(&task_id, &params) {
        Ok(result) => ApiResponse::success(result, "Task solved").with_status(StatusCode::OK),
        Err(err) => task_error_response(err),
    }
}

/// POST /api/tasks/{task_id}/submissions
///
/// Judges user code against the task's oracle over the given test cases. Judging runs on a
/// blocking thread; at most `MAX_CONCURRENT_JUDGEMENTS` run at once and further requests
/// wait for a slot.
///
/// ### Request Body
/// ```json
/// {
///   "user_code": "fn solve(params) { ... }",
///   "tests": [{ "a": 120, "b": 3, "c": -10, "d": 2, "mode": "none" }]
/// }
/// ```
///
/// ### Responses
/// - `200 OK` for every verdict
/// ```json
/// {
///   "success": true,
///   "data": {
///     "verdict": "WA",
///     "passed": 1,
///     "total": 3,
///     "message": "Wrong answer",
///     "failed_test_index": 1,
///     "failed_field": "p_eq"
///   },
///   "message": "Submission judged"
/// }
/// ```
/// - `400 Bad Request` for an invalid body or fixtures that do not match the task's inputs
/// - `404 Not Found` if no task has this id
/// - `503 Service Unavailable` if the judging worker could not run
pub async fn submit(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(req): Json<SubmissionRequest>,
) -> Response {
    if let Err(validation_errors) = req.validate() {
        let message = format_validation_errors(&validation_errors);
        return ApiResponse::failure(StatusCode::BAD_REQUEST, message);
    }

    if let Err(err) = registry::get_task_spec(&task_id) {
        return task_error_response(err);
    }

    let permit = match state.judge_permits().acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            error!(error = %e, "judgement semaphore closed");
            return ApiResponse::failure(
                StatusCode::SERVICE_UNAVAILABLE,
                "Judging is currently unavailable",
            );
        }
    };

    let input = SubmitSolutionInput {
        task_id,
        user_code: req.user_code,
        tests: req.tests,
    };
    let settings = state.judge_settings();

    let outcome = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        submit_solution(&input, settings)
    })
    .await;

    match outcome {
        Ok(Ok(report)) => ApiResponse::success(report, "Submission judged").with_status(StatusCode::OK),
        Ok(Err(err)) => task_error_response(err),
        Err(e) => {
            error!(error = %e, "judging worker failed to join");
            ApiResponse::failure(
                StatusCode::SERVICE_UNAVAILABLE,
                "Judging is currently unavailable",
            )
        }
    }
}
