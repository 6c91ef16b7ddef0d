//! Task catalog routes.

use crate::response::ApiResponse;
use crate::routes::tasks::common::task_error_response;
use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasks::registry;

/// GET /api/tasks
///
/// Lists every task spec in the catalog, ordered by id.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": "equilibrium_linear_v1",
///       "title": "...",
///       "topic": "equilibrium",
///       "input_fields": [{ "name": "a", "type": "float", "description": "..." }],
///       "output_fields": [{ "name": "p_eq", "type": "float", "description": "..." }]
///     }
///   ],
///   "message": "Tasks retrieved successfully"
/// }
/// ```
pub async fn list_tasks() -> impl IntoResponse {
    let specs = registry::list_tasks();
    (
        StatusCode::OK,
        Json(ApiResponse::success(specs, "Tasks retrieved successfully")),
    )
}

/// GET /api/tasks/{task_id}
///
/// ### Responses
/// - `200 OK` with the task spec
/// - `404 Not Found` if no task has this id
pub async fn get_task(Path(task_id): Path<String>) -> Response {
    match registry::get_task_spec(&task_id) {
        Ok(spec) => ApiResponse::success(spec, "Task retrieved successfully").with_status(StatusCode::OK),
        Err(err) => task_error_response(err),
    }
}
