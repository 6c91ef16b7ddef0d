use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, routing::get};

/// Builds the `/health` route group.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// ```json
/// { "success": true, "data": "OK", "message": "Health check passed" }
/// ```
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("OK", "Health check passed"))
}
