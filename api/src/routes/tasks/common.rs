use crate::response::ApiResponse;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use tasks::error::TaskError;
use util::task_spec::Params;
use validator::{Validate, ValidationErrors};

/// Body of `POST /tasks/{task_id}/submissions`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmissionRequest {
    #[validate(length(min = 1, max = 100000, message = "user_code must be 1 to 100000 bytes"))]
    pub user_code: String,

    #[validate(length(min = 1, max = 1000, message = "tests must contain 1 to 1000 test cases"))]
    pub tests: Vec<Params>,
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Maps catalog failures onto status codes. Oracle failures on caller-supplied params are
/// the caller's problem; a spec/oracle disagreement is ours.
pub fn task_error_response(err: TaskError) -> Response {
    let status = match &err {
        TaskError::UnknownTask(_) => StatusCode::NOT_FOUND,
        TaskError::InvalidParams(_) | TaskError::Oracle(_) => StatusCode::BAD_REQUEST,
        TaskError::OracleOutputMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiResponse::failure(status, err.to_string())
}
