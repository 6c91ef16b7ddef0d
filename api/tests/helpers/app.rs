use api::{middleware::log_request, routes::routes, state::AppState};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
    middleware::from_fn,
};
use serde_json::Value;
use util::judge_settings::JudgeSettings;

/// Full app as served, with a short time limit so timeout cases finish quickly.
pub fn make_test_app() -> Router {
    let settings = JudgeSettings::default().with_time_limit_seconds(0.2);
    Router::new()
        .nest("/api", routes(AppState::new(settings, 2)))
        .layer(from_fn(log_request))
}

pub fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
