use crate::helpers::{body_json, make_test_app, request};
use axum::http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_is_mounted_under_api() {
    let response = make_test_app()
        .oneshot(request("GET", "/api/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
    assert_eq!(json["message"], "Health check passed");
}
