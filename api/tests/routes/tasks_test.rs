use crate::helpers::{body_json, make_test_app, request};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tower::ServiceExt;

const GOOD_CODE: &str = r#"
fn solve(params) {
    let a = float(params.a);
    let b = float(params.b);
    let c = float(params.c);
    let d = float(params.d);
    let t = float(params.t ?? 0.0);
    let p = if params.mode == "tax" {
        (a - c + d * t) / (b + d)
    } else if params.mode == "subsidy" {
        (a - c - d * t) / (b + d)
    } else {
        (a - c) / (b + d)
    };
    #{ p_eq: p, q_eq: a - b * p }
}
"#;

fn tests_pack() -> Value {
    json!([
        {"a": 120, "b": 3, "c": -10, "d": 2, "mode": "none"},
        {"a": 120, "b": 3, "c": -10, "d": 2, "mode": "tax", "t": 10},
        {"a": 120, "b": 3, "c": -10, "d": 2, "mode": "subsidy", "t": 10}
    ])
}

async fn submit(task_id: &str, body: Value) -> (StatusCode, Value) {
    let uri = format!("/api/tasks/{task_id}/submissions");
    let response = make_test_app()
        .oneshot(request("POST", &uri, Some(body)))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn lists_the_catalog() {
    let response = make_test_app()
        .oneshot(request("GET", "/api/tasks", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"][0]["id"], "equilibrium_linear_v1");
    assert_eq!(json["data"][0]["output_fields"][0]["name"], "p_eq");
    assert_eq!(json["data"][0]["output_fields"][0]["type"], "float");
}

#[tokio::test]
async fn gets_one_task_or_404() {
    let ok = make_test_app()
        .oneshot(request("GET", "/api/tasks/equilibrium_linear_v1", None))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["data"]["topic"], "equilibrium");

    let missing = make_test_app()
        .oneshot(request("GET", "/api/tasks/nope", None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let json = body_json(missing).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Unknown task: nope");
}

#[tokio::test]
async fn solve_runs_the_oracle() {
    let response = make_test_app()
        .oneshot(request(
            "POST",
            "/api/tasks/equilibrium_linear_v1/solve",
            Some(json!({"a": 120, "b": 3, "c": -10, "d": 2, "mode": "subsidy", "t": 10})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!({"p_eq": 22.0, "q_eq": 54.0}));
}

#[tokio::test]
async fn solve_rejects_bad_params() {
    for params in [
        json!({"a": "120", "b": 3, "c": -10, "d": 2, "mode": "none"}),
        json!({"a": 1, "b": 10, "c": 100, "d": 1, "mode": "none"}),
    ] {
        let response = make_test_app()
            .oneshot(request(
                "POST",
                "/api/tasks/equilibrium_linear_v1/solve",
                Some(params),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);
    }
}

#[tokio::test]
async fn accepted_submission() {
    let (status, json) = submit(
        "equilibrium_linear_v1",
        json!({"user_code": GOOD_CODE, "tests": tests_pack()}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["verdict"], "AC");
    assert_eq!(json["data"]["passed"], 3);
    assert_eq!(json["data"]["total"], 3);
    assert!(json["data"].get("failed_test_index").is_none());
}

#[tokio::test]
async fn failing_verdicts_are_still_200() {
    let (status, json) = submit(
        "equilibrium_linear_v1",
        json!({
            "user_code": "fn solve(params) { let n = 0; loop { n += 1; } }",
            "tests": tests_pack()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["verdict"], "TLE");
    assert_eq!(json["data"]["failed_test_index"], 0);

    let (status, json) = submit(
        "equilibrium_linear_v1",
        json!({"user_code": "fn solve(params) { #{ price: 1.0, qty: 2.0 } }", "tests": tests_pack()}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["verdict"], "WA");
    assert_eq!(json["data"]["message"], "Wrong output format/keys");
}

#[tokio::test]
async fn submission_body_is_validated() {
    let (status, json) = submit(
        "equilibrium_linear_v1",
        json!({"user_code": "", "tests": tests_pack()}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, _) = submit(
        "equilibrium_linear_v1",
        json!({"user_code": GOOD_CODE, "tests": []}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submission_to_unknown_task_is_404() {
    let (status, json) = submit("nope", json!({"user_code": GOOD_CODE, "tests": tests_pack()})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn fixtures_must_match_the_task_inputs() {
    let (status, json) = submit(
        "equilibrium_linear_v1",
        json!({"user_code": GOOD_CODE, "tests": [{"a": 120, "bogus": 1}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json["message"].as_str().unwrap().contains("test 0"),
        "{json}"
    );
}
