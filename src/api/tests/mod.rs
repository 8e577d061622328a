use super::*;
use crate::config::COMMON_LOG_NAME;
use crate::types::TaskStatus;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

mod system;

/// Helper to create a test service over a temp log directory
fn create_test_service() -> (Arc<LogTaskService>, Arc<Config>, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = Arc::new(Config {
        log_dir: dir.path().to_path_buf(),
        ..Default::default()
    });
    let service = Arc::new(LogTaskService::new(config.clone()));
    (service, config, dir)
}

/// Write the shared source log into the test directory
fn write_source_log(dir: &TempDir, contents: &str) {
    fs::write(dir.path().join(COMMON_LOG_NAME), contents).expect("write source log");
}

/// Submit a task through the API and return its id
async fn submit_via_api(app: &Router, date: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/logs/tasks?date={date}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["taskId"].as_i64().expect("taskId in response")
}

/// Poll the status endpoint until the task reaches a terminal state
async fn wait_for_terminal_via_api(app: &Router, id: i64) -> serde_json::Value {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/logs/tasks/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let status = json["status"].as_str().unwrap();
        if status == TaskStatus::Completed.to_string() || status == TaskStatus::Failed.to_string() {
            return json;
        }

        assert!(
            tokio::time::Instant::now() < deadline,
            "task {id} did not reach a terminal state in time"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
