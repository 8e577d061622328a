use super::*;

#[tokio::test]
async fn test_health_endpoint() {
    let (service, config, _dir) = create_test_service();
    let app = create_router(service, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
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

    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_json_endpoint() {
    let (service, config, _dir) = create_test_service();
    let app = create_router(service, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
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

    assert!(json["openapi"].as_str().unwrap().starts_with("3."));
    assert_eq!(json["info"]["title"], "logslice REST API");

    let paths = json["paths"].as_object().unwrap();
    for expected in ["/logs/tasks", "/logs/tasks/{id}", "/logs/tasks/{id}/file"] {
        assert!(
            paths.contains_key(expected),
            "OpenAPI spec must contain path: {expected}"
        );
    }
}

#[tokio::test]
async fn test_swagger_ui_disabled() {
    let (service, _config, dir) = create_test_service();

    let mut config = Config {
        log_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    config.server.swagger_ui = false;
    let app = create_router(service, Arc::new(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        StatusCode::NOT_FOUND,
        "Swagger UI should not be accessible when disabled"
    );
}

#[tokio::test]
async fn test_cors_enabled() {
    let (service, config, _dir) = create_test_service();
    let app = create_router(service, config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_events_endpoint_is_sse() {
    let (service, config, _dir) = create_test_service();
    let app = create_router(service.clone(), config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events")
                .header("Accept", "text/event-stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        content_type.contains("text/event-stream"),
        "Content-Type should be text/event-stream, got: {content_type}"
    );

    // The endpoint subscribes to the same channel the service broadcasts on
    let mut receiver = service.subscribe();
    let _ = service.submit("2023-12-01").await.unwrap();

    let received = tokio::time::timeout(Duration::from_secs(1), receiver.recv()).await;
    assert!(
        received.is_ok() && received.unwrap().is_ok(),
        "Should be able to subscribe and receive events"
    );
}

#[tokio::test]
async fn test_api_server_spawns() {
    let (service, _config, dir) = create_test_service();

    // Port 0 = OS assigns a free port
    let mut config = Config {
        log_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    config.server.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let api_handle = tokio::spawn({
        let service = service.clone();
        let config = config.clone();
        async move { start_api_server(service, config).await }
    });

    // Give it a moment to start, then stop it
    tokio::time::sleep(Duration::from_millis(100)).await;
    api_handle.abort();
}
