mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::setup_test_app;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_welcome_message() {
    let app = setup_test_app().await;

    let response = app.server.get("/").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Welcome to the Museum Database API" })
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = setup_test_app().await;

    let response = app.server.get("/gift-shop").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Route not found" })
    );
}

#[tokio::test]
async fn test_unmatched_method_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .server
        .delete("/exhibitions")
        .authorization_bearer(&app.staff_token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Route not found");

    app.server
        .post("/")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preflight_bypasses_authentication_and_routing() {
    let app = setup_test_app().await;

    for path in ["/exhibitions/AddExhibition", "/total-report", "/nowhere"] {
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(path)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{}", path);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
    assert_eq!(app.gateway.total(), 0);
}

#[tokio::test]
async fn test_cors_headers_on_errors() {
    let app = setup_test_app().await;

    for (path, status) in [
        ("/gift-shop", StatusCode::NOT_FOUND),
        ("/exhibitions", StatusCode::UNAUTHORIZED),
        ("/", StatusCode::OK),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), status, "{}", path);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*",
            "{}",
            path
        );
    }
}
