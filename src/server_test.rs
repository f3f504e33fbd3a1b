use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

use super::*;

fn test_options() -> LeptosOptions {
    LeptosOptions::builder().output_name("unionvote").build()
}

async fn get_page(uri: &str) -> (StatusCode, String) {
    let response = router(test_options())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn health_check_answers_ok() {
    let (status, _) = get_page("/healthz").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn landing_page_is_server_rendered() {
    let (status, html) = get_page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Your Voice, Your Union"));
    assert!(html.contains("/pkg/unionvote"));
}

#[tokio::test]
async fn protected_page_renders_waiting_guard() {
    let (status, html) = get_page("/elections").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("loading-spinner"));
    assert!(!html.contains("election-card"));
}
