use axum::{
    extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, routing::get, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::router())
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::test_helpers::{body_json, test_state};

    #[tokio::test]
    async fn health_endpoints_report_ok() {
        let app = build_router(test_state("http://unused.invalid"));

        for uri in ["/health", "/healthz"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["status"], "ok");
        }
    }

    #[tokio::test]
    async fn api_routes_are_reachable_under_the_api_prefix() {
        let app = build_router(test_state("http://unused.invalid"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/summary")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"title":"Bitcoin news","content":"text","sourceType":"twitter"}"#,
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["summary"].as_str().unwrap().starts_with("TLDR:"));
    }

    #[tokio::test]
    async fn unknown_routes_fall_through_to_404() {
        let app = build_router(test_state("http://unused.invalid"));

        let request = Request::builder().uri("/api/nope").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
