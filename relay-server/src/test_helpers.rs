//! Shared helpers for handler tests.

use axum::response::Response;
use relay_core::search::SearchConfig;
use serde_json::Value;

use crate::state::AppState;

pub fn test_state(search_base_url: &str) -> AppState {
    let config = SearchConfig {
        api_key: "test-key".to_string(),
        base_url: search_base_url.to_string(),
        num_results: 10,
    };
    AppState::with_client(reqwest::Client::new(), config)
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
