use axum::http::StatusCode;
use axum::Json;

use super::summary::{generate_summary, SummaryBody};
use crate::test_helpers::body_json;

#[tokio::test]
async fn missing_title_or_content_is_rejected() {
    let cases = [
        SummaryBody { title: String::new(), content: "text".into(), source_type: None },
        SummaryBody { title: "title".into(), content: String::new(), source_type: None },
    ];

    for body in cases {
        let response = generate_summary(Json(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope = body_json(response).await;
        assert_eq!(envelope["error"], "Title and content are required");
    }
}

#[tokio::test]
async fn twitter_source_gets_the_tweet_template() {
    let body = SummaryBody {
        title: "Bitcoin breaks out".into(),
        content: "thread...".into(),
        source_type: Some("twitter".into()),
    };
    let response = generate_summary(Json(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = body_json(response).await;
    let summary = envelope["summary"].as_str().unwrap();
    assert!(summary.starts_with("TLDR: This tweet discusses Bitcoin price movements"));
}

#[tokio::test]
async fn unknown_source_falls_back_to_the_article_template() {
    let body = SummaryBody {
        title: "bear market deepens".into(),
        content: "article...".into(),
        source_type: None,
    };
    let response = generate_summary(Json(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = body_json(response).await;
    assert!(envelope["summary"].as_str().unwrap().contains("possible downward pressure"));
}
