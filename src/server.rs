//! HTTP surface for the aggregator: one search endpoint.
//!
//! `GET /search?q=…` returns the combined `{highlights, items}` payload.
//! A missing or empty query is a 400; any unexpected internal failure is
//! a 500 carrying the error message. The caller always receives a
//! well-formed JSON body.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::config::AggregatorConfig;
use crate::types::SearchResponse;

/// Shared state for the aggregation endpoint.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AggregatorConfig>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Build the router exposing `GET /search`.
pub fn router(config: AggregatorConfig) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .with_state(AppState {
            config: Arc::new(config),
        })
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<serde_json::Value>)> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing query" })),
        ));
    }

    match crate::aggregate(query, &state.config).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            tracing::error!(error = %err, "aggregation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(config: AggregatorConfig) -> AppState {
        AppState {
            config: Arc::new(config),
        }
    }

    #[tokio::test]
    async fn missing_query_is_bad_request() {
        let result = search_handler(
            State(state(AggregatorConfig::default())),
            Query(SearchParams { q: None }),
        )
        .await;
        let (status, Json(body)) = result.expect_err("should be rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing query");
    }

    #[tokio::test]
    async fn blank_query_is_bad_request() {
        let result = search_handler(
            State(state(AggregatorConfig::default())),
            Query(SearchParams {
                q: Some("   ".into()),
            }),
        )
        .await;
        let (status, _) = result.expect_err("should be rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn internal_failure_is_server_error() {
        // An invalid config makes aggregation fail before any network I/O.
        let config = AggregatorConfig {
            providers: vec![],
            ..Default::default()
        };
        let result = search_handler(
            State(state(config)),
            Query(SearchParams {
                q: Some("giraffe".into()),
            }),
        )
        .await;
        let (status, Json(body)) = result.expect_err("should fail");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("provider"));
    }
}
