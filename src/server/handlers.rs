//! HTTP handlers.

use super::intake::validate_body;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::orchestrator::Orchestrator;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use std::sync::Arc;
use tracing::debug;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// `GET /` - the static analyzer page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// `POST /analyze` - run the verifier on the submitted protocol.
///
/// Always answers 200; callers inspect `success`.
pub async fn analyze(
    State(orchestrator): State<Arc<Orchestrator>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Json<AnalysisResult> {
    let result = match validate_body(body) {
        Ok(code) => orchestrator.analyze(&code).await,
        Err(e) => {
            debug!("Rejected analysis request: {}", e);
            AnalysisResult::failure(e.to_string())
        }
    };

    Json(result)
}
