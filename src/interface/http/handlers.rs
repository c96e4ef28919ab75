//! 라우트 핸들러.

use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use super::AppState;
use crate::application::error::GatewayError;
use crate::application::usecases::resolve_session::ResolveSessionUseCase;
use crate::domain::session::SessionQuery;

const GENERATE_FAILED: &str = "Failed to generate review";

#[derive(Debug, Deserialize)]
struct GenerateBody {
    #[serde(default)]
    prompt: String,
}

#[derive(Debug, Serialize)]
struct GenerateReply {
    review: String,
}

fn failure(status: StatusCode, details: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "error": GENERATE_FAILED, "details": details.into() })),
    )
        .into_response()
}

pub(super) async fn generate_review(State(state): State<AppState>, body: Bytes) -> Response {
    let request: GenerateBody = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "unreadable generate-review body");
            return failure(StatusCode::BAD_REQUEST, format!("invalid request body: {err}"));
        }
    };

    match state.gateway.generate(&request.prompt).await {
        Ok(review) => {
            info!(chars = review.len(), "review generated");
            (StatusCode::OK, Json(GenerateReply { review })).into_response()
        }
        Err(err @ GatewayError::InvalidArgument(_)) => {
            warn!(error = %err, "rejected generate-review request");
            failure(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err @ GatewayError::Service(_)) => {
            error!(error = %err, "review generation failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

pub(super) async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub(super) async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

pub(super) async fn list_resorts(State(state): State<AppState>) -> Response {
    Json(state.catalog.list_resorts()).into_response()
}

pub(super) async fn resolve_resort(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let query = SessionQuery::from_pairs(&params);
    let session = ResolveSessionUseCase {
        catalog: &state.catalog,
    }
    .execute(&query);
    Json(session).into_response()
}
