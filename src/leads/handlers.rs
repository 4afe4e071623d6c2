use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{instrument, warn};

use crate::{
    errors::LeadError,
    leads::{
        dto::{LeadAck, LeadSubmission},
        repo_types::RequestMeta,
        services::intake,
    },
    state::AppState,
};

pub fn intake_routes() -> Router<AppState> {
    Router::new().route("/api/lead", post(submit_lead))
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

fn request_meta(headers: &HeaderMap) -> RequestMeta {
    RequestMeta {
        user_agent: header_text(headers, header::USER_AGENT.as_str()),
        ip: header_text(headers, "x-forwarded-for"),
    }
}

/// POST /api/lead — any content type, JSON body.
#[instrument(skip(state, headers, body))]
pub async fn submit_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LeadAck>, LeadError> {
    let submission = LeadSubmission::parse(&body).map_err(|e| {
        warn!(error = %e, "unparsable lead body");
        LeadError::InvalidRequest
    })?;

    intake(&state, submission, request_meta(&headers)).await?;
    Ok(Json(LeadAck { ok: true }))
}
