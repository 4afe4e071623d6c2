use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Reasons a lead submission is not accepted.
#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email")]
    InvalidEmail,
    /// Only produced under the strict persistence policy.
    #[error("Failed to store lead")]
    Persistence(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl LeadError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::MissingFields | Self::InvalidEmail => {
                StatusCode::BAD_REQUEST
            }
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        let body = ErrorMessage {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
