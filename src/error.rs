use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Trip not found: {0}")]
    TripNotFound(String),

    #[error("Failed to load {name}: {reason}")]
    Catalog { name: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] mongodb::error::Error),
}

impl ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::InvalidDateRange(_) | PlannerError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            PlannerError::TripNotFound(_) => StatusCode::NOT_FOUND,
            PlannerError::Catalog { .. } | PlannerError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
