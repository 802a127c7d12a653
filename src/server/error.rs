use crate::domain::ValidationError;
use crate::error::AggregateFailure;
use crate::models::DispatchResult;
use crate::server::handlers::OutcomeView;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Request-level failures rendered as a JSON body with `success: false`.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not JSON or failed validation
    BadRequest(String),
    Validation(ValidationError),
    /// Every send in the cycle failed
    DeliveryFailed {
        failure: AggregateFailure,
        result: DispatchResult,
    },
}

#[derive(Serialize)]
struct BadRequestBody {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct DeliveryFailedBody {
    success: bool,
    error: String,
    outcomes: Vec<OutcomeView>,
    errors: Vec<String>,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                tracing::warn!("Rejected SOS request: {}", message);
                let body = BadRequestBody {
                    success: false,
                    message,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Validation(err) => {
                tracing::warn!("Rejected SOS request: {}", err);
                let body = BadRequestBody {
                    success: false,
                    message: err.public_message().to_string(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::DeliveryFailed { failure, result } => {
                tracing::error!("Error sending SOS: {}", failure);
                let body = DeliveryFailedBody {
                    success: false,
                    error: failure.to_string(),
                    outcomes: result.outcomes.iter().map(OutcomeView::from).collect(),
                    errors: result.error_summary,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
