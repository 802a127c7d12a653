//! Request handlers.

use super::{ApiError, AppState};
use crate::domain::ChannelKind;
use crate::error::AggregateFailure;
use crate::metrics::MetricsSummary;
use crate::models::{DispatchOutcome, DispatchResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Per-send entry in the response body.
#[derive(Debug, Serialize)]
pub struct OutcomeView {
    pub channel: ChannelKind,
    pub contact: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DispatchOutcome> for OutcomeView {
    fn from(outcome: &DispatchOutcome) -> Self {
        Self {
            channel: outcome.kind,
            contact: outcome.contact.to_string(),
            success: outcome.is_success(),
            error: outcome.failure_reason().map(|r| r.to_string()),
        }
    }
}

/// Body of a 200 response to `POST /send-sos`.
#[derive(Debug, Serialize)]
pub struct SosResponse {
    pub success: bool,
    pub message: String,
    pub outcomes: Vec<OutcomeView>,
    /// Failures of individual sends when delivery was partial
    pub errors: Vec<String>,
}

impl SosResponse {
    fn from_result(result: DispatchResult) -> Self {
        let channels: Vec<&str> = result
            .delivered_channels()
            .iter()
            .map(ChannelKind::as_str)
            .collect();
        let message = if result.error_summary.is_empty() {
            format!("SOS sent via {}", channels.join(" & "))
        } else {
            format!(
                "SOS sent via {} with {} failed attempt(s)",
                channels.join(" & "),
                result.error_summary.len()
            )
        };

        Self {
            success: true,
            message,
            outcomes: result.outcomes.iter().map(OutcomeView::from).collect(),
            errors: result.error_summary,
        }
    }
}

/// `POST /send-sos`
pub async fn send_sos(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SosResponse>, ApiError> {
    let Json(raw) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = state.validator.validate(&raw)?;

    let result = state.dispatcher.dispatch(&request).await;

    if !result.overall_success {
        return Err(ApiError::DeliveryFailed {
            failure: AggregateFailure {
                failures: result.failure_count(),
            },
            result,
        });
    }

    tracing::info!(
        succeeded = result.success_count(),
        failures = result.failure_count(),
        "SOS sent"
    );
    Ok(Json(SosResponse::from_result(result)))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub channels: Vec<ChannelKind>,
    pub metrics: MetricsSummary,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        channels: state.dispatcher.registry().enabled_kinds(),
        metrics: state.metrics.summary(),
    })
}
