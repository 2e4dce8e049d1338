use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::domain::RawSubmission;
use super::service::{SubmissionError, SubmissionService};
use super::validation::ValidationError;
use crate::sheets::SheetGateway;

/// Body returned by `POST /submit` for both outcomes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<Uuid>,
}

/// Router builder exposing the form submission endpoint.
pub fn submission_router<G>(service: Arc<SubmissionService<G>>) -> Router
where
    G: SheetGateway + 'static,
{
    Router::new()
        .route("/submit", post(submit_handler::<G>))
        .with_state(service)
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<SubmissionService<G>>>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, SubmissionError>
where
    G: SheetGateway + 'static,
{
    let Json(raw) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected unreadable submission body");
        ValidationError::MalformedBody(rejection.body_text())
    })?;

    let receipt = service.submit(raw).await?;
    Ok(Json(SubmissionResponse {
        status: "success",
        message: receipt.message(),
        shift_id: Some(receipt.shift_id),
    }))
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            SubmissionError::Validation(_) => self.to_string(),
            _ => format!("Server error: {self}"),
        };
        let body = SubmissionResponse {
            status: "error",
            message,
            shift_id: self.orphaned_shift(),
        };

        (status, Json(body)).into_response()
    }
}
