use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use super::domain::{FormType, RawSubmission};
use super::mapping::map_submission;
use super::rows::ChildTable;
use super::validation::{validate, ValidationError};
use crate::config::TableNames;
use crate::sheets::{SheetError, SheetGateway};

/// Runs a submission through validation, mapping and the two table writes.
pub struct SubmissionService<G> {
    gateway: Arc<G>,
    tables: TableNames,
}

impl<G> SubmissionService<G>
where
    G: SheetGateway + 'static,
{
    pub fn new(gateway: Arc<G>, tables: TableNames) -> Self {
        Self { gateway, tables }
    }

    /// Validate, map and persist one submission.
    ///
    /// The shift row is appended before the child rows and the two writes are
    /// not atomic. A failure on the second write is reported as
    /// [`SubmissionError::PartialWrite`] so the orphaned shift can be found.
    pub async fn submit(&self, raw: RawSubmission) -> Result<SubmissionReceipt, SubmissionError> {
        let submission = validate(raw)?;
        let form_type = submission.form_type();
        let mapped = map_submission(submission, Utc::now());

        let shift_id = mapped.shift.id;
        let table = mapped.children.table();
        let child_title = table.title(&self.tables);

        if let Err(source) = self
            .gateway
            .append_row(&self.tables.shifts, mapped.shift.to_sheet_row())
            .await
        {
            error!(%shift_id, %form_type, table = %self.tables.shifts, error = %source, "shift write failed");
            return Err(SubmissionError::ShiftWrite { source });
        }

        let rows = mapped.children.to_sheet_rows();
        let rows_written = rows.len();
        if let Err(source) = self.gateway.append_rows(child_title, rows).await {
            error!(%shift_id, %form_type, table = child_title, error = %source, "child rows write failed after shift was recorded");
            return Err(SubmissionError::PartialWrite {
                shift_id,
                table: child_title.to_string(),
                source,
            });
        }

        info!(%shift_id, %form_type, table = child_title, rows = rows_written, "submission recorded");

        Ok(SubmissionReceipt {
            shift_id,
            form_type,
            table,
            rows_written,
        })
    }
}

/// Outcome of a fully persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub shift_id: Uuid,
    pub form_type: FormType,
    pub table: ChildTable,
    pub rows_written: usize,
}

impl SubmissionReceipt {
    pub fn message(&self) -> String {
        format!(
            "Report submitted. Added {} {}.",
            self.rows_written,
            self.table.noun()
        )
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to record shift: {source}")]
    ShiftWrite { source: SheetError },
    #[error("shift {shift_id} was recorded but its rows could not be written to '{table}': {source}")]
    PartialWrite {
        shift_id: Uuid,
        table: String,
        source: SheetError,
    },
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmissionError::ShiftWrite { .. } | SubmissionError::PartialWrite { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Shift that exists in the store even though the submission failed.
    pub fn orphaned_shift(&self) -> Option<Uuid> {
        match self {
            SubmissionError::PartialWrite { shift_id, .. } => Some(*shift_id),
            SubmissionError::Validation(_) | SubmissionError::ShiftWrite { .. } => None,
        }
    }
}
