//! Shift-report intake: validates form submissions and translates them into a
//! shift row plus its radar-target or interceptor-sortie rows.

pub mod domain;
pub mod mapping;
pub mod router;
pub mod rows;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    FormType, InterceptorShiftData, InterceptorSortieInput, InterceptorSubmission,
    RadarShiftData, RadarSubmission, RadarTargetInput, RawSubmission, Submission,
};
pub use mapping::map_submission;
pub use router::{submission_router, SubmissionResponse};
pub use rows::{
    ChildRows, ChildTable, InterceptorSortieRow, MappedSubmission, RadarTargetRow, ShiftDetails,
    ShiftRow,
};
pub use service::{SubmissionError, SubmissionReceipt, SubmissionService};
pub use validation::{validate, ValidationError};
