use serde::de::DeserializeOwned;
use serde_json::Value;

use super::domain::{
    FormType, InterceptorSubmission, RadarSubmission, RawSubmission, Submission,
};

/// Reasons a submission is rejected before any row is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("formType is required")]
    MissingFormType,
    #[error("unknown formType '{0}' (expected 'rls' or 'interceptor')")]
    UnknownFormType(String),
    #[error("shiftData is required")]
    MissingShiftData,
    #[error("shiftData must be an object: {0}")]
    MalformedShiftData(String),
    #[error("no {field} to record for formType '{form_type}'")]
    NoRecords {
        form_type: FormType,
        field: &'static str,
    },
    #[error("{field} must be a list")]
    RecordsNotAList { field: &'static str },
    #[error("{field}[{index}] must be an object: {reason}")]
    MalformedRecord {
        field: &'static str,
        index: usize,
        reason: String,
    },
    #[error("request body is not a valid submission: {0}")]
    MalformedBody(String),
}

/// Checks presence of the form type, the shift and the records that belong to
/// it, and resolves the payload into its typed variant.
///
/// Individual field values are not inspected; whatever the form posted is
/// carried through to the mapper. Members the form type does not use (for
/// example `sortiesData` on a radar report) are ignored.
pub fn validate(raw: RawSubmission) -> Result<Submission, ValidationError> {
    let RawSubmission {
        form_type,
        shift_data,
        targets_data,
        sorties_data,
    } = raw;

    let form_type = match form_type.as_deref() {
        None => return Err(ValidationError::MissingFormType),
        Some(value) if value.trim().is_empty() => return Err(ValidationError::MissingFormType),
        Some(value) => value.parse::<FormType>()?,
    };

    let shift_data = match shift_data {
        None | Some(Value::Null) => return Err(ValidationError::MissingShiftData),
        Some(value) => value,
    };

    match form_type {
        FormType::Rls => {
            let targets = parse_records(form_type, targets_data)?;
            let shift = parse_shift(shift_data)?;
            Ok(Submission::Radar(RadarSubmission { shift, targets }))
        }
        FormType::Interceptor => {
            let sorties = parse_records(form_type, sorties_data)?;
            let shift = parse_shift(shift_data)?;
            Ok(Submission::Interceptor(InterceptorSubmission { shift, sorties }))
        }
    }
}

fn parse_shift<T: DeserializeOwned>(value: Value) -> Result<T, ValidationError> {
    if !value.is_object() {
        return Err(ValidationError::MalformedShiftData(
            "expected a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|err| ValidationError::MalformedShiftData(err.to_string()))
}

fn parse_records<T: DeserializeOwned>(
    form_type: FormType,
    value: Option<Value>,
) -> Result<Vec<T>, ValidationError> {
    let field = form_type.records_field();
    let items = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::RecordsNotAList { field }),
    };

    if items.is_empty() {
        return Err(ValidationError::NoRecords { form_type, field });
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ValidationError::MalformedRecord {
                    field,
                    index,
                    reason: "expected a JSON object".to_string(),
                });
            }
            serde_json::from_value(item).map_err(|err| ValidationError::MalformedRecord {
                field,
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}
