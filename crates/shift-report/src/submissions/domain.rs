use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::ValidationError;

/// Crew kind selecting which child table a submission writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    /// Radar (RLS) crew reporting observed targets.
    Rls,
    /// Interceptor crew reporting sorties.
    Interceptor,
}

impl FormType {
    pub fn as_str(self) -> &'static str {
        match self {
            FormType::Rls => "rls",
            FormType::Interceptor => "interceptor",
        }
    }

    /// JSON member carrying this form's child records.
    pub fn records_field(self) -> &'static str {
        match self {
            FormType::Rls => "targetsData",
            FormType::Interceptor => "sortiesData",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "rls" => Ok(FormType::Rls),
            "interceptor" => Ok(FormType::Interceptor),
            other => Err(ValidationError::UnknownFormType(other.to_string())),
        }
    }
}

/// Body of `POST /submit` exactly as the form posts it.
///
/// Every member is optional so that missing pieces are reported as validation
/// failures instead of deserialization errors. The data sequences stay untyped
/// until the form type is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    #[serde(default)]
    pub form_type: Option<String>,
    #[serde(default)]
    pub shift_data: Option<Value>,
    #[serde(default)]
    pub targets_data: Option<Value>,
    #[serde(default)]
    pub sorties_data: Option<Value>,
}

/// Shift fields posted by a radar crew. Values are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarShiftData {
    #[serde(default)]
    pub crew_id: Value,
    #[serde(default)]
    pub shift_start_time: Value,
    #[serde(default)]
    pub rls_id: Value,
    #[serde(default)]
    pub rls_position: Value,
    #[serde(default)]
    pub rls_type: Option<Value>,
    #[serde(default)]
    pub sector: Option<Value>,
}

/// Shift fields posted by an interceptor crew.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptorShiftData {
    #[serde(default)]
    pub crew_id: Value,
    #[serde(default)]
    pub shift_start_time: Value,
    #[serde(default)]
    pub takeoff_point: Value,
    /// `None` when the form did not record a board number.
    #[serde(default)]
    pub board_number: Option<Value>,
}

/// One element of `targetsData`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarTargetInput {
    /// Correlates with the external detection log, so it is never regenerated.
    #[serde(default)]
    pub unique_id: Value,
    #[serde(default)]
    pub turn_number: Value,
    #[serde(default)]
    pub rada_target_number: Value,
    #[serde(default)]
    pub radar_entry_time: Value,
    #[serde(default, rename = "type")]
    pub target_type: Value,
    #[serde(default)]
    pub is_hit: Value,
    #[serde(default)]
    pub on_radar_edge: Value,
    #[serde(default)]
    pub kill_video_link: Value,
}

/// One element of `sortiesData`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptorSortieInput {
    #[serde(default)]
    pub target_id_to_intercept: Value,
    #[serde(default)]
    pub takeoff_time: Value,
    #[serde(default)]
    pub target_type: Value,
    #[serde(default)]
    pub hit_success: Value,
    #[serde(default)]
    pub warhead_triggered: Value,
    #[serde(default)]
    pub target_destroyed: Value,
    #[serde(default)]
    pub target_status: Value,
    #[serde(default)]
    pub board_status: Value,
    #[serde(default)]
    pub target_coordinates: Value,
    #[serde(default)]
    pub video_link: Value,
}

/// A submission that passed validation. Each variant carries at least one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Radar(RadarSubmission),
    Interceptor(InterceptorSubmission),
}

impl Submission {
    pub fn form_type(&self) -> FormType {
        match self {
            Submission::Radar(_) => FormType::Rls,
            Submission::Interceptor(_) => FormType::Interceptor,
        }
    }

    pub fn record_count(&self) -> usize {
        match self {
            Submission::Radar(radar) => radar.targets.len(),
            Submission::Interceptor(interceptor) => interceptor.sorties.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSubmission {
    pub(crate) shift: RadarShiftData,
    pub(crate) targets: Vec<RadarTargetInput>,
}

impl RadarSubmission {
    pub fn shift(&self) -> &RadarShiftData {
        &self.shift
    }

    pub fn targets(&self) -> &[RadarTargetInput] {
        &self.targets
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterceptorSubmission {
    pub(crate) shift: InterceptorShiftData,
    pub(crate) sorties: Vec<InterceptorSortieInput>,
}

impl InterceptorSubmission {
    pub fn shift(&self) -> &InterceptorShiftData {
        &self.shift
    }

    pub fn sorties(&self) -> &[InterceptorSortieInput] {
        &self.sorties
    }
}
