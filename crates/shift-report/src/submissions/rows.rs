use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::domain::FormType;
use crate::config::TableNames;
use crate::sheets::SheetRow;

/// Parent record written once per submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRow {
    pub id: Uuid,
    pub crew_type: FormType,
    pub crew_id: Value,
    pub shift_start_time: Value,
    pub created_at: DateTime<Utc>,
    pub details: ShiftDetails,
}

/// Columns that only one crew type fills in.
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftDetails {
    Radar {
        rls_id: Value,
        rls_position: Value,
        rls_type: Option<Value>,
        sector: Option<Value>,
    },
    Interceptor {
        takeoff_point: Value,
        board_number: Option<Value>,
    },
}

impl ShiftRow {
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "crew_type",
        "crew_id",
        "shift_start_time",
        "created_at",
        "rls_id",
        "rls_position",
        "rls_type",
        "sector",
        "takeoff_point",
        "board_number",
    ];

    pub fn to_sheet_row(&self) -> SheetRow {
        let mut row = SheetRow::new();
        row.set("id", self.id.to_string())
            .set("crew_type", self.crew_type.as_str())
            .set("crew_id", self.crew_id.clone())
            .set("shift_start_time", self.shift_start_time.clone())
            .set(
                "created_at",
                self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            );

        match &self.details {
            ShiftDetails::Radar {
                rls_id,
                rls_position,
                rls_type,
                sector,
            } => {
                row.set("rls_id", rls_id.clone())
                    .set("rls_position", rls_position.clone())
                    .set_optional("rls_type", rls_type.clone())
                    .set_optional("sector", sector.clone());
            }
            ShiftDetails::Interceptor {
                takeoff_point,
                board_number,
            } => {
                row.set("takeoff_point", takeoff_point.clone())
                    .set_optional("board_number", board_number.clone());
            }
        }

        row
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarTargetRow {
    pub unique_target_id: Value,
    pub shift_id: Uuid,
    pub turn_number: Value,
    pub rada_number: Value,
    pub entry_time: Value,
    pub target_type: Value,
    pub is_hit: Value,
    pub on_radar_edge: Value,
    pub video_link: Value,
}

impl RadarTargetRow {
    pub const COLUMNS: &'static [&'static str] = &[
        "unique_target_id",
        "shift_id",
        "turn_number",
        "rada_number",
        "entry_time",
        "target_type",
        "is_hit",
        "on_radar_edge",
        "video_link",
    ];

    pub fn to_sheet_row(&self) -> SheetRow {
        let mut row = SheetRow::new();
        row.set("unique_target_id", self.unique_target_id.clone())
            .set("shift_id", self.shift_id.to_string())
            .set("turn_number", self.turn_number.clone())
            .set("rada_number", self.rada_number.clone())
            .set("entry_time", self.entry_time.clone())
            .set("target_type", self.target_type.clone())
            .set("is_hit", self.is_hit.clone())
            .set("on_radar_edge", self.on_radar_edge.clone())
            .set("video_link", self.video_link.clone());
        row
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterceptorSortieRow {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub target_id_to_intercept: Value,
    pub takeoff_time: Value,
    pub target_type: Value,
    pub hit_success: Value,
    pub warhead_triggered: Value,
    pub target_destroyed: Value,
    pub target_status: Value,
    pub board_status: Value,
    pub target_coordinates: Value,
    pub video_link: Value,
}

impl InterceptorSortieRow {
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "shift_id",
        "target_id_to_intercept",
        "takeoff_time",
        "target_type",
        "hit_success",
        "warhead_triggered",
        "target_destroyed",
        "target_status",
        "board_status",
        "target_coordinates",
        "video_link",
    ];

    pub fn to_sheet_row(&self) -> SheetRow {
        let mut row = SheetRow::new();
        row.set("id", self.id.to_string())
            .set("shift_id", self.shift_id.to_string())
            .set("target_id_to_intercept", self.target_id_to_intercept.clone())
            .set("takeoff_time", self.takeoff_time.clone())
            .set("target_type", self.target_type.clone())
            .set("hit_success", self.hit_success.clone())
            .set("warhead_triggered", self.warhead_triggered.clone())
            .set("target_destroyed", self.target_destroyed.clone())
            .set("target_status", self.target_status.clone())
            .set("board_status", self.board_status.clone())
            .set("target_coordinates", self.target_coordinates.clone())
            .set("video_link", self.video_link.clone());
        row
    }
}

/// Child table a submission writes to after its shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildTable {
    RadarTargets,
    InterceptorSorties,
}

impl ChildTable {
    pub fn title(self, tables: &TableNames) -> &str {
        match self {
            ChildTable::RadarTargets => &tables.radar_targets,
            ChildTable::InterceptorSorties => &tables.interceptor_sorties,
        }
    }

    /// Plural noun used in operator-facing messages.
    pub fn noun(self) -> &'static str {
        match self {
            ChildTable::RadarTargets => "targets",
            ChildTable::InterceptorSorties => "sorties",
        }
    }
}

/// Child rows of one submission; a single submission never mixes kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildRows {
    RadarTargets(Vec<RadarTargetRow>),
    InterceptorSorties(Vec<InterceptorSortieRow>),
}

impl ChildRows {
    pub fn table(&self) -> ChildTable {
        match self {
            ChildRows::RadarTargets(_) => ChildTable::RadarTargets,
            ChildRows::InterceptorSorties(_) => ChildTable::InterceptorSorties,
        }
    }

    pub fn shift_ids(&self) -> Vec<Uuid> {
        match self {
            ChildRows::RadarTargets(rows) => rows.iter().map(|row| row.shift_id).collect(),
            ChildRows::InterceptorSorties(rows) => rows.iter().map(|row| row.shift_id).collect(),
        }
    }

    pub fn to_sheet_rows(&self) -> Vec<SheetRow> {
        match self {
            ChildRows::RadarTargets(rows) => rows.iter().map(RadarTargetRow::to_sheet_row).collect(),
            ChildRows::InterceptorSorties(rows) => {
                rows.iter().map(InterceptorSortieRow::to_sheet_row).collect()
            }
        }
    }
}

/// Parent row plus its children, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedSubmission {
    pub shift: ShiftRow,
    pub children: ChildRows,
}
