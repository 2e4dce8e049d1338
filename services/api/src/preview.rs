use chrono::Utc;
use clap::Args;
use serde::Serialize;
use shift_report::config::{AppConfig, TableNames};
use shift_report::error::AppError;
use shift_report::sheets::SheetRow;
use shift_report::submissions::{map_submission, validate, MappedSubmission, RawSubmission};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// JSON file holding a `POST /submit` body
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Debug, Serialize)]
pub(crate) struct TableWrite<'a> {
    pub(crate) table: &'a str,
    pub(crate) rows: Vec<SheetRow>,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let payload = std::fs::read_to_string(&args.file)?;
    let raw: RawSubmission = serde_json::from_str(&payload)?;
    let tables = AppConfig::load()?.tables;

    let mapped = map_submission(validate(raw)?, Utc::now());
    let writes = planned_writes(&mapped, &tables);

    println!("{}", serde_json::to_string_pretty(&writes)?);
    Ok(())
}

/// Writes in the order the service performs them.
pub(crate) fn planned_writes<'a>(
    mapped: &MappedSubmission,
    tables: &'a TableNames,
) -> Vec<TableWrite<'a>> {
    vec![
        TableWrite {
            table: &tables.shifts,
            rows: vec![mapped.shift.to_sheet_row()],
        },
        TableWrite {
            table: mapped.children.table().title(tables),
            rows: mapped.children.to_sheet_rows(),
        },
    ]
}
