//! End-to-end scenarios for the shift-report intake through the public service
//! facade and HTTP router, with an in-process store standing in for the spreadsheet.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use shift_report::config::TableNames;
use shift_report::sheets::{SheetError, SheetGateway, SheetRow};
use shift_report::submissions::{submission_router, RawSubmission, SubmissionService};

#[derive(Default)]
struct SpreadsheetDouble {
    tables: Mutex<BTreeMap<String, Vec<SheetRow>>>,
}

impl SpreadsheetDouble {
    fn table(&self, name: &str) -> Vec<SheetRow> {
        self.tables
            .lock()
            .expect("tables mutex")
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SheetGateway for SpreadsheetDouble {
    async fn append_rows(&self, table: &str, rows: Vec<SheetRow>) -> Result<(), SheetError> {
        let mut guard = self.tables.lock().expect("tables mutex");
        guard.entry(table.to_string()).or_default().extend(rows);
        Ok(())
    }
}

fn example_radar_report() -> Value {
    json!({
        "formType": "rls",
        "shiftData": {
            "crewId": "A1",
            "shiftStartTime": "2024-01-01T00:00",
            "rlsId": "R7",
            "rlsPosition": "N50"
        },
        "targetsData": [{
            "uniqueId": "T1",
            "turnNumber": 3,
            "radaTargetNumber": "55",
            "radarEntryTime": "2024-01-01T00:07",
            "type": "drone",
            "isHit": true,
            "onRadarEdge": false,
            "killVideoLink": ""
        }]
    })
}

async fn post_json(router: axum::Router, body: &Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post("/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn radar_report_lands_in_shift_and_target_tables() {
    let store = Arc::new(SpreadsheetDouble::default());
    let service = Arc::new(SubmissionService::new(store.clone(), TableNames::default()));

    let (status, body) = post_json(submission_router(service), &example_radar_report()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let shifts = store.table("shifts");
    assert_eq!(shifts.len(), 1);
    let shift = &shifts[0];
    assert_eq!(shift.get("crew_type"), Some(&json!("rls")));
    assert_eq!(shift.get("crew_id"), Some(&json!("A1")));
    assert_eq!(shift.get("shift_start_time"), Some(&json!("2024-01-01T00:00")));
    assert_eq!(shift.get("rls_id"), Some(&json!("R7")));
    assert_eq!(shift.get("rls_position"), Some(&json!("N50")));
    assert!(shift.contains("created_at"));

    let targets = store.table("radar_targets");
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].get("unique_target_id"), Some(&json!("T1")));
    assert_eq!(targets[0].get("shift_id"), shift.get("id"));
    assert_eq!(targets[0].get("is_hit"), Some(&json!(true)));
    assert_eq!(targets[0].get("turn_number"), Some(&json!(3)));
}

#[tokio::test]
async fn repeated_reports_create_separate_shifts() {
    let store = Arc::new(SpreadsheetDouble::default());
    let service = SubmissionService::new(store.clone(), TableNames::default());

    for _ in 0..2 {
        let raw: RawSubmission =
            serde_json::from_value(example_radar_report()).expect("payload deserializes");
        service.submit(raw).await.expect("submission succeeds");
    }

    let shifts = store.table("shifts");
    assert_eq!(shifts.len(), 2);
    assert_ne!(shifts[0].get("id"), shifts[1].get("id"));

    let targets = store.table("radar_targets");
    assert_eq!(targets[0].get("shift_id"), shifts[0].get("id"));
    assert_eq!(targets[1].get("shift_id"), shifts[1].get("id"));
}

#[tokio::test]
async fn interceptor_report_without_board_number_leaves_column_unset() {
    let store = Arc::new(SpreadsheetDouble::default());
    let service = Arc::new(SubmissionService::new(store.clone(), TableNames::default()));
    let report = json!({
        "formType": "interceptor",
        "shiftData": { "crewId": "I4", "shiftStartTime": "2024-01-02T18:00", "takeoffPoint": "Field-2" },
        "sortiesData": [{ "targetIdToIntercept": "T1", "hitSuccess": true }]
    });

    let (status, body) = post_json(submission_router(service), &report).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Report submitted. Added 1 sorties.");
    let shift = &store.table("shifts")[0];
    assert!(!shift.contains("board_number"));
    assert_eq!(shift.get("takeoff_point"), Some(&json!("Field-2")));

    let sorties = store.table("interceptor_sorties");
    assert_eq!(sorties[0].get("shift_id"), shift.get("id"));
    assert_ne!(sorties[0].get("id"), shift.get("id"));
}

#[tokio::test]
async fn rejected_reports_leave_the_spreadsheet_untouched() {
    let store = Arc::new(SpreadsheetDouble::default());
    let service = Arc::new(SubmissionService::new(store.clone(), TableNames::default()));

    let (status, body) = post_json(
        submission_router(service),
        &json!({ "formType": "rls", "shiftData": { "crewId": "A1" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(store.table("shifts").is_empty());
}
