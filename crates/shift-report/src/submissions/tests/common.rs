use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::config::TableNames;
use crate::sheets::{SheetError, SheetGateway, SheetRow};
use crate::submissions::{submission_router, RawSubmission, SubmissionService};

/// Gateway that records every append in call order.
#[derive(Default)]
pub(super) struct RecordingGateway {
    writes: Mutex<Vec<(String, Vec<SheetRow>)>>,
}

impl RecordingGateway {
    pub(super) fn writes(&self) -> Vec<(String, Vec<SheetRow>)> {
        self.writes.lock().expect("writes mutex").clone()
    }

    pub(super) fn rows(&self, table: &str) -> Vec<SheetRow> {
        self.writes()
            .into_iter()
            .filter(|(name, _)| name == table)
            .flat_map(|(_, rows)| rows)
            .collect()
    }
}

#[async_trait]
impl SheetGateway for RecordingGateway {
    async fn append_rows(&self, table: &str, rows: Vec<SheetRow>) -> Result<(), SheetError> {
        let mut guard = self.writes.lock().expect("writes mutex");
        guard.push((table.to_string(), rows));
        Ok(())
    }
}

/// Gateway that accepts writes except to one table.
pub(super) struct FailingGateway {
    failing_table: String,
    inner: RecordingGateway,
}

impl FailingGateway {
    pub(super) fn on(table: &str) -> Self {
        Self {
            failing_table: table.to_string(),
            inner: RecordingGateway::default(),
        }
    }

    pub(super) fn writes(&self) -> Vec<(String, Vec<SheetRow>)> {
        self.inner.writes()
    }
}

#[async_trait]
impl SheetGateway for FailingGateway {
    async fn append_rows(&self, table: &str, rows: Vec<SheetRow>) -> Result<(), SheetError> {
        if table == self.failing_table {
            return Err(SheetError::Backend("quota exceeded".to_string()));
        }
        self.inner.append_rows(table, rows).await
    }
}

pub(super) fn radar_payload() -> Value {
    json!({
        "formType": "rls",
        "shiftData": {
            "crewId": "A1",
            "shiftStartTime": "2024-01-01T00:00",
            "rlsId": "R7",
            "rlsPosition": "N50"
        },
        "targetsData": [
            {
                "uniqueId": "T1",
                "turnNumber": 3,
                "radaTargetNumber": "55",
                "radarEntryTime": "2024-01-01T00:12",
                "type": "drone",
                "isHit": true,
                "onRadarEdge": false,
                "killVideoLink": ""
            }
        ]
    })
}

pub(super) fn interceptor_payload() -> Value {
    json!({
        "formType": "interceptor",
        "shiftData": {
            "crewId": "I4",
            "shiftStartTime": "2024-01-02T18:00",
            "takeoffPoint": "Field-2",
            "boardNumber": "B-12"
        },
        "sortiesData": [
            {
                "targetIdToIntercept": "T1",
                "takeoffTime": "2024-01-02T18:40",
                "targetType": "drone",
                "hitSuccess": true,
                "warheadTriggered": true,
                "targetDestroyed": true,
                "targetStatus": "destroyed",
                "boardStatus": "returned",
                "targetCoordinates": "50.45,30.52",
                "videoLink": "https://video.example/clip-1"
            },
            {
                "targetIdToIntercept": "T2",
                "takeoffTime": "2024-01-02T19:05",
                "targetType": "drone",
                "hitSuccess": false,
                "warheadTriggered": false,
                "targetDestroyed": false,
                "targetStatus": "missed",
                "boardStatus": "returned",
                "targetCoordinates": "50.40,30.60"
            }
        ]
    })
}

pub(super) fn raw(payload: Value) -> RawSubmission {
    serde_json::from_value(payload).expect("payload deserializes")
}

pub(super) fn service_with<G: SheetGateway + 'static>(gateway: Arc<G>) -> SubmissionService<G> {
    SubmissionService::new(gateway, TableNames::default())
}

pub(super) fn router_with<G: SheetGateway + 'static>(gateway: Arc<G>) -> axum::Router {
    submission_router(Arc::new(service_with(gateway)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
