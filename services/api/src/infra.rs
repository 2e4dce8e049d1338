use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use shift_report::sheets::{SheetError, SheetGateway, SheetRow};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Spreadsheet stand-in used by `serve --dry-run`.
#[derive(Default, Clone)]
pub(crate) struct InMemorySheetStore {
    tables: Arc<Mutex<BTreeMap<String, Vec<SheetRow>>>>,
}

#[async_trait]
impl SheetGateway for InMemorySheetStore {
    async fn append_rows(&self, table: &str, rows: Vec<SheetRow>) -> Result<(), SheetError> {
        let mut guard = self.tables.lock().expect("sheet store mutex poisoned");
        info!(table, rows = rows.len(), "dry run: rows kept in memory");
        guard.entry(table.to_string()).or_default().extend(rows);
        Ok(())
    }
}

impl InMemorySheetStore {
    #[cfg(test)]
    pub(crate) fn rows(&self, table: &str) -> Vec<SheetRow> {
        self.tables
            .lock()
            .expect("sheet store mutex poisoned")
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}
