use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySheetStore};
use crate::routes::with_submission_routes;
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use shift_report::config::{AppConfig, ConfigError, SheetsConfig, TableNames};
use shift_report::error::AppError;
use shift_report::sheets::{GoogleSheetsClient, SheetGateway};
use shift_report::submissions::SubmissionService;
use shift_report::telemetry;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let static_dir = config.server.static_dir.as_path();
    let app = match select_store(&config, args.dry_run)? {
        StoreChoice::Sheets(sheets) => {
            let client = GoogleSheetsClient::connect(sheets).await?;
            info!(spreadsheet_id = client.spreadsheet_id(), "writing submissions to Google Sheets");
            build_app(Arc::new(client), &config.tables, app_state, static_dir)
        }
        StoreChoice::InMemory => {
            warn!("dry run: submissions are kept in memory and never reach the spreadsheet");
            build_app(
                Arc::new(InMemorySheetStore::default()),
                &config.tables,
                app_state,
                static_dir,
            )
        }
    }
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "shift report intake ready");

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug)]
enum StoreChoice<'a> {
    Sheets(&'a SheetsConfig),
    InMemory,
}

/// The in-memory store is only used when asked for; otherwise missing
/// credentials stop the server before it binds.
fn select_store(config: &AppConfig, dry_run: bool) -> Result<StoreChoice<'_>, ConfigError> {
    if dry_run {
        return Ok(StoreChoice::InMemory);
    }
    config.require_sheets().map(StoreChoice::Sheets)
}

fn build_app<G>(gateway: Arc<G>, tables: &TableNames, state: AppState, static_dir: &Path) -> Router
where
    G: SheetGateway + 'static,
{
    let service = Arc::new(SubmissionService::new(gateway, tables.clone()));
    with_submission_routes(service, state, static_dir)
}
