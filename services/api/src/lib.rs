mod cli;
mod infra;
mod preview;
mod routes;
mod server;

use shift_report::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
