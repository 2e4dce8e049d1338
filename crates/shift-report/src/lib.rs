pub mod config;
pub mod error;
pub mod sheets;
pub mod submissions;
pub mod telemetry;
