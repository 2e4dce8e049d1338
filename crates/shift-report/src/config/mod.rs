use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v1/certs";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub tables: TableNames,
    /// Absent when the spreadsheet id or the service account key is not configured.
    pub sheets: Option<SheetsConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so tests can avoid
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = AppEnvironment::from_str(
            &lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .or_else(|| lookup("APP_PORT"))
            .unwrap_or_else(|| "3000".to_string())
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let static_dir =
            PathBuf::from(lookup("APP_STATIC_DIR").unwrap_or_else(|| "public".to_string()));

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let tables = TableNames {
            shifts: lookup("SHIFTS_SHEET").unwrap_or_else(|| TableNames::SHIFTS.to_string()),
            radar_targets: lookup("RADAR_TARGETS_SHEET")
                .unwrap_or_else(|| TableNames::RADAR_TARGETS.to_string()),
            interceptor_sorties: lookup("INTERCEPTOR_SORTIES_SHEET")
                .unwrap_or_else(|| TableNames::INTERCEPTOR_SORTIES.to_string()),
        };

        let sheets = SheetsConfig::from_lookup(&lookup);

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                static_dir,
            },
            telemetry: TelemetryConfig { log_level },
            tables,
            sheets,
        })
    }

    /// Spreadsheet settings for serving against the live store.
    pub fn require_sheets(&self) -> Result<&SheetsConfig, ConfigError> {
        self.sheets
            .as_ref()
            .ok_or(ConfigError::MissingSheetsCredentials)
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Sheet titles for the three tables a submission writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub shifts: String,
    pub radar_targets: String,
    pub interceptor_sorties: String,
}

impl TableNames {
    pub const SHIFTS: &'static str = "shifts";
    pub const RADAR_TARGETS: &'static str = "radar_targets";
    pub const INTERCEPTOR_SORTIES: &'static str = "interceptor_sorties";
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            shifts: Self::SHIFTS.to_string(),
            radar_targets: Self::RADAR_TARGETS.to_string(),
            interceptor_sorties: Self::INTERCEPTOR_SORTIES.to_string(),
        }
    }
}

/// Spreadsheet identifier plus the service account used to reach it.
#[derive(Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub credentials: ServiceAccountCredentials,
}

impl SheetsConfig {
    fn from_lookup<F>(lookup: &F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let spreadsheet_id = non_empty(lookup("SPREADSHEET_ID"))?;
        let credentials = ServiceAccountCredentials::from_lookup(lookup)?;
        Some(Self {
            spreadsheet_id,
            credentials,
        })
    }
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("client_email", &self.credentials.client_email)
            .finish_non_exhaustive()
    }
}

/// Google service account key material, mirroring the downloaded JSON key file.
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    pub client_id: Option<String>,
    pub client_x509_cert_url: Option<String>,
    pub auth_uri: String,
    pub token_uri: String,
    pub auth_provider_x509_cert_url: String,
}

impl ServiceAccountCredentials {
    fn from_lookup<F>(lookup: &F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Hosting dashboards store the PEM on one line with escaped newlines.
        let private_key = non_empty(lookup("GOOGLE_PRIVATE_KEY"))?.replace("\\n", "\n");
        let client_email = non_empty(lookup("GOOGLE_CLIENT_EMAIL"))?;

        Some(Self {
            project_id: non_empty(lookup("GOOGLE_PROJECT_ID")),
            private_key_id: non_empty(lookup("GOOGLE_PRIVATE_KEY_ID")),
            private_key,
            client_email,
            client_id: non_empty(lookup("GOOGLE_CLIENT_ID")),
            client_x509_cert_url: non_empty(lookup("GOOGLE_CLIENT_X509_CERT_URL")),
            auth_uri: GOOGLE_AUTH_URI.to_string(),
            token_uri: GOOGLE_TOKEN_URI.to_string(),
            auth_provider_x509_cert_url: GOOGLE_CERTS_URL.to_string(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingSheetsCredentials,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT/APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must be a valid IP address or 'localhost'")
            }
            ConfigError::MissingSheetsCredentials => write!(
                f,
                "SPREADSHEET_ID, GOOGLE_PRIVATE_KEY and GOOGLE_CLIENT_EMAIL are required unless serving with --dry-run"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::MissingSheetsCredentials => None,
        }
    }
}
