use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level service configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub quote: QuoteConfig,
    pub log: LogConfig,
}

/// Arc-wrapped config so handlers and slices can clone it freely.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// JSON resources read at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Pricing tables. Always required.
    pub declarations: PathBuf,
    /// Seed orders for the order book. `None` starts with an empty book.
    pub simulation: Option<PathBuf>,
}

/// Quote pricing and workbook layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Floor applied to every quote total.
    pub minimum_total: f64,
    pub sheet_name: String,
    /// Width, in characters, of the first ten worksheet columns.
    pub column_width: f64,
}

/// Logging knobs for the server binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level (`trace` .. `error`, or `off`).
    pub level: String,
    /// Extra `EnvFilter` directives such as `bps_orders=debug`. `RUST_LOG` wins when unset.
    pub filter: Option<String>,
    pub console: bool,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
    /// Write file lines as JSON objects.
    pub json: bool,
    pub rotation: LogRotation,
    /// Rolled files kept on disk.
    pub max_files: usize,
}

/// How often the log file rolls over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 5000, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            declarations: PathBuf::from("data/declarations.json"),
            simulation: Some(PathBuf::from("data/simulation.json")),
        }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self { minimum_total: 100.0, sheet_name: "Sheet_1".to_owned(), column_width: 28.0 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            console: true,
            directory: None,
            json: false,
            rotation: LogRotation::Daily,
            max_files: 10,
        }
    }
}
