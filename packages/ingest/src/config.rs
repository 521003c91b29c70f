use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::DatabaseConfig;
use common::links::DEFAULT_BASE_URL;

/// Upstream API settings.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// API root, methods are appended as path segments.
    /// Default: "https://codeforces.com/api".
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Minimum gap between two outbound requests in milliseconds. Default: 2000.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,
    /// Per-request timeout in seconds. Default: 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    format!("{DEFAULT_BASE_URL}/api")
}
fn default_request_interval_ms() -> u64 {
    2000
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_interval_ms: default_request_interval_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Reconciliation pass settings.
#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// How many of the most recent finished contests to process. Default: 10.
    #[serde(default = "default_max_contests")]
    pub max_contests: usize,
    /// Locales tried for problem names, in order of preference. Default: ["ru", "en"].
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Locale recorded when no localized name could be fetched. Default: "en".
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Submissions scanned when counting accepted solutions. Default: 1000.
    #[serde(default = "default_submission_scan_limit")]
    pub submission_scan_limit: u32,
    /// Site root used to build contest and problem links.
    /// Default: "https://codeforces.com".
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

fn default_max_contests() -> usize {
    10
}
fn default_locales() -> Vec<String> {
    vec!["ru".into(), "en".into()]
}
fn default_locale() -> String {
    "en".into()
}
fn default_submission_scan_limit() -> u32 {
    1000
}
fn default_site_url() -> String {
    DEFAULT_BASE_URL.into()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_contests: default_max_contests(),
            locales: default_locales(),
            default_locale: default_locale(),
            submission_scan_limit: default_submission_scan_limit(),
            site_url: default_site_url(),
        }
    }
}

/// Ingest binary configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngestAppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl IngestAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CATALOG_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("ingest.max_contests", 10_i64)?
            .set_default("ingest.default_locale", "en")?
            .set_default("source.request_interval_ms", 2000_i64)?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., CATALOG__DATABASE__URL)
            .add_source(
                Environment::with_prefix("CATALOG")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ingest.locales")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
