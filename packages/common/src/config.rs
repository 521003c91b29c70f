use serde::Deserialize;

/// Store connection settings shared by the server and the ingest binary.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Connection URL. Default: "sqlite://catalog.db?mode=rwc".
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Pool ceiling. Default: 20.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open while idle. Default: 1.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait when opening or acquiring a connection. Default: 8.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Seconds before an idle connection is closed. Unset keeps them open.
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
    /// Log every statement through sqlx. Default: false.
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_database_url() -> String {
    "sqlite://catalog.db?mode=rwc".into()
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout_secs() -> u64 {
    8
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            idle_timeout_secs: None,
            sqlx_logging: false,
        }
    }
}
