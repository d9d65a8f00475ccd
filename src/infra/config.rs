use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub log_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub allow_origins: Vec<String>,
    pub address: String,
}

/// Lifetimes are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub default_max_lifetime: i64,
    pub default_idle_timeout: i64,
    pub remembered_max_lifetime: i64,
    pub remembered_idle_timeout: i64,
    pub rotation_interval: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub region: String,
    /// Bucket holding every avatar, keyed `<user_id>/<file>`.
    pub bucket: String,
    #[serde(default = "default_max_avatar_size")]
    pub max_avatar_size: usize,
}

fn default_max_avatar_size() -> usize {
    5 * 1024 * 1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KudosConfig {
    #[serde(default)]
    pub allow_self_kudo: bool,
    #[serde(default = "default_recent_limit")]
    pub default_recent_limit: i64,
    #[serde(default = "default_max_recent_limit")]
    pub max_recent_limit: i64,
    #[serde(default = "default_per_page")]
    pub default_per_page: i64,
    #[serde(default = "default_max_per_page")]
    pub max_per_page: i64,
}

fn default_recent_limit() -> i64 {
    3
}

fn default_max_recent_limit() -> i64 {
    20
}

fn default_per_page() -> i64 {
    20
}

fn default_max_per_page() -> i64 {
    100
}

impl Default for KudosConfig {
    fn default() -> Self {
        Self {
            allow_self_kudo: false,
            default_recent_limit: default_recent_limit(),
            max_recent_limit: default_max_recent_limit(),
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub db: DatabaseConfig,
    pub logger: LoggerConfig,
    pub application: ApplicationConfig,
    pub session: SessionConfig,
    pub s3: S3Config,
    #[serde(default)]
    pub kudos: KudosConfig,
}

impl AppConfig {
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<AppConfig> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<AppConfig> {
        Ok(toml::from_str(contents)?)
    }
}
