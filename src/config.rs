use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub base_url: String,
    pub public_base_url: String,
    pub bucket: String,
    pub api_key: String,
    #[serde(default)]
    pub default_image_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub session_secret: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: i64,
}

fn default_session_ttl() -> i64 {
    60 * 60 * 24 // one day
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_candidate_cap")]
    pub candidate_cap: usize,
}

fn default_candidate_cap() -> usize {
    10
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            candidate_cap: default_candidate_cap(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Configuration file (config/default.toml)
    /// 2. Local overrides (config/local.toml)
    /// 3. Environment variables (prefixed with FRIENDLY__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. FRIENDLY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FRIENDLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FRIENDLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Fold the conventional bare environment variables into the config
///
/// DATABASE_URL and SECRET_KEY are what deployment tooling usually sets, so
/// they are honored alongside the FRIENDLY__-prefixed forms.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("FRIENDLY__DATABASE__URL"))
        .ok();

    let session_secret = env::var("SECRET_KEY")
        .or_else(|_| env::var("FRIENDLY__AUTH__SESSION_SECRET"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = database_url {
        builder = builder.set_override("database.url", url)?;
    }
    if let Some(secret) = session_secret {
        builder = builder.set_override("auth.session_secret", secret)?;
    }

    builder.build()
}
