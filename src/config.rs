//! Server configuration from the environment

use crate::dialogue::script::SiteDirectory;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);
const DEFAULT_PACING_SCALE: f64 = 1.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Failed to read site directory {}: {source}", path.display())]
    ReadDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse site directory {}: {source}", path.display())]
    ParseDirectory {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings read once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Zero disables the inactivity check-in
    pub idle_timeout: Duration,
    /// Sessions without visitor input for this long are dropped; zero keeps them
    pub session_ttl: Duration,
    /// Multiplier for pacing hints; zero renders everything instantly
    pub pacing_scale: f64,
    pub directory: SiteDirectory,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            session_ttl: DEFAULT_SESSION_TTL,
            pacing_scale: DEFAULT_PACING_SCALE,
            directory: SiteDirectory::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = lookup("GUIDED_CHAT_PORT") {
            config.port = parse("GUIDED_CHAT_PORT", &port)?;
        }

        if let Some(secs) = lookup("GUIDED_CHAT_IDLE_TIMEOUT_SECS") {
            config.idle_timeout =
                Duration::from_secs(parse("GUIDED_CHAT_IDLE_TIMEOUT_SECS", &secs)?);
        }

        if let Some(secs) = lookup("GUIDED_CHAT_SESSION_TTL_SECS") {
            config.session_ttl =
                Duration::from_secs(parse("GUIDED_CHAT_SESSION_TTL_SECS", &secs)?);
        }

        if let Some(scale) = lookup("GUIDED_CHAT_PACING_SCALE") {
            let parsed: f64 = parse("GUIDED_CHAT_PACING_SCALE", &scale)?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "GUIDED_CHAT_PACING_SCALE",
                    value: scale,
                });
            }
            config.pacing_scale = parsed;
        }

        if let Some(path) = lookup("GUIDED_CHAT_DIRECTORY") {
            config.directory = load_directory(PathBuf::from(path))?;
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

/// Read a JSON site directory; missing fields fall back to the built-in links
fn load_directory(path: PathBuf) -> Result<SiteDirectory, ConfigError> {
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) => return Err(ConfigError::ReadDirectory { path, source }),
    };
    let directory = match serde_json::from_str(&contents) {
        Ok(directory) => directory,
        Err(source) => return Err(ConfigError::ParseDirectory { path, source }),
    };
    tracing::info!(path = %path.display(), "Loaded site directory");
    Ok(directory)
}
