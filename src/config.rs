use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::dispatch::http::DEFAULT_TIMEOUT;
use crate::error::RelayError;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Config file looked up in the working directory when `CHATRELAY_CONFIG` is unset.
const DEFAULT_CONFIG_FILE: &str = "chatrelay.toml";

/// Everything the dispatch layer needs to reach the provider.
/// Read-only after startup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    /// Full endpoint URL (already pointing at `/v1/responses`).
    pub api_url: String,
    /// Used when the caller does not name a model.
    pub default_model: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub provider: ProviderConfig,
}

/// On-disk shape of `chatrelay.toml`. All keys optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub provider: FileProviderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileProviderConfig {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, RelayError> {
        toml::from_str(text).map_err(|e| RelayError::Config(e.to_string()))
    }

    pub fn read(path: &Path) -> Result<Self, RelayError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RelayError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&text)
    }
}

impl Config {
    /// Load from the optional TOML file, then let environment variables override it.
    /// A broken config file is logged and skipped rather than aborting startup.
    pub fn load() -> Self {
        let file = match config_file_path() {
            Some(path) => match FileConfig::read(&path) {
                Ok(file) => {
                    tracing::info!("loaded config from {}", path.display());
                    file
                }
                Err(e) => {
                    tracing::warn!("ignoring config file: {e}");
                    FileConfig::default()
                }
            },
            None => FileConfig::default(),
        };

        Self::from_sources(file, |key| env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup. Env wins; blank values count as unset.
    pub fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let file = file.provider;
        let defaults = ProviderConfig::default();

        let api_key = var("OPENAI_API_KEY").or(file.api_key).unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY not set, provider calls will be rejected upstream");
        }

        let timeout_secs = match var("CHATRELAY_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    tracing::warn!("invalid CHATRELAY_TIMEOUT_SECS={raw:?}, using default");
                    None
                }
            },
            None => file.timeout_secs.filter(|s| *s > 0),
        };

        Config {
            provider: ProviderConfig {
                api_key,
                api_url: var("OPENAI_API_URL")
                    .or(file.api_url)
                    .unwrap_or(defaults.api_url),
                default_model: var("OPENAI_MODEL")
                    .or(file.model)
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(defaults.default_model),
                timeout: timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
            },
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    match env::var("CHATRELAY_CONFIG") {
        Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        }
    }
}
