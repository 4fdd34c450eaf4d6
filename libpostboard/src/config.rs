//! Configuration management for Postboard

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub behavior: BehaviorConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub race_policy: RacePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub mouse: bool,
}

/// What to do with a response whose selection is no longer current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// Every response is applied when it arrives, whichever selection issued it.
    #[default]
    LastResponseWins,
    /// Responses are tagged with the selection at issue time and dropped if
    /// the selection has moved on.
    DiscardStale,
}

impl FromStr for RacePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_response_wins" => Ok(RacePolicy::LastResponseWins),
            "discard_stale" => Ok(RacePolicy::DiscardStale),
            _ => Err(ConfigError::InvalidValue {
                field: "behavior.race_policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RacePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RacePolicy::LastResponseWins => write!(f, "last_response_wins"),
            RacePolicy::DiscardStale => write!(f, "discard_stale"),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            mouse: false,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file at the default location is not an error; defaults are
    /// used instead. `POSTBOARD_API_URL` overrides `api.base_url`.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let explicit = std::env::var("POSTBOARD_CONFIG").is_ok();

        let config = if config_path.exists() || explicit {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    /// Load from an explicit path when one is given (a `--config` flag),
    /// otherwise from the default location
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::load_from_path(path)?.with_env_overrides()),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("POSTBOARD_API_URL") {
            self.api.base_url = url;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()).into());
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: self.api.base_url.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("POSTBOARD_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("postboard").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.behavior.race_policy, RacePolicy::LastResponseWins);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(!config.ui.mouse);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config(
            r#"
[behavior]
race_policy = "discard_stale"
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.behavior.race_policy, RacePolicy::DiscardStale);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
[api]
base_url = "http://localhost:3000"
timeout_secs = 3

[ui]
tick_rate_ms = 250
mouse = true
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert!(config.ui.mouse);
    }

    #[test]
    fn test_load_rejects_non_http_url() {
        let file = write_config(
            r#"
[api]
base_url = "ftp://example.com"
"#,
        );

        let result = Config::load_from_path(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("api.base_url"));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let file = write_config("[api\nbase_url = ");
        assert!(Config::load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_race_policy_from_str() {
        assert_eq!(
            "last_response_wins".parse::<RacePolicy>().unwrap(),
            RacePolicy::LastResponseWins
        );
        assert_eq!(
            "discard-stale".parse::<RacePolicy>().unwrap(),
            RacePolicy::DiscardStale
        );
        assert!("sometimes".parse::<RacePolicy>().is_err());
    }

    #[test]
    #[serial]
    fn test_env_config_path_and_url_override() {
        let file = write_config(
            r#"
[api]
base_url = "http://localhost:3000"
"#,
        );
        std::env::set_var("POSTBOARD_CONFIG", file.path());
        std::env::set_var("POSTBOARD_API_URL", "http://127.0.0.1:9999");

        let config = Config::load();

        std::env::remove_var("POSTBOARD_CONFIG");
        std::env::remove_var("POSTBOARD_API_URL");

        assert_eq!(config.unwrap().api.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    #[serial]
    fn test_load_from_flag_path_keeps_env_override() {
        let file = write_config(
            r#"
[api]
base_url = "http://localhost:3000"
"#,
        );
        std::env::set_var("POSTBOARD_API_URL", "http://127.0.0.1:9999");
        let overridden = Config::load_from(Some(file.path()));
        std::env::remove_var("POSTBOARD_API_URL");
        let plain = Config::load_from(Some(file.path()));

        assert_eq!(overridden.unwrap().api.base_url, "http://127.0.0.1:9999");
        assert_eq!(plain.unwrap().api.base_url, "http://localhost:3000");
    }

    #[test]
    #[serial]
    fn test_explicit_missing_config_is_an_error() {
        std::env::set_var("POSTBOARD_CONFIG", "/nonexistent/postboard/config.toml");
        let result = Config::load();
        std::env::remove_var("POSTBOARD_CONFIG");

        assert!(result.is_err());
    }
}
