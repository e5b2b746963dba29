//! BipGen configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use bipcore::EngineOptions;

use crate::cli::OutputFormat;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR); the CLI flag wins
    pub log_level: Option<String>,

    /// Plan composition caps
    pub engine: EngineConfig,

    /// Output defaults
    pub output: OutputConfig,

    /// Email capture endpoint
    pub capture: CaptureConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .bipgen.yml
        let local_config = PathBuf::from(".bipgen.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/bipgen/bipgen.yml
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialised
    ///
    /// Errors are swallowed here; `load` reports them once logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => [Some(PathBuf::from(".bipgen.yml")), Self::user_config_path()]
                .into_iter()
                .flatten()
                .collect(),
        };

        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bipgen").join("bipgen.yml"))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.engine.validate()?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Plan composition caps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Statements taken from each knowledge-table entry
    pub strategies_per_key: usize,

    /// ABC-table statements opening the data-collection plan
    pub data_collection_base: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategies_per_key: bipcore::DEFAULT_STRATEGIES_PER_KEY,
            data_collection_base: bipcore::DEFAULT_DATA_COLLECTION_BASE,
        }
    }
}

impl EngineConfig {
    /// Both caps must take at least one statement per key
    pub fn validate(&self) -> Result<()> {
        if self.strategies_per_key == 0 {
            eyre::bail!("engine.strategies-per-key must be at least 1");
        }
        if self.data_collection_base == 0 {
            eyre::bail!("engine.data-collection-base must be at least 1");
        }
        Ok(())
    }

    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            strategies_per_key: self.strategies_per_key,
            data_collection_base: self.data_collection_base,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Default document format when `--format` is not given
    pub format: OutputFormat,
}

/// Email capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CaptureConfig {
    /// Endpoint receiving `{ email, timestamp, source }`; capture is off when unset
    pub endpoint: Option<String>,

    /// Source tag sent with each capture
    pub source: String,

    /// HTTP request timeout in milliseconds
    pub timeout_ms: u64,

    /// How long to wait for an in-flight capture before exit, in milliseconds
    pub grace_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            source: "fba-to-bip".to_string(),
            timeout_ms: 5000,
            grace_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.strategies_per_key, 3);
        assert_eq!(config.engine.data_collection_base, 2);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.capture.endpoint.is_none());
        assert_eq!(config.capture.source, "fba-to-bip");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
log-level: debug
engine:
  strategies-per-key: 4
capture:
  endpoint: https://example.com/api/collect-email
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.engine.strategies_per_key, 4);
        assert_eq!(config.engine.data_collection_base, 2);
        assert_eq!(config.capture.timeout_ms, 5000);
        assert_eq!(
            config.capture.endpoint.as_deref(),
            Some("https://example.com/api/collect-email")
        );
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bipgen.yml");
        fs::write(&path, "output:\n  format: json\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(Config::load_log_level(Some(&path)), None);
    }

    #[test]
    fn test_load_explicit_path_missing_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_zero_caps_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bipgen.yml");

        fs::write(&path, "engine:\n  strategies-per-key: 0\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("strategies-per-key must be at least 1"));

        fs::write(&path, "engine:\n  data-collection-base: 0\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("data-collection-base must be at least 1"));
    }

    #[test]
    fn test_engine_options_from_config() {
        let engine = EngineConfig {
            strategies_per_key: 2,
            data_collection_base: 1,
        };
        let options = engine.options();
        assert_eq!(options.strategies_per_key, 2);
        assert_eq!(options.data_collection_base, 1);
    }
}
