//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and from
//! `DOMAINER_*` environment variables, and merging configurations with
//! proper precedence rules.

use crate::error::DomainerError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values for pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Text-generation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default feed URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Default local feed file (alternative to url)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Default fetch timeout (as string, e.g., "30s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default cache file for the sorted list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
}

/// Text-generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Model name to request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Completion token budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Analysis request timeout (as string, e.g., "60s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Endpoint base URL (for OpenAI-compatible gateways)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Configuration discovery and loading functionality.
#[derive(Debug, Default)]
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `FileError` if the file is missing, `ConfigError` if it
    /// cannot be parsed or fails validation.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainerError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainerError::file_error(
                path.to_string_lossy(),
                "configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainerError::file_error(
                path.to_string_lossy(),
                format!("failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| DomainerError::config(format!("failed to parse TOML: {}", e)))?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them,
    /// later (more local) files winning over earlier ones.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainerError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Global config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if loaded_files.len() > 1 {
            tracing::debug!(
                "multiple config files found, precedence order: {:?}",
                loaded_files
            );
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domainer.toml", "./.domainer.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the global configuration file path in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let path = Path::new(&home).join(".domainer.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domainer").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations; values from `higher` win.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.url.is_some() {
                        lower_defaults.url = higher_defaults.url;
                    }
                    if higher_defaults.file.is_some() {
                        lower_defaults.file = higher_defaults.file;
                    }
                    if higher_defaults.timeout.is_some() {
                        lower_defaults.timeout = higher_defaults.timeout;
                    }
                    if higher_defaults.cache.is_some() {
                        lower_defaults.cache = higher_defaults.cache;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
            analysis: match (lower.analysis, higher.analysis) {
                (Some(mut lower_analysis), Some(higher_analysis)) => {
                    if higher_analysis.model.is_some() {
                        lower_analysis.model = higher_analysis.model;
                    }
                    if higher_analysis.max_tokens.is_some() {
                        lower_analysis.max_tokens = higher_analysis.max_tokens;
                    }
                    if higher_analysis.temperature.is_some() {
                        lower_analysis.temperature = higher_analysis.temperature;
                    }
                    if higher_analysis.api_base.is_some() {
                        lower_analysis.api_base = higher_analysis.api_base;
                    }
                    if higher_analysis.timeout.is_some() {
                        lower_analysis.timeout = higher_analysis.timeout;
                    }
                    Some(lower_analysis)
                }
                (None, Some(higher_analysis)) => Some(higher_analysis),
                (Some(lower_analysis), None) => Some(lower_analysis),
                (None, None) => None,
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainerError> {
        if let Some(defaults) = &config.defaults {
            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(DomainerError::config(format!(
                        "invalid timeout format '{}'. Use format like '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            if defaults.url.is_some() && defaults.file.is_some() {
                return Err(DomainerError::config(
                    "cannot specify both 'url' and 'file' in defaults",
                ));
            }
        }

        if let Some(analysis) = &config.analysis {
            if let Some(temperature) = analysis.temperature {
                if !(0.0..=2.0).contains(&temperature) {
                    return Err(DomainerError::config(format!(
                        "temperature {} out of range (0.0-2.0)",
                        temperature
                    )));
                }
            }

            if analysis.max_tokens == Some(0) {
                return Err(DomainerError::config("max_tokens must be greater than 0"));
            }

            if let Some(timeout_str) = &analysis.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(DomainerError::config(format!(
                        "invalid analysis timeout format '{}'. Use format like '60s', '2m'",
                        timeout_str
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via `DOMAINER_*`
/// environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub url: Option<String>,
    pub file: Option<String>,
    pub timeout: Option<String>,
    pub model: Option<String>,
    pub config: Option<String>,
}

/// Load configuration from environment variables.
///
/// Parses the `DOMAINER_*` environment variables and returns a structured
/// configuration. Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    let mut env_config = EnvConfig::default();

    if let Ok(url) = env::var("DOMAINER_URL") {
        if !url.trim().is_empty() {
            tracing::debug!("using DOMAINER_URL={}", url);
            env_config.url = Some(url);
        }
    }

    if let Ok(file) = env::var("DOMAINER_FILE") {
        if !file.trim().is_empty() {
            tracing::debug!("using DOMAINER_FILE={}", file);
            env_config.file = Some(file);
        }
    }

    if let Ok(timeout_str) = env::var("DOMAINER_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            tracing::debug!("using DOMAINER_TIMEOUT={}", timeout_str);
            env_config.timeout = Some(timeout_str);
        } else {
            tracing::warn!(
                "invalid DOMAINER_TIMEOUT='{}', use format like '30s', '2m'",
                timeout_str
            );
        }
    }

    if let Ok(model) = env::var("DOMAINER_MODEL") {
        if !model.trim().is_empty() {
            tracing::debug!("using DOMAINER_MODEL={}", model);
            env_config.model = Some(model);
        }
    }

    if let Ok(config_path) = env::var("DOMAINER_CONFIG") {
        if !config_path.trim().is_empty() {
            tracing::debug!("using DOMAINER_CONFIG={}", config_path);
            env_config.config = Some(config_path);
        }
    }

    env_config
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("30s"), Some(30));
        assert_eq!(parse_timeout_string("2m"), Some(120));
        assert_eq!(parse_timeout_string("45"), Some(45));
        assert_eq!(parse_timeout_string("fast"), None);
        assert_eq!(parse_timeout_string(""), None);
    }

    #[test]
    fn test_load_file_parses_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\ntimeout = \"45s\"\nurl = \"https://example.com/feed.txt\"\n\n\
             [analysis]\nmodel = \"gpt-4o-mini\"\ntemperature = 0.7\n"
        )
        .unwrap();

        let config = ConfigManager::new().load_file(file.path()).unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.timeout.as_deref(), Some("45s"));
        assert_eq!(defaults.url.as_deref(), Some("https://example.com/feed.txt"));

        let analysis = config.analysis.unwrap();
        assert_eq!(analysis.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(analysis.temperature, Some(0.7));
    }

    #[test]
    fn test_load_file_rejects_bad_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\ntimeout = \"soon\"\n").unwrap();

        let err = ConfigManager::new().load_file(file.path()).unwrap_err();
        assert!(matches!(err, DomainerError::ConfigError { .. }));
    }

    #[test]
    fn test_load_file_rejects_url_and_file_conflict() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\nurl = \"https://example.com/a.txt\"\nfile = \"b.txt\"\n"
        )
        .unwrap();

        let err = ConfigManager::new().load_file(file.path()).unwrap_err();
        assert!(matches!(err, DomainerError::ConfigError { .. }));
    }

    #[test]
    fn test_load_file_parses_analysis_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis]\ntimeout = \"90s\"\n").unwrap();

        let config = ConfigManager::new().load_file(file.path()).unwrap();
        assert_eq!(config.analysis.unwrap().timeout.as_deref(), Some("90s"));
    }

    #[test]
    fn test_load_file_rejects_bad_analysis_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis]\ntimeout = \"eventually\"\n").unwrap();

        let err = ConfigManager::new().load_file(file.path()).unwrap_err();
        assert!(matches!(err, DomainerError::ConfigError { .. }));
    }

    #[test]
    fn test_load_file_rejects_temperature_out_of_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis]\ntemperature = 3.5\n").unwrap();

        let err = ConfigManager::new().load_file(file.path()).unwrap_err();
        assert!(matches!(err, DomainerError::ConfigError { .. }));
    }

    #[test]
    fn test_merge_higher_wins() {
        let manager = ConfigManager::new();
        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                url: Some("https://lower.example/feed".to_string()),
                timeout: Some("10s".to_string()),
                ..Default::default()
            }),
            analysis: None,
        };
        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                url: Some("https://higher.example/feed".to_string()),
                ..Default::default()
            }),
            analysis: Some(AnalysisConfig {
                model: Some("gpt-4o".to_string()),
                ..Default::default()
            }),
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();
        assert_eq!(defaults.url.as_deref(), Some("https://higher.example/feed"));
        assert_eq!(defaults.timeout.as_deref(), Some("10s")); // untouched by higher
        assert_eq!(merged.analysis.unwrap().model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = ConfigManager::new()
            .load_file("/nonexistent/domainer.toml")
            .unwrap_err();
        assert!(matches!(err, DomainerError::FileError { .. }));
    }
}
