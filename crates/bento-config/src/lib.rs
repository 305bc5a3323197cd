//! Configuration management for bento.
//!
//! Parses `bento.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bento.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the default trust flag.
    pub trusted: Option<bool>,
    /// Override the resolver base URL.
    pub base_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Resolver configuration.
    pub resolver: ResolverConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Precedence order override, most preferred first.
    ///
    /// Listed MIME types are moved to the front of the registry order in
    /// the given sequence; unlisted types keep their relative order after
    /// them.
    pub order: Option<Vec<String>>,
    /// Treat bundles as trusted unless the caller says otherwise.
    pub trusted: bool,
}

/// Resolver configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Directory-like base URL for resolving relative references.
    pub base_url: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `bento.toml` in the current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or if
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(order) = &self.render.order {
            if order.iter().any(String::is_empty) {
                return Err(ConfigError::Validation(
                    "render.order entries cannot be empty".to_owned(),
                ));
            }
            let mut seen = std::collections::HashSet::new();
            for mimetype in order {
                if !seen.insert(mimetype.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "render.order lists {mimetype} more than once"
                    )));
                }
            }
        }

        if let Some(base_url) = &self.resolver.base_url
            && base_url.is_empty()
        {
            return Err(ConfigError::Validation(
                "resolver.base_url cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(trusted) = settings.trusted {
            self.render.trusted = trusted;
        }
        if let Some(base_url) = &settings.base_url {
            self.resolver.base_url = Some(base_url.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.render.order.is_none());
        assert!(!config.render.trusted);
        assert!(config.resolver.base_url.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.render.trusted);
    }

    #[test]
    fn test_parse_render_section() {
        let toml = r#"
[render]
order = ["text/html", "text/plain"]
trusted = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.render.order,
            Some(vec!["text/html".to_owned(), "text/plain".to_owned()])
        );
        assert!(config.render.trusted);
    }

    #[test]
    fn test_parse_resolver_section() {
        let toml = r#"
[resolver]
base_url = "https://example.com/files/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.resolver.base_url.as_deref(),
            Some("https://example.com/files/")
        );
    }

    #[test]
    fn test_validate_rejects_empty_order_entry() {
        let toml = r#"
[render]
order = ["text/html", ""]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_rejects_duplicate_order_entry() {
        let toml = r#"
[render]
order = ["text/html", "text/html"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let toml = r#"
[resolver]
base_url = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_apply_cli_settings_trusted() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            trusted: Some(true),
            ..Default::default()
        });
        assert!(config.render.trusted);
    }

    #[test]
    fn test_apply_cli_settings_base_url() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            base_url: Some("/files/".to_owned()),
            ..Default::default()
        });
        assert_eq!(config.resolver.base_url.as_deref(), Some("/files/"));
    }

    #[test]
    fn test_apply_cli_settings_empty_changes_nothing() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert!(!config.render.trusted);
        assert!(config.resolver.base_url.is_none());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/bento.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
