use crate::catalog::Fallback;
use crate::error::ConfigError;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog options, usually kept in a small TOML file.
///
/// ```toml
/// fallback = "en"   # or a position in the language list: fallback = 0
/// default = true
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CatalogConfig {
    /// The fallback language, by code or by index.
    pub fallback: Fallback,
    /// Whether a contextual catalog built from this configuration replaces
    /// the process-wide default.
    #[serde(default = "default_true")]
    pub default: bool,
}

fn default_true() -> bool {
    true
}

impl CatalogConfig {
    pub fn new(fallback: impl Into<Fallback>) -> Self {
        Self {
            fallback: fallback.into(),
            default: true,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_code_fallback() {
        let config = CatalogConfig::from_toml_str(r#"fallback = "en""#).unwrap();
        assert_eq!(config, CatalogConfig::new("en"));
    }

    #[test]
    fn parses_index_fallback_and_default_flag() {
        let config = CatalogConfig::from_toml_str("fallback = 1\ndefault = false").unwrap();
        assert_eq!(config.fallback, Fallback::Index(1));
        assert!(!config.default);
    }

    #[test]
    fn missing_fallback_is_a_parse_error() {
        let err = CatalogConfig::from_toml_str("default = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("lexis.toml");
        std::fs::write(&config_path, "fallback = \"fr\"\n").unwrap();

        let config = CatalogConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.fallback, Fallback::Code("fr".to_string()));
        assert!(config.default);
    }

    #[test]
    fn read_from_path_missing_file() {
        let err = CatalogConfig::read_from_path("/non/existent/path/lexis.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}
