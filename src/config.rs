//! User configuration loaded from `config.toml`.

use crate::calculator::{NumberFormatter, NumberLocale};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
}

/// Settings read from the config file. Every field is optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Locale tag used for digit grouping, e.g. `en-US` or `de-DE`.
    pub locale: String,
    /// Overrides the locale's group separator.
    pub group_separator: Option<String>,
    /// Overrides the locale's decimal separator.
    pub decimal_separator: Option<String>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            group_separator: None,
            decimal_separator: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/calcpad/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calcpad").join("config.toml"))
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            warn!("no config directory on this platform, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Resolve the configured locale and separator overrides.
    pub fn number_locale(&self) -> Result<NumberLocale, ConfigError> {
        let mut locale = NumberLocale::from_tag(&self.locale)
            .ok_or_else(|| ConfigError::UnknownLocale(self.locale.clone()))?;
        if let Some(sep) = &self.group_separator {
            locale.group_separator = sep.clone();
        }
        if let Some(sep) = &self.decimal_separator {
            locale.decimal_separator = sep.clone();
        }
        Ok(locale)
    }

    pub fn formatter(&self) -> Result<NumberFormatter, ConfigError> {
        Ok(NumberFormatter::new(self.number_locale()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.number_locale().unwrap(), NumberLocale::en_us());
    }

    #[test]
    fn test_locale_and_overrides() {
        let config = Config::parse(
            r#"
            locale = "de-DE"
            group_separator = " "
            "#,
        )
        .unwrap();
        let locale = config.number_locale().unwrap();
        assert_eq!(locale.group_separator, " ");
        assert_eq!(locale.decimal_separator, ",");
        assert_eq!(config.formatter().unwrap().format(12345.0), "12 345");
    }

    #[test]
    fn test_unknown_locale() {
        let config = Config::parse(r#"locale = "tlh""#).unwrap();
        assert!(matches!(
            config.number_locale(),
            Err(ConfigError::UnknownLocale(tag)) if tag == "tlh"
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::parse("theme = \"dark\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/calcpad/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
