//! Seat configuration.
//!
//! A seat is configured from a TOML document. Every section is optional and
//! falls back to the compositor defaults (25 keys/s repeat after 600 ms, the
//! system XKB keymap, an 8x8 touch contact area).
//!
//! ```toml
//! name = "seat0"
//!
//! [keyboard]
//! repeat_rate = 30
//! repeat_delay = 500
//!
//! [keyboard.keymap]
//! layout = "de"
//! options = "caps:escape"
//!
//! [touch]
//! contact_size = 8.0
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::ConfigError;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["text", "json"];

/// XKB rule names used to compile the keymap installed on new keyboards.
///
/// `None` fields select the system default for that component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeymapRules {
    pub rules: Option<String>,
    pub model: Option<String>,
    pub layout: Option<String>,
    pub variant: Option<String>,
    pub options: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Characters per second.
    pub repeat_rate: i32,
    /// Milliseconds before repeat starts.
    pub repeat_delay: i32,
    pub keymap: KeymapRules,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            repeat_rate: 25,
            repeat_delay: 600,
            keymap: KeymapRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Edge length of the square contact area given to a new touch point.
    pub contact_size: f64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self { contact_size: 8.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `"text"` or `"json"`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Top-level configuration of one seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatConfig {
    /// Name advertised to clients (`wl_seat.name`).
    pub name: String,
    pub keyboard: KeyboardConfig,
    pub touch: TouchConfig,
    pub logging: LoggingConfig,
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self {
            name: "seat0".to_string(),
            keyboard: KeyboardConfig::default(),
            touch: TouchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SeatConfig {
    /// Default configuration for a seat called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// A missing file is not an error: the defaults are returned instead.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "SeatConfig: Config file '{}' not found. Using default configuration.",
                    path.display()
                );
                return Ok(SeatConfig::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_toml_str(&contents)?;
        info!("SeatConfig: Loaded configuration from '{}'.", path.display());
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SeatConfig = toml::from_str(contents)?;
        config.validate()?;
        debug!("SeatConfig: Parsed configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "seat name must not be empty".to_string(),
            ));
        }
        if self.keyboard.repeat_rate < 0 {
            return Err(ConfigError::ValidationError(format!(
                "keyboard.repeat_rate must be >= 0, got {}",
                self.keyboard.repeat_rate
            )));
        }
        if self.keyboard.repeat_delay < 0 {
            return Err(ConfigError::ValidationError(format!(
                "keyboard.repeat_delay must be >= 0, got {}",
                self.keyboard.repeat_delay
            )));
        }
        if !self.touch.contact_size.is_finite() || self.touch.contact_size <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "touch.contact_size must be a positive number, got {}",
                self.touch.contact_size
            )));
        }
        let level = self.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level '{}' is not one of {:?}",
                self.logging.level, VALID_LOG_LEVELS
            )));
        }
        let format = self.logging.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format '{}' is not one of {:?}",
                self.logging.format, VALID_LOG_FORMATS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SeatConfig::default();
        assert_eq!(config.name, "seat0");
        assert_eq!(config.keyboard.repeat_rate, 25);
        assert_eq!(config.keyboard.repeat_delay, 600);
        assert_eq!(config.keyboard.keymap, KeymapRules::default());
        assert_eq!(config.touch.contact_size, 8.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = SeatConfig::from_toml_str(
            r#"
            name = "seat1"

            [keyboard.keymap]
            layout = "de"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.name, "seat1");
        assert_eq!(config.keyboard.keymap.layout.as_deref(), Some("de"));
        assert_eq!(config.keyboard.repeat_rate, 25);
        assert_eq!(config.touch, TouchConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = SeatConfig::load_from_file(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config, SeatConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("seat.toml");
        fs::write(
            &path,
            "[keyboard]\nrepeat_rate = 40\nrepeat_delay = 250\n[logging]\nformat = \"json\"\n",
        )
        .expect("write config");

        let config = SeatConfig::load_from_file(&path).expect("load");
        assert_eq!(config.keyboard.repeat_rate, 40);
        assert_eq!(config.keyboard.repeat_delay, 250);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_parse_error() {
        let err = SeatConfig::from_toml_str("name = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SeatConfig::default();
        config.touch.contact_size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = SeatConfig::default();
        config.keyboard.repeat_rate = -1;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = SeatConfig::default();
        config.logging.level = "verbose".into();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let config = SeatConfig::named("   ");
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }
}
