//! Settings for the Marquee front end.
//!
//! Settings live in a small JSON document, `settings.json` under the standard
//! configuration directory (`~/.config/marquee/settings.json` on most
//! platforms), or wherever `MARQUEE_CONFIG_PATH` points. Every field has a
//! default, so a missing file or a partial file is fine. The catalog API key is
//! deliberately not part of this document; it is read from `TMDB_API_KEY`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next::config_dir;
use marquee_types::Section;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{BaseUrlError, expand_tilde, validate_base_url};

/// Environment variable allowing callers to override the settings file path.
pub const CONFIG_PATH_ENV: &str = "MARQUEE_CONFIG_PATH";

/// Environment variable holding the catalog API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

const MIN_CARD_WIDTH: u16 = 6;
const MAX_CARD_WIDTH: u16 = 200;

/// Error surfaced when reading or validating settings fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure (for example, permissions).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A configured base URL is unusable.
    #[error("invalid {field}: {source}")]
    BaseUrl {
        field: &'static str,
        #[source]
        source: BaseUrlError,
    },
    /// A numeric field is out of range.
    #[error("invalid {field}: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

/// Persisted settings values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long input stays blocked after a key press, in milliseconds.
    pub guard_delay_ms: u64,
    /// Row the cursor starts on.
    pub start_section: Section,
    pub catalog_base_url: String,
    pub image_base_url: String,
    pub stream_base_url: String,
    /// Minimum query length before a search is sent.
    pub search_min_chars: usize,
    /// Quiet period after the last keystroke before a search is sent.
    pub search_debounce_ms: u64,
    /// Width of one card, in terminal cells.
    pub card_width: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            guard_delay_ms: 200,
            start_section: Section::Continue,
            catalog_base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            stream_base_url: "https://vidsrc-api-js-six.vercel.app".to_string(),
            search_min_chars: 3,
            search_debounce_ms: 500,
            card_width: 22,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// A missing file yields defaults. A file that does not parse is logged
    /// and ignored. The result is not validated; callers apply their
    /// overrides first and then call [`Settings::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = path.map(Path::to_path_buf).unwrap_or_else(default_settings_path);
        load_payload(&resolved)
    }

    pub fn guard_delay(&self) -> Duration {
        Duration::from_millis(self.guard_delay_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("catalog_base_url", &self.catalog_base_url),
            ("image_base_url", &self.image_base_url),
            ("stream_base_url", &self.stream_base_url),
        ] {
            validate_base_url(value).map_err(|source| ConfigError::BaseUrl { field, source })?;
        }
        if !(MIN_CARD_WIDTH..=MAX_CARD_WIDTH).contains(&self.card_width) {
            return Err(ConfigError::OutOfRange {
                field: "card_width",
                reason: format!(
                    "must be between {MIN_CARD_WIDTH} and {MAX_CARD_WIDTH} cells, got {}",
                    self.card_width
                ),
            });
        }
        if self.guard_delay_ms > 5_000 {
            return Err(ConfigError::OutOfRange {
                field: "guard_delay_ms",
                reason: format!("must be at most 5000, got {}", self.guard_delay_ms),
            });
        }
        Ok(())
    }
}

/// Reads the catalog API key from the environment, ignoring blank values.
pub fn api_key_from_env() -> Option<String> {
    env::var(API_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
        .join(SETTINGS_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<Settings, ConfigError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => {
                debug!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse settings file; using defaults"
                );
                Ok(Settings::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(error) => Err(ConfigError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load(Some(&dir.path().join("absent.json"))).expect("load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.guard_delay(), Duration::from_millis(200));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"guard_delay_ms": 120, "start_section": "trending"}}"#).expect("write");
        let settings = Settings::load(Some(file.path())).expect("load");
        assert_eq!(settings.guard_delay_ms, 120);
        assert_eq!(settings.start_section, Section::Trending);
        assert_eq!(settings.search_min_chars, 3);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        let settings = Settings::load(Some(file.path())).expect("load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn insecure_base_url_is_rejected() {
        let settings = Settings {
            stream_base_url: "http://streams.example.com".into(),
            ..Settings::default()
        };
        let error = settings.validate().unwrap_err();
        assert!(matches!(error, ConfigError::BaseUrl { field: "stream_base_url", .. }));
    }

    #[test]
    fn card_width_is_bounded() {
        for card_width in [5, 201, 65534] {
            let settings = Settings {
                card_width,
                ..Settings::default()
            };
            let error = settings.validate().unwrap_err();
            assert!(matches!(error, ConfigError::OutOfRange { field: "card_width", .. }));
        }
        let widest = Settings {
            card_width: 200,
            ..Settings::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn load_leaves_validation_to_the_caller() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"guard_delay_ms": 9000}}"#).expect("write");
        let settings = Settings::load(Some(file.path())).expect("load");
        assert_eq!(settings.guard_delay_ms, 9000);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn blank_api_key_is_ignored() {
        temp_env::with_var(API_KEY_ENV, Some("   "), || assert_eq!(api_key_from_env(), None));
        temp_env::with_var(API_KEY_ENV, Some("k3y"), || {
            assert_eq!(api_key_from_env().as_deref(), Some("k3y"))
        });
    }
}
