use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "MONTH_FILTER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "month_filter.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// User-tunable settings, read from JSON. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial window size in logical pixels.
    pub window_width: f32,
    pub window_height: f32,
    /// Month pre-selected in the month input (clamped to 1..=12).
    pub default_month: u32,
    /// Maximum rows drawn in the preview grid. The CSV always has all rows.
    pub preview_row_limit: usize,
    /// Directory the open/save dialogs start in.
    pub start_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1100.0,
            window_height: 720.0,
            default_month: 1,
            preview_row_limit: 10_000,
            start_dir: None,
        }
    }
}

impl AppConfig {
    /// Parse a config file and normalise out-of-range values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.default_month = config.default_month.clamp(1, 12);
        Ok(config)
    }

    /// Load from `$MONTH_FILTER_CONFIG` or `./month_filter.json`.
    ///
    /// A missing file gives the defaults; a broken one is logged and also
    /// gives the defaults.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{ "default_month": 7, "preview_row_limit": 50 }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.default_month, 7);
        assert_eq!(config.preview_row_limit, 50);
        assert_eq!(config.window_width, AppConfig::default().window_width);
        assert_eq!(config.start_dir, None);
    }

    #[test]
    fn default_month_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{ "default_month": 40 }"#).unwrap();
        assert_eq!(AppConfig::from_file(&path).unwrap().default_month, 12);

        std::fs::write(&path, r#"{ "default_month": 0 }"#).unwrap();
        assert_eq!(AppConfig::from_file(&path).unwrap().default_month, 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::from_file(&path).is_err());
    }
}
