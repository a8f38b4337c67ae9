//! Optional settings file for the registration demo.
//!
//! Looked up at `<config_dir>/alumni-portal/config.toml`. Every key is
//! optional and a missing file means defaults:
//!
//! ```toml
//! [theme]
//! accent = "#1d4ed8"
//! light = "#eff6ff"
//!
//! [logging]
//! level = "debug"          # RUST_LOG overrides this
//! dir = "/tmp/alumni-portal"
//! enabled = true
//! ```

use alumni_portal::Theme;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Demo configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

/// Colour overrides on top of the default palette.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent: Option<String>,
    pub light: Option<String>,
    pub muted: Option<String>,
    pub error: Option<String>,
}

impl ThemeConfig {
    pub fn apply(&self, mut theme: Theme) -> Theme {
        if let Some(accent) = &self.accent {
            theme = theme.with_accent(accent.as_str());
        }
        if let Some(light) = &self.light {
            theme = theme.with_light(light.as_str());
        }
        if let Some(muted) = &self.muted {
            theme = theme.with_muted(muted.as_str());
        }
        if let Some(error) = &self.error {
            theme = theme.with_error(error.as_str());
        }
        theme
    }
}

/// Where and how much to log. The terminal belongs to the UI, so logs only
/// ever go to a file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    pub dir: PathBuf,
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("alumni-portal"),
            enabled: true,
        }
    }
}

impl Config {
    /// `<config_dir>/alumni-portal/config.toml`, when the platform has a
    /// config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("alumni-portal").join("config.toml"))
    }

    /// Loads the settings file if there is one.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.enabled);
        assert_eq!(config.theme.apply(Theme::default()), Theme::default());
    }

    #[test]
    fn test_theme_overrides() {
        let config = Config::parse(
            r##"
            [theme]
            accent = "#1d4ed8"
            "##,
        )
        .unwrap();
        let theme = config.theme.apply(Theme::default());
        assert_eq!(theme.accent, "#1d4ed8");
        assert_eq!(theme.light, Theme::default().light);
    }

    #[test]
    fn test_logging_section() {
        let config = Config::parse(
            r#"
            [logging]
            level = "debug"
            dir = "/tmp/portal-logs"
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.dir, PathBuf::from("/tmp/portal-logs"));
        assert!(!config.logging.enabled);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::parse("[theme\naccent = 1").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("alumni-portal-no-such-dir/config.toml");
        assert!(Config::from_file(&missing).is_err());
    }
}
