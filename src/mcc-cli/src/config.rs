//! Configuration management for mcc CLI

use anyhow::{Context, Result};
use mcc::{ConvertOptions, GeometryOptions, MigrateOptions, NameStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name color for namespaces containing `pattern`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Accent {
    pub pattern: String,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Namespace used when `--namespace` is not given
    pub namespace: Option<String>,
    pub seat_height_offset: Option<f64>,
    pub layer_marker: Option<String>,
    /// Item name colors, checked in order; first match wins
    #[serde(default, rename = "accent", skip_serializing_if = "Vec::is_empty")]
    pub accents: Vec<Accent>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("mcc");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Set the color for `pattern`, keeping its position if already present
    pub fn set_accent(&mut self, pattern: String, color: String) {
        match self.accents.iter_mut().find(|a| a.pattern == pattern) {
            Some(accent) => accent.color = color,
            None => self.accents.push(Accent { pattern, color }),
        }
    }

    /// Conversion options with configured overrides applied
    pub fn convert_options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::default();
        if let Some(offset) = self.seat_height_offset {
            options.geometry = GeometryOptions {
                seat_height_offset: offset,
            };
        }
        options.name_style = self
            .accents
            .iter()
            .fold(NameStyle::default(), |style, accent| {
                style.with_accent(accent.pattern.clone(), accent.color.clone())
            });
        options
    }

    pub fn migrate_options(&self) -> MigrateOptions {
        match &self.layer_marker {
            Some(marker) => MigrateOptions {
                layer_marker: marker.clone(),
            },
            None => MigrateOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        let mut config = Config {
            namespace: Some("mypack".to_string()),
            seat_height_offset: Some(0.6),
            ..Config::default()
        };
        config.set_accent("elite".to_string(), "<#FFCF20>".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "namespace = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config {
            seat_height_offset: Some(0.5),
            layer_marker: Some("_armor".to_string()),
            ..Config::default()
        };
        config.set_accent("elite".to_string(), "<gold>".to_string());

        let options = config.convert_options();
        assert_eq!(options.geometry.seat_height_offset, 0.5);
        assert_eq!(
            options.name_style.accents,
            vec![("elite".to_string(), "<gold>".to_string())]
        );
        assert_eq!(config.migrate_options().layer_marker, "_armor");
    }

    #[test]
    fn test_accent_order_preserved() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.set_accent("zeta".to_string(), "<red>".to_string());
        config.set_accent("alpha".to_string(), "<blue>".to_string());
        config.set_accent("zeta".to_string(), "<green>".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let patterns: Vec<_> = loaded.accents.iter().map(|a| a.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["zeta", "alpha"]);
        assert_eq!(loaded.accents[0].color, "<green>");

        let style = loaded.convert_options().name_style;
        assert_eq!(style.accents[0], ("zeta".to_string(), "<green>".to_string()));
        assert_eq!(style.accents[1], ("alpha".to_string(), "<blue>".to_string()));
    }

    #[test]
    fn test_default_options() {
        let config = Config::default();
        assert_eq!(
            config.convert_options().geometry.seat_height_offset,
            mcc::DEFAULT_SEAT_HEIGHT_OFFSET
        );
        assert_eq!(
            config.migrate_options().layer_marker,
            mcc::DEFAULT_LAYER_MARKER
        );
    }

    #[test]
    fn test_config_path() {
        // Config::config_path() should return a valid path
        let result = Config::config_path();
        assert!(result.is_ok());
    }
}
