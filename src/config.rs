use crate::animation::{clamp_speed, AnimationState, ColorCycleTrigger, MIN_DIMENSION};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

const CONFIG_FILE_NAME: &str = "config.yaml";
const DEFAULT_TITLE: &str = "Dynamic Grid";
const DEFAULT_CELL_WIDTH: u16 = 2;

/// The contents of a config file. Every field is optional; missing ones fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    pub rows: Option<u16>,
    pub columns: Option<u16>,
    pub speed: Option<u32>,
    pub cell_width: Option<u16>,
    pub title: Option<String>,
    pub color_cycle: Option<ColorCycleTrigger>,
}

/// Errors that can occur when loading a config file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse { path: PathBuf, source: serde_yaml::Error },
}

impl Config {
    /// The default config file path, under the platform's config directory.
    pub(crate) fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "neon-grid").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the config at `path` if given, otherwise the default one if it exists.
    ///
    /// An explicitly requested file must exist; a missing default file just means defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.into(), source })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse { path: path.into(), source })
    }

    fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Layer `other` on top of this config: any value set in `other` wins.
    pub(crate) fn merge(self, other: Config) -> Config {
        Config {
            rows: other.rows.or(self.rows),
            columns: other.columns.or(self.columns),
            speed: other.speed.or(self.speed),
            cell_width: other.cell_width.or(self.cell_width),
            title: other.title.or(self.title),
            color_cycle: other.color_cycle.or(self.color_cycle),
        }
    }

    /// Resolve into concrete settings, applying defaults and input sanitizing.
    pub(crate) fn resolve(self) -> Settings {
        let defaults = AnimationState::default();
        Settings {
            rows: self.rows.unwrap_or(defaults.rows).max(MIN_DIMENSION),
            columns: self.columns.unwrap_or(defaults.columns).max(MIN_DIMENSION),
            speed_ms: clamp_speed(self.speed.unwrap_or(defaults.speed_ms.into())),
            cell_width: self.cell_width.unwrap_or(DEFAULT_CELL_WIDTH).max(1),
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            color_cycle: self.color_cycle.unwrap_or_default(),
        }
    }
}

/// Fully resolved settings the application starts with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub rows: u16,
    pub columns: u16,
    pub speed_ms: u16,
    pub cell_width: u16,
    pub title: String,
    pub color_cycle: ColorCycleTrigger,
}

impl Settings {
    pub(crate) fn initial_state(&self) -> AnimationState {
        AnimationState::new(self.rows, self.columns, self.speed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let settings = Config::default().resolve();
        assert_eq!(
            settings,
            Settings {
                rows: 15,
                columns: 20,
                speed_ms: 100,
                cell_width: 2,
                title: "Dynamic Grid".into(),
                color_cycle: ColorCycleTrigger::Bounce,
            }
        );
    }

    #[test]
    fn parse_full() {
        let input = r"
rows: 8
columns: 40
speed: 250
cell_width: 3
title: Neon
color_cycle: step
";
        let config = Config::parse(input).expect("parse failed");
        assert_eq!(config.rows, Some(8));
        assert_eq!(config.columns, Some(40));
        assert_eq!(config.speed, Some(250));
        assert_eq!(config.cell_width, Some(3));
        assert_eq!(config.title.as_deref(), Some("Neon"));
        assert_eq!(config.color_cycle, Some(ColorCycleTrigger::Step));
    }

    #[test]
    fn parse_empty() {
        assert_eq!(Config::parse("  \n").expect("parse failed"), Config::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(Config::parse("rows: 5\nlayers: 3\n").is_err());
    }

    #[test]
    fn resolve_sanitizes() {
        let config = Config { rows: Some(1), columns: Some(0), speed: Some(9_999), cell_width: Some(0), ..Default::default() };
        let settings = config.resolve();
        assert_eq!(settings.rows, 5);
        assert_eq!(settings.columns, 5);
        assert_eq!(settings.speed_ms, 500);
        assert_eq!(settings.cell_width, 1);
    }

    #[test]
    fn merge_prefers_overrides() {
        let file = Config { rows: Some(10), columns: Some(30), title: Some("file".into()), ..Default::default() };
        let cli = Config { columns: Some(12), speed: Some(200), ..Default::default() };
        let merged = file.merge(cli);
        assert_eq!(merged.rows, Some(10));
        assert_eq!(merged.columns, Some(12));
        assert_eq!(merged.speed, Some(200));
        assert_eq!(merged.title.as_deref(), Some("file"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        writeln!(file, "columns: 33\ncolor_cycle: bounce").expect("write failed");
        let config = Config::load(Some(file.path())).expect("load failed");
        assert_eq!(config.columns, Some(33));
        assert_eq!(config.color_cycle, Some(ColorCycleTrigger::Bounce));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nope.yaml");
        let err = Config::load(Some(path.as_path())).expect_err("load succeeded");
        assert!(matches!(err, ConfigError::Io { .. }));
        let message = err.to_string();
        assert!(message.starts_with("failed to read config file"), "{message}");
        assert!(message.contains("nope.yaml"), "{message}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        writeln!(file, "rows: [1, 2").expect("write failed");
        let err = Config::load(Some(file.path())).expect_err("load succeeded");
        assert!(matches!(err, ConfigError::Parse { .. }));
        let message = err.to_string();
        assert!(message.starts_with("invalid config file"), "{message}");
        assert!(message.contains(&file.path().display().to_string()), "{message}");
    }
}
