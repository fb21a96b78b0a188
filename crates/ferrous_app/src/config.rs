//! Application configuration, read from the `[app]` table of a TOML file.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use log::LevelFilter;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Window / viewport and logging settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Initial viewport size in physical pixels.
    pub width: u32,
    pub height: u32,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Ferrous Map Editor".to_string(),
            width: 1280,
            height: 720,
            log: LogConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Also append log lines to this file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level `{}`", self.level))
    }
}

/// Reads and deserialises a TOML file.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_toml(&text).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_toml<T: DeserializeOwned>(text: &str) -> anyhow::Result<T> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_uses_defaults() {
        let cfg: AppConfig = parse_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.log.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn partial_overrides() {
        let cfg: AppConfig = parse_toml(
            r#"
            width = 800
            [log]
            level = "debug"
            file = "editor.log"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 720);
        assert_eq!(cfg.log.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(cfg.log.file.as_deref(), Some(Path::new("editor.log")));
    }

    #[test]
    fn bad_level_is_an_error() {
        let log = LogConfig {
            level: "loud".into(),
            file: None,
        };
        assert!(log.level_filter().is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_toml::<AppConfig>(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
    }
}
