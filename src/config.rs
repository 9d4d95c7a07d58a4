use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ui::theme::Theme;

pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

const HISTORY_LIMIT_MIN: usize = 1;
const HISTORY_LIMIT_MAX: usize = 10_000;

/// On-disk shape of `config.toml`. Every field is optional; anything absent
/// falls back to the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    theme: Option<String>,
    history_limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: String,
    pub history_limit: usize,
}

impl Config {
    /// Resolve configuration: built-in defaults, overridden by the optional
    /// config file, overridden by environment variables.
    pub fn load() -> Result<Self> {
        let file = match config_file_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => ConfigFile::default(),
        };
        Ok(Self::resolve(file))
    }

    fn resolve(file: ConfigFile) -> Self {
        let theme = std::env::var("TALLY_THEME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let history_limit = env_override_usize(
            "TALLY_HISTORY_LIMIT",
            file.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
            HISTORY_LIMIT_MIN,
            HISTORY_LIMIT_MAX,
        );

        Self {
            theme,
            history_limit,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if Theme::by_name(&self.theme).is_none() {
            bail!(
                "Unknown theme '{}': expected one of {}",
                self.theme,
                Theme::names().join(", ")
            );
        }

        if !(HISTORY_LIMIT_MIN..=HISTORY_LIMIT_MAX).contains(&self.history_limit) {
            bail!(
                "Invalid history limit {}: expected {}..={}",
                self.history_limit,
                HISTORY_LIMIT_MIN,
                HISTORY_LIMIT_MAX
            );
        }

        Ok(())
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tally").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("invalid config file {}", path.display()))
}

fn env_override_usize(key: &str, default: usize, min: usize, max: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .map(|v| v.clamp(min, max))
        .unwrap_or(default)
}
