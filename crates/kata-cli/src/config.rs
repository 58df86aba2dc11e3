//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config <path>` (must exist)
//! 2. `$KATA_CONFIG` environment variable
//! 3. `<platform config dir>/config.toml`
//! 4. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kata_core::{Engine, DEFAULT_MAX_TABLE_LEN};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub permutation: PermutationConfig,
    pub output: OutputConfig,
}

/// Interactive prompt settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub prompt: String,
    /// Invalid lines tolerated before giving up. 0 re-prompts forever.
    pub max_attempts: usize,
}

/// Permutation engine settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PermutationConfig {
    pub engine: Engine,
    /// Longest input accepted by the table engine and by full listings.
    pub max_table_len: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json: bool,
}

// --- Defaults ---

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            max_attempts: 0,
        }
    }
}

impl Default for PermutationConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Pivot,
            max_table_len: DEFAULT_MAX_TABLE_LEN,
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return load_config_from(p);
    }

    if let Some(p) = config_path() {
        if p.exists() {
            return load_config_from(&p);
        }
    }

    Ok(Config::default())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Resolve the implicit config file path.
fn config_path() -> Option<PathBuf> {
    // 1. Environment variable
    if let Ok(p) = std::env::var("KATA_CONFIG") {
        return Some(PathBuf::from(p));
    }

    // 2. Platform config dir
    directories::ProjectDirs::from("dev", "kata", "kata")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Show the active config path (for `kata config`).
pub fn show_config_path(explicit: Option<&Path>) -> String {
    if let Some(p) = explicit {
        return format!("{} (from --config)", p.display());
    }
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}
