//! Configuration loading.
//!
//! Settings come from a TOML file named by `--config` or the
//! `STRUDEL_INDEX_CONFIG` environment variable; without either, defaults
//! apply. `STRUDEL_INDEX_DATA` moves the data directory used by the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_ENV: &str = "STRUDEL_INDEX_CONFIG";
pub const DATA_DIR_ENV: &str = "STRUDEL_INDEX_DATA";

/// Get the data directory.
/// Tests and deployments can override this with `STRUDEL_INDEX_DATA`.
pub fn data_dir() -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("data"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Knowledge-base artifact produced by `build`
    pub catalog: PathBuf,
    /// Replaces the bundled mini-notation tables
    pub mini_notation: Option<PathBuf>,
    /// Replaces the bundled extended sound tables
    pub extended_vocabulary: Option<PathBuf>,
    pub use_extended_vocabulary: bool,
    /// File extensions scanned by the builder
    pub source_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: data_dir().join("strudel-api.json"),
            mini_notation: None,
            extended_vocabulary: None,
            use_extended_vocabulary: true,
            source_extensions: vec!["mjs".to_string()],
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file. Relative paths inside it are taken relative to
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Explicit path first, then the environment, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.catalog);
        if let Some(p) = self.mini_notation.as_mut() {
            join(p);
        }
        if let Some(p) = self.extended_vocabulary.as_mut() {
            join(p);
        }
    }
}
