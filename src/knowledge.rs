//! The read-only data every query resolves against.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::model::{ExtendedVocabulary, MiniNotationVocabulary};

const BUNDLED_MINI_NOTATION: &str = include_str!("../data/mini-notation.json");
const BUNDLED_EXTENDED: &str = include_str!("../data/extended-samples.json");

/// Function catalog plus mini-notation tables. Built once at startup and
/// shared by reference with every request.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub catalog: Catalog,
    pub vocabulary: MiniNotationVocabulary,
    pub extended: Option<ExtendedVocabulary>,
}

impl KnowledgeBase {
    pub fn new(
        catalog: Catalog,
        vocabulary: MiniNotationVocabulary,
        extended: Option<ExtendedVocabulary>,
    ) -> Self {
        Self {
            catalog,
            vocabulary,
            extended,
        }
    }

    /// Load everything the config points at. The catalog must exist; the
    /// vocabulary tables fall back to the bundled copies.
    pub fn load(config: &Config) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog)?;

        let vocabulary = match &config.mini_notation {
            Some(path) => load_or_bundled(path, BUNDLED_MINI_NOTATION)?,
            None => bundled_vocabulary()?,
        };

        let extended = if config.use_extended_vocabulary {
            Some(match &config.extended_vocabulary {
                Some(path) => load_or_bundled(path, BUNDLED_EXTENDED)?,
                None => bundled_extended_vocabulary()?,
            })
        } else {
            None
        };

        Ok(Self::new(catalog, vocabulary, extended))
    }
}

/// Mini-notation tables shipped with the crate
pub fn bundled_vocabulary() -> Result<MiniNotationVocabulary> {
    serde_json::from_str(BUNDLED_MINI_NOTATION).context("Invalid bundled mini-notation data")
}

/// Extended sound tables shipped with the crate
pub fn bundled_extended_vocabulary() -> Result<ExtendedVocabulary> {
    serde_json::from_str(BUNDLED_EXTENDED).context("Invalid bundled extended vocabulary")
}

fn load_or_bundled<T: DeserializeOwned>(path: &Path, bundled: &str) -> Result<T> {
    if !path.exists() {
        warn!(path = %path.display(), "vocabulary file not found, using bundled data");
        return Ok(serde_json::from_str(bundled)?);
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid vocabulary {}", path.display()))
}
