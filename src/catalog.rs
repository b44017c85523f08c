//! The function catalog: a name-unique, sorted list of descriptors.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::FunctionDescriptor;

/// Primary collation weight of one char: punctuation and symbols sort before
/// digits, digits before letters, letters case-insensitively.
fn primary_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

/// Compare two names the way a locale-aware collator orders identifiers:
/// punctuation before digits before letters, case-insensitive first, then
/// lowercase before uppercase at the first differing character, then by code
/// point.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(primary_key).cmp(b.chars().map(primary_key));

    primary
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map_or(Ordering::Equal, |(x, y)| {
                    y.is_lowercase().cmp(&x.is_lowercase())
                })
        })
        .then_with(|| a.cmp(b))
}

/// Sorted, deduplicated function descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<FunctionDescriptor>,
}

impl Catalog {
    /// Build a catalog from descriptors in priority order. Later entries whose
    /// name was already seen are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = FunctionDescriptor>) -> Self {
        let mut builder = CatalogBuilder::default();
        for entry in entries {
            builder.insert(entry);
        }
        builder.finish()
    }

    pub fn entries(&self) -> &[FunctionDescriptor] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FunctionDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a pretty-printed JSON array with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Parse a catalog artifact. Order and uniqueness are re-established on load.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<FunctionDescriptor> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Load a catalog artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Write the artifact. The file is written beside the target and renamed
    /// into place, so readers never observe a partial catalog.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = self.to_json()?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move catalog into {}", path.display()))?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FunctionDescriptor;
    type IntoIter = std::slice::Iter<'a, FunctionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Accumulates descriptors with first-wins name uniqueness.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    seen: HashSet<String>,
    entries: Vec<FunctionDescriptor>,
}

impl CatalogBuilder {
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Add a descriptor unless its name is taken. Returns whether it was added.
    pub fn insert(&mut self, descriptor: FunctionDescriptor) -> bool {
        if !self.seen.insert(descriptor.name.clone()) {
            return false;
        }
        self.entries.push(descriptor);
        true
    }

    /// Sort by name and freeze.
    pub fn finish(self) -> Catalog {
        let mut entries = self.entries;
        entries.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        Catalog { entries }
    }
}
