//! Strudel-Index: completion and hover assistance for Strudel patterns
//!
//! This library builds a function catalog from JSDoc-style comments in the
//! Strudel sources and answers editor queries (completion, hover) against it
//! and the mini-notation vocabulary. It is used by the `strudel-index` CLI,
//! and can be embedded directly in an editor protocol front end.

pub mod catalog;
pub mod config;
pub mod format;
pub mod knowledge;
pub mod lsp;
pub mod model;
pub mod parse;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

pub use catalog::Catalog;
pub use config::Config;
pub use knowledge::KnowledgeBase;

/// Build the catalog from `source_dir` and write it to `output`
///
/// # Arguments
/// * `source_dir` - Directory holding the documented source files
/// * `output` - Path of the JSON artifact to (re)write
/// * `extensions` - File extensions to scan, without the dot
pub fn build_knowledge_base(
    source_dir: &Path,
    output: &Path,
    extensions: &[String],
) -> Result<model::BuildSummary> {
    let catalog = parse::build_catalog(source_dir, extensions)?;
    catalog.save(output)?;

    Ok(model::BuildSummary {
        source: source_dir.display().to_string(),
        output: output.display().to_string(),
        entries: catalog.len(),
    })
}

/// Read a document from `path`, or from stdin when `path` is `-`
pub fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Look up one catalog entry by exact name
pub fn describe<'a>(kb: &'a KnowledgeBase, name: &str) -> Option<&'a model::FunctionDescriptor> {
    lsp::functions::resolve(&kb.catalog, name)
}

/// List catalog entries, optionally filtered by name prefix and category
///
/// The prefix match ignores case, like completion does.
pub fn list_functions(
    kb: &KnowledgeBase,
    prefix: Option<&str>,
    category: Option<model::Category>,
) -> Vec<model::ListEntry> {
    lsp::functions::matching(&kb.catalog, prefix)
        .filter(|f| category.map_or(true, |c| f.category == c))
        .map(|f| model::ListEntry {
            name: f.name.clone(),
            signature: f.signature.clone(),
            category: f.category,
        })
        .collect()
}
