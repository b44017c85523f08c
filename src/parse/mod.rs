pub mod category;
pub mod doc_comments;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::catalog::{Catalog, CatalogBuilder};
use crate::model::FunctionDescriptor;
use doc_comments::DocBlock;

/// Parse every named documentation block in one source text, in source order.
/// Blocks without a `@name` are skipped.
pub fn parse_source(content: &str) -> Vec<DocBlock> {
    doc_comments::extract_blocks(content)
        .into_iter()
        .filter_map(|block| {
            let parsed = doc_comments::parse_block(block);
            if parsed.is_none() {
                debug!("skipping documentation block without @name");
            }
            parsed
        })
        .collect()
}

/// Turn a parsed block into its catalog descriptor
pub fn to_descriptor(block: &DocBlock) -> FunctionDescriptor {
    FunctionDescriptor::new(
        block.name.clone(),
        block.description.clone(),
        block.params.clone(),
        block.examples.clone(),
        category::categorize(&block.name),
    )
}

/// Assemble blocks into a catalog.
///
/// The first block seen for a name wins. Every block's synonyms become their
/// own entries unless the synonym name is already taken.
pub fn assemble(blocks: impl IntoIterator<Item = DocBlock>) -> Catalog {
    let mut builder = CatalogBuilder::default();

    for block in blocks {
        let descriptor = to_descriptor(&block);
        if !builder.insert(descriptor.clone()) {
            debug!(name = %block.name, "duplicate definition skipped");
        }

        for synonym in &block.synonyms {
            if builder.contains(synonym) {
                debug!(name = %block.name, %synonym, "synonym collides with existing entry");
                continue;
            }
            builder.insert(descriptor.renamed(synonym));
        }
    }

    builder.finish()
}

/// List the source files in `dir` with one of `extensions`, in file-name
/// order. Only the directory itself is scanned, not subdirectories.
pub fn source_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Source directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want == ext));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Build the catalog from every matching file in `dir`.
///
/// Any unreadable file aborts the whole build.
pub fn build_catalog(dir: &Path, extensions: &[String]) -> Result<Catalog> {
    let files = source_files(dir, extensions)?;

    let mut blocks = Vec::new();
    for path in &files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let parsed = parse_source(&content);
        debug!(file = %path.display(), blocks = parsed.len(), "parsed source file");
        blocks.extend(parsed);
    }

    let catalog = assemble(blocks);
    info!(
        files = files.len(),
        functions = catalog.len(),
        "built function catalog"
    );
    Ok(catalog)
}
