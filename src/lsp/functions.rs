//! Catalog lookups for identifiers in ordinary code.

use lsp_types::{CompletionItem, CompletionItemKind, Documentation, Hover};

use super::hover::{function_content, markdown_hover};
use super::matches_prefix;
use crate::catalog::Catalog;
use crate::model::FunctionDescriptor;

/// First entry whose name equals `name` exactly (case-sensitive).
pub fn resolve<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a FunctionDescriptor> {
    catalog.iter().find(|f| f.name == name)
}

pub fn to_completion_item(function: &FunctionDescriptor) -> CompletionItem {
    CompletionItem {
        label: function.name.clone(),
        kind: Some(CompletionItemKind::FUNCTION),
        detail: Some(function.signature.clone()),
        documentation: Some(Documentation::String(function.description.clone())),
        insert_text: Some(function.name.clone()),
        ..Default::default()
    }
}

/// Entries whose name starts with `prefix`, ignoring case, in catalog order.
pub fn matching<'a>(
    catalog: &'a Catalog,
    prefix: Option<&'a str>,
) -> impl Iterator<Item = &'a FunctionDescriptor> + 'a {
    catalog.iter().filter(move |f| matches_prefix(&f.name, prefix))
}

pub fn completions(catalog: &Catalog, prefix: Option<&str>) -> Vec<CompletionItem> {
    matching(catalog, prefix).map(to_completion_item).collect()
}

pub fn hover(catalog: &Catalog, name: &str) -> Option<Hover> {
    resolve(catalog, name).map(|f| markdown_hover(function_content(f)))
}
