//! Markdown output formatters for CLI commands

use lsp_types::{CompletionItem, CompletionItemKind, Hover, HoverContents, MarkedString};

use crate::lsp::hover::function_content;
use crate::model::{BuildSummary, FunctionDescriptor, ListEntry};

fn kind_label(kind: Option<CompletionItemKind>) -> &'static str {
    match kind {
        Some(CompletionItemKind::FUNCTION) => "function",
        Some(CompletionItemKind::VALUE) => "value",
        Some(CompletionItemKind::OPERATOR) => "operator",
        Some(CompletionItemKind::SNIPPET) => "snippet",
        _ => "text",
    }
}

/// Format a BuildSummary as markdown
pub fn build(summary: &BuildSummary) -> String {
    format!(
        "Wrote {} entries from `{}` to `{}`\n",
        summary.entries, summary.source, summary.output
    )
}

/// Format completion candidates as a markdown list
pub fn completions(items: &[CompletionItem]) -> String {
    let mut md = format!("# Completions ({})\n\n", items.len());

    if items.is_empty() {
        md.push_str("No results.\n");
        return md;
    }

    for item in items {
        md.push_str(&format!("- `{}` ({})", item.label, kind_label(item.kind)));
        if let Some(detail) = item.detail.as_deref().filter(|d| !d.is_empty()) {
            md.push_str(&format!(": {detail}"));
        }
        md.push('\n');
    }
    md
}

/// Hover payload as plain markdown
pub fn hover(hover: &Hover) -> String {
    let mut md = match &hover.contents {
        HoverContents::Markup(markup) => markup.value.clone(),
        HoverContents::Scalar(s) => marked(s),
        HoverContents::Array(parts) => parts.iter().map(marked).collect::<Vec<_>>().join("\n\n"),
    };
    md.push('\n');
    md
}

fn marked(s: &MarkedString) -> String {
    match s {
        MarkedString::String(text) => text.clone(),
        MarkedString::LanguageString(ls) => format!("```{}\n{}\n```", ls.language, ls.value),
    }
}

/// Format one catalog entry with its parameter table
pub fn descriptor(function: &FunctionDescriptor) -> String {
    let mut md = format!("# {}\n\n", function.name);
    md.push_str(&format!("**Category**: {}\n\n", function.category.as_str()));
    md.push_str(&function_content(function));
    md.push('\n');

    if !function.parameters.is_empty() {
        md.push_str("\n## Parameters\n\n");
        for p in &function.parameters {
            md.push_str(&format!("- `{}`: `{}`", p.name, p.param_type));
            if p.optional {
                md.push_str(" (optional)");
            }
            if !p.description.is_empty() {
                md.push_str(&format!(" {}", p.description));
            }
            md.push('\n');
        }
    }
    md
}

/// Format catalog entries as a markdown list
pub fn list(entries: &[ListEntry]) -> String {
    let mut md = String::new();

    if entries.is_empty() {
        md.push_str("No functions.\n");
        return md;
    }

    for entry in entries {
        md.push_str(&format!(
            "- `{}` [{}]\n",
            entry.signature,
            entry.category.as_str()
        ));
    }
    md
}
