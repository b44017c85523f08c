//! Hover content formatting.

use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};

use crate::model::{FunctionDescriptor, VocabularyElement};

/// Format a catalog entry as markdown: signature, description, examples.
pub fn function_content(function: &FunctionDescriptor) -> String {
    let mut lines = vec![
        format!("```typescript\n{}\n```", function.signature),
        String::new(),
        function.description.clone(),
    ];

    if !function.examples.is_empty() {
        lines.push(String::new());
        lines.push("**Examples:**".to_string());
        lines.push(format!("```javascript\n{}\n```", function.examples.join("\n")));
    }

    lines.join("\n")
}

/// Format a mini-notation element as markdown, with an optional extra line
/// (such as the octave of a note) after the description.
pub fn element_content(element: &VocabularyElement, extra: Option<&str>) -> String {
    let mut lines = vec![
        format!("**{}**", element.name),
        String::new(),
        element.description.clone(),
    ];

    if let Some(extra) = extra {
        lines.push(String::new());
        lines.push(extra.to_string());
    }

    if !element.examples.is_empty() {
        lines.push(String::new());
        lines.push("**Examples:**".to_string());
        lines.push("```javascript".to_string());
        lines.extend(element.examples.iter().cloned());
        lines.push("```".to_string());
    }

    lines.join("\n")
}

/// Wrap markdown in a hover payload
pub fn markdown_hover(value: String) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: None,
    }
}
