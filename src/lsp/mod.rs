//! Editor-facing queries: completion and hover for a document position.
//!
//! A position inside a `"…"` or `` `…` `` literal is resolved against the
//! mini-notation tables; anywhere else it is resolved against the function
//! catalog. Results use the `lsp-types` data types so any editor protocol
//! front end can pass them through unchanged.

pub mod functions;
pub mod hover;
pub mod mini_notation;
pub mod scanner;
pub mod token;

use lsp_types::{CompletionItem, Hover, Position};

use crate::knowledge::KnowledgeBase;
use token::WordClass;

/// Case-insensitive prefix test; no prefix (or an empty one) matches all.
pub(crate) fn matches_prefix(name: &str, prefix: Option<&str>) -> bool {
    match prefix {
        None | Some("") => true,
        Some(p) => name.to_lowercase().starts_with(&p.to_lowercase()),
    }
}

/// Completion candidates for `position` in `text`.
pub fn complete(text: &str, position: Position, kb: &KnowledgeBase) -> Vec<CompletionItem> {
    if let Some(ctx) = scanner::string_context(text, position) {
        let word = token::extract_word(&ctx.content, ctx.cursor_offset, WordClass::Notation);
        return mini_notation::completions(&kb.vocabulary, kb.extended.as_ref(), word.as_deref());
    }

    let word = token::word_at_position(text, position);
    functions::completions(&kb.catalog, word.as_deref())
}

/// Hover content for `position` in `text`, if anything there is known.
pub fn hover(text: &str, position: Position, kb: &KnowledgeBase) -> Option<Hover> {
    if let Some(ctx) = scanner::string_context(text, position) {
        let word = token::extract_word(&ctx.content, ctx.cursor_offset, WordClass::Notation);
        let operator = token::operator_at(&ctx.content, ctx.cursor_offset);
        return mini_notation::hover(
            &kb.vocabulary,
            kb.extended.as_ref(),
            word.as_deref(),
            operator,
        );
    }

    let word = token::word_at_position(text, position)?;
    functions::hover(&kb.catalog, &word)
}
