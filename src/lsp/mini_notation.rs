//! Resolution and completion of words inside notation literals.

use lsp_types::{CompletionItem, CompletionItemKind, Documentation, Hover, InsertTextFormat};
use regex::Regex;

use super::hover::{element_content, markdown_hover};
use super::matches_prefix;
use crate::model::{ExtendedVocabulary, MiniNotationVocabulary, ParsedNoteToken, VocabularyElement};

pub const EUCLIDEAN_LABEL: &str = "euclidean";

/// A vocabulary match for a hovered word or operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub element: &'a VocabularyElement,
    /// Octave digit of a note word such as `c#3`
    pub octave: Option<String>,
}

impl<'a> Resolution<'a> {
    fn plain(element: &'a VocabularyElement) -> Self {
        Self {
            element,
            octave: None,
        }
    }

    pub fn to_markdown(&self) -> String {
        let extra = self.octave.as_ref().map(|o| format!("Octave: {o}"));
        element_content(self.element, extra.as_deref())
    }
}

fn note_re() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^([a-g][#b]?)(\d)?$").expect("invalid note pattern"))
}

/// Split a note word into lowercase pitch and optional single-digit octave.
pub fn parse_note(word: &str) -> Option<ParsedNoteToken> {
    let caps = note_re().captures(word)?;
    Some(ParsedNoteToken {
        note: caps.get(1)?.as_str().to_lowercase(),
        octave: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

fn find_note<'a>(vocab: &'a MiniNotationVocabulary, note: &str) -> Option<&'a VocabularyElement> {
    vocab.notes.iter().find(|n| n.name == note)
}

fn find_sample<'a>(vocab: &'a MiniNotationVocabulary, word: &str) -> Option<&'a VocabularyElement> {
    let word = word.to_lowercase();
    vocab.samples.iter().find(|s| s.name.to_lowercase() == word)
}

fn find_operator(vocab: &MiniNotationVocabulary, op: char) -> Option<&VocabularyElement> {
    let mut buf = [0u8; 4];
    let op: &str = op.encode_utf8(&mut buf);
    vocab.operators.iter().find(|o| o.name == op)
}

/// Search instruments, then drum machines, then synths.
fn find_extended<'a>(ext: &'a ExtendedVocabulary, word: &str) -> Option<&'a VocabularyElement> {
    let word = word.to_lowercase();
    ext.tables()
        .into_iter()
        .find_map(|table| table.iter().find(|e| e.name.to_lowercase() == word))
}

fn resolve_note<'a>(vocab: &'a MiniNotationVocabulary, word: &str) -> Option<Resolution<'a>> {
    let parsed = parse_note(word)?;
    let element = find_note(vocab, &parsed.note)?;
    Some(Resolution {
        element,
        octave: parsed.octave,
    })
}

/// Resolve a hovered position. The checks run in a fixed order and the first
/// hit wins: operator, note, sample, extended tables.
pub fn resolve<'a>(
    vocab: &'a MiniNotationVocabulary,
    extended: Option<&'a ExtendedVocabulary>,
    word: Option<&str>,
    operator: Option<char>,
) -> Option<Resolution<'a>> {
    operator
        .and_then(|op| find_operator(vocab, op))
        .map(Resolution::plain)
        .or_else(|| word.and_then(|w| resolve_note(vocab, w)))
        .or_else(|| word.and_then(|w| find_sample(vocab, w)).map(Resolution::plain))
        .or_else(|| {
            let (ext, w) = extended.zip(word)?;
            find_extended(ext, w).map(Resolution::plain)
        })
}

/// Hover for a word and/or operator found inside a literal.
pub fn hover(
    vocab: &MiniNotationVocabulary,
    extended: Option<&ExtendedVocabulary>,
    word: Option<&str>,
    operator: Option<char>,
) -> Option<Hover> {
    resolve(vocab, extended, word, operator).map(|r| markdown_hover(r.to_markdown()))
}

fn examples_doc(element: &VocabularyElement) -> Option<Documentation> {
    Some(Documentation::String(element.examples.join("\n")))
}

fn element_item(
    element: &VocabularyElement,
    label: String,
    detail: String,
    kind: CompletionItemKind,
) -> CompletionItem {
    CompletionItem {
        insert_text: Some(label.clone()),
        label,
        kind: Some(kind),
        detail: Some(detail),
        documentation: examples_doc(element),
        ..Default::default()
    }
}

fn value_item(element: &VocabularyElement) -> CompletionItem {
    element_item(
        element,
        element.name.clone(),
        element.description.clone(),
        CompletionItemKind::VALUE,
    )
}

/// The plain note followed by its ten octave variants `0` through `9`.
fn note_items(note: &VocabularyElement) -> impl Iterator<Item = CompletionItem> + '_ {
    let octaves = (0..=9).map(move |octave| {
        element_item(
            note,
            format!("{}{octave}", note.name),
            format!("{} (octave {octave})", note.description),
            CompletionItemKind::VALUE,
        )
    });
    std::iter::once(value_item(note)).chain(octaves)
}

fn operator_item(op: &VocabularyElement) -> CompletionItem {
    element_item(
        op,
        op.name.clone(),
        op.description.clone(),
        CompletionItemKind::OPERATOR,
    )
}

fn euclidean_snippet() -> CompletionItem {
    CompletionItem {
        label: EUCLIDEAN_LABEL.to_string(),
        kind: Some(CompletionItemKind::SNIPPET),
        detail: Some("Euclidean rhythm (pulses, steps, offset)".to_string()),
        documentation: Some(Documentation::String(
            "Creates a Euclidean rhythm pattern\nExample: bd(3,8) - 3 beats spread over 8 steps"
                .to_string(),
        )),
        insert_text: Some("(${1:3},${2:8})".to_string()),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        ..Default::default()
    }
}

fn wants_euclidean(prefix: Option<&str>) -> bool {
    match prefix {
        None => true,
        Some(p) => EUCLIDEAN_LABEL.starts_with(&p.to_lowercase()),
    }
}

/// Completion candidates for a literal, filtered by `prefix`
/// (case-insensitive; `None` or empty matches everything).
///
/// Order: notes with octave variants, samples, operators, extended tables,
/// then the euclidean snippet.
pub fn completions(
    vocab: &MiniNotationVocabulary,
    extended: Option<&ExtendedVocabulary>,
    prefix: Option<&str>,
) -> Vec<CompletionItem> {
    let keep = |e: &&VocabularyElement| matches_prefix(&e.name, prefix);

    let mut items: Vec<CompletionItem> = vocab
        .notes
        .iter()
        .filter(keep)
        .flat_map(note_items)
        .collect();
    items.extend(vocab.samples.iter().filter(keep).map(value_item));
    items.extend(vocab.operators.iter().filter(keep).map(operator_item));

    if let Some(ext) = extended {
        for table in ext.tables() {
            items.extend(table.iter().filter(keep).map(value_item));
        }
    }

    if wants_euclidean(prefix) {
        items.push(euclidean_snippet());
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VocabularyCategory;

    fn el(name: &str, description: &str, example: &str, category: VocabularyCategory) -> VocabularyElement {
        VocabularyElement {
            name: name.to_string(),
            description: description.to_string(),
            examples: vec![example.to_string()],
            category,
        }
    }

    fn vocab() -> MiniNotationVocabulary {
        use VocabularyCategory::*;
        MiniNotationVocabulary {
            notes: vec![
                el("c", "C natural note", r#"note("c3")"#, Note),
                el("c#", "C sharp note", r#"note("c#3")"#, Note),
                el("d", "D natural note", r#"note("d3")"#, Note),
                el("eb", "E flat note", r#"note("eb3")"#, Note),
            ],
            samples: vec![
                el("bd", "Bass drum", r#"s("bd")"#, Sample),
                el("sd", "Snare drum", r#"s("sd")"#, Sample),
                el("hh", "Hi-hat", r#"s("hh")"#, Sample),
            ],
            operators: vec![
                el("*", "Multiply/speed up", r#"s("bd*4")"#, Operator),
                el("/", "Divide/slow down", r#"s("bd/2")"#, Operator),
                el("~", "Rest/silence", r#"s("bd ~ sd")"#, Operator),
            ],
        }
    }

    fn extended() -> ExtendedVocabulary {
        use VocabularyCategory::Sample;
        ExtendedVocabulary {
            gm_instruments: vec![el("gm_piano", "General MIDI piano", r#"s("gm_piano")"#, Sample)],
            drum_machines: vec![
                el("RolandTR808", "Roland TR-808", r#"bank("RolandTR808")"#, Sample),
                el("sawdrum", "Drum machine entry", r#"s("sawdrum")"#, Sample),
            ],
            synths: vec![
                el("sawtooth", "Sawtooth oscillator", r#"s("sawtooth")"#, Sample),
                el("sawdrum", "Synth entry", r#"s("sawdrum")"#, Sample),
            ],
        }
    }

    fn value(hover: Option<Hover>) -> String {
        match hover.expect("expected a hover").contents {
            lsp_types::HoverContents::Markup(m) => m.value,
            other => panic!("unexpected contents: {other:?}"),
        }
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    // ── parse_note ──

    #[test]
    fn parses_plain_and_octave_notes() {
        assert_eq!(
            parse_note("c3"),
            Some(ParsedNoteToken {
                note: "c".into(),
                octave: Some("3".into())
            })
        );
        assert_eq!(parse_note("eb").unwrap().octave, None);
        assert_eq!(parse_note("C#4").unwrap().note, "c#");
        assert_eq!(parse_note("Bb").unwrap().note, "bb");
    }

    #[test]
    fn rejects_non_notes() {
        assert!(parse_note("h3").is_none());
        assert!(parse_note("c34").is_none());
        assert!(parse_note("bd").is_none());
        assert!(parse_note("").is_none());
    }

    // ── hover ──

    #[test]
    fn hover_note_with_octave() {
        let md = value(hover(&vocab(), None, Some("c3"), None));
        assert!(md.contains("C natural note"));
        assert!(md.contains("Octave: 3"));
    }

    #[test]
    fn hover_sharp_note() {
        let md = value(hover(&vocab(), None, Some("c#4"), None));
        assert!(md.contains("C sharp note"));
        assert!(md.contains("Octave: 4"));
    }

    #[test]
    fn hover_flat_note() {
        let md = value(hover(&vocab(), None, Some("eb3"), None));
        assert!(md.contains("E flat note"));
    }

    #[test]
    fn hover_note_without_octave() {
        let md = value(hover(&vocab(), None, Some("c"), None));
        assert!(md.contains("C natural note"));
        assert!(!md.contains("Octave:"));
    }

    #[test]
    fn hover_uppercase_note() {
        let md = value(hover(&vocab(), None, Some("D2"), None));
        assert!(md.contains("D natural note"));
    }

    #[test]
    fn hover_sample_includes_examples() {
        let md = value(hover(&vocab(), None, Some("bd"), None));
        assert!(md.contains("Bass drum"));
        assert!(md.contains("Examples"));
        assert!(md.contains(r#"s("bd")"#));
    }

    #[test]
    fn hover_sample_ignores_case() {
        let md = value(hover(&vocab(), None, Some("BD"), None));
        assert!(md.contains("Bass drum"));
    }

    #[test]
    fn hover_operator() {
        let md = value(hover(&vocab(), None, None, Some('*')));
        assert!(md.contains("Multiply/speed up"));
        let md = value(hover(&vocab(), None, None, Some('~')));
        assert!(md.contains("Rest/silence"));
    }

    #[test]
    fn operator_beats_word() {
        let md = value(hover(&vocab(), None, Some("bd"), Some('*')));
        assert!(md.contains("Multiply"));
        assert!(!md.contains("Bass drum"));
    }

    #[test]
    fn unknown_operator_falls_through_to_word() {
        // '@' is an operator character but not in this table
        let md = value(hover(&vocab(), None, Some("sd"), Some('@')));
        assert!(md.contains("Snare drum"));
    }

    #[test]
    fn note_beats_sample() {
        let mut v = vocab();
        v.samples.push(el("d", "Sample named d", r#"s("d")"#, VocabularyCategory::Sample));
        let md = value(hover(&v, None, Some("d"), None));
        assert!(md.contains("D natural note"));
    }

    #[test]
    fn unknown_word() {
        assert!(hover(&vocab(), None, Some("xyz"), None).is_none());
    }

    #[test]
    fn nothing_to_resolve() {
        assert!(hover(&vocab(), None, None, None).is_none());
    }

    #[test]
    fn extended_lookup() {
        let ext = extended();
        let md = value(hover(&vocab(), Some(&ext), Some("gm_piano"), None));
        assert!(md.contains("General MIDI piano"));
        let md = value(hover(&vocab(), Some(&ext), Some("rolandtr808"), None));
        assert!(md.contains("Roland TR-808"));
    }

    #[test]
    fn extended_tables_in_order() {
        let ext = extended();
        let md = value(hover(&vocab(), Some(&ext), Some("sawdrum"), None));
        assert!(md.contains("Drum machine entry"));
    }

    #[test]
    fn extended_needs_table() {
        assert!(hover(&vocab(), None, Some("gm_piano"), None).is_none());
    }

    // ── completions ──

    #[test]
    fn note_completions_with_octaves() {
        let items = completions(&vocab(), None, Some("c"));
        let l = labels(&items);
        assert!(l.contains(&"c"));
        assert!(l.contains(&"c3"));
        assert!(l.contains(&"c#"));
        assert!(l.contains(&"c#9"));
        // two base notes, eleven entries each
        assert_eq!(items.len(), 22);
    }

    #[test]
    fn octave_variants_in_order() {
        let items = completions(&vocab(), None, Some("d"));
        let octaves: Vec<&str> = labels(&items)
            .into_iter()
            .filter(|l| l.len() == 2 && l.starts_with('d'))
            .collect();
        assert_eq!(octaves.len(), 10);
        assert_eq!(octaves[0], "d0");
        assert_eq!(octaves[9], "d9");
    }

    #[test]
    fn octave_variant_fields() {
        let items = completions(&vocab(), None, Some("eb"));
        let eb3 = items.iter().find(|i| i.label == "eb3").unwrap();
        assert_eq!(eb3.kind, Some(CompletionItemKind::VALUE));
        assert_eq!(eb3.detail.as_deref(), Some("E flat note (octave 3)"));
        assert_eq!(eb3.insert_text.as_deref(), Some("eb3"));
    }

    #[test]
    fn note_completion_is_repeatable() {
        let a = completions(&vocab(), None, Some("c"));
        let b = completions(&vocab(), None, Some("c"));
        assert_eq!(a, b);
    }

    #[test]
    fn sample_completion() {
        let items = completions(&vocab(), None, Some("b"));
        let bd = items.iter().find(|i| i.label == "bd").unwrap();
        assert_eq!(bd.kind, Some(CompletionItemKind::VALUE));
        assert_eq!(bd.detail.as_deref(), Some("Bass drum"));
        assert_eq!(
            bd.documentation,
            Some(Documentation::String(r#"s("bd")"#.to_string()))
        );
    }

    #[test]
    fn operator_completion() {
        let items = completions(&vocab(), None, Some("*"));
        let star = items.iter().find(|i| i.label == "*").unwrap();
        assert_eq!(star.kind, Some(CompletionItemKind::OPERATOR));
    }

    #[test]
    fn prefix_filters() {
        let items = completions(&vocab(), None, Some("sd"));
        let l = labels(&items);
        assert!(l.contains(&"sd"));
        assert!(!l.contains(&"bd"));
    }

    #[test]
    fn prefix_ignores_case() {
        let items = completions(&vocab(), None, Some("BD"));
        assert!(labels(&items).contains(&"bd"));
    }

    #[test]
    fn no_prefix_returns_everything() {
        let items = completions(&vocab(), None, None);
        // 4 notes * 11 + 3 samples + 3 operators + euclidean
        assert_eq!(items.len(), 51);
        assert_eq!(completions(&vocab(), None, Some("")).len(), 51);
    }

    #[test]
    fn euclidean_snippet_inclusion() {
        let none = completions(&vocab(), None, None);
        let last = none.last().unwrap();
        assert_eq!(last.label, EUCLIDEAN_LABEL);
        assert_eq!(last.kind, Some(CompletionItemKind::SNIPPET));
        assert_eq!(last.insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert_eq!(last.insert_text.as_deref(), Some("(${1:3},${2:8})"));

        let eucl = completions(&vocab(), None, Some("eucl"));
        assert_eq!(labels(&eucl), vec![EUCLIDEAN_LABEL]);

        let xyz = completions(&vocab(), None, Some("xyz"));
        assert!(xyz.is_empty());
    }

    #[test]
    fn no_snippet_for_unrelated_prefix() {
        let items = completions(&vocab(), None, Some("bd"));
        assert!(items.iter().all(|i| i.insert_text_format.is_none()));
    }

    #[test]
    fn extended_completions_follow_operators() {
        let ext = extended();
        let items = completions(&vocab(), Some(&ext), Some("saw"));
        assert_eq!(labels(&items), vec!["sawdrum", "sawtooth", "sawdrum"]);
        assert!(items.iter().all(|i| i.kind == Some(CompletionItemKind::VALUE)));

        let all = completions(&vocab(), Some(&ext), None);
        assert_eq!(all.len(), 51 + 5);
        assert_eq!(all.last().unwrap().label, EUCLIDEAN_LABEL);
    }
}
