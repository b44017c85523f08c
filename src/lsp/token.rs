//! Word and operator extraction around a cursor.

use lsp_types::Position;

use super::scanner::{char_index, line_at};

/// Single-character mini-notation operators.
pub const OPERATORS: [char; 14] = [
    '*', '/', '@', '!', '?', '|', '~', ',', '[', ']', '<', '>', '(', ')',
];

/// Which characters make up a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// Identifiers in ordinary code: `[A-Za-z0-9_]`
    Code,
    /// Words inside notation literals, where `#` marks sharps: `[A-Za-z0-9#_]`
    Notation,
}

impl WordClass {
    fn contains(self, c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || (self == WordClass::Notation && c == '#')
    }
}

/// Expand left and right from `cursor` over word characters.
///
/// Returns `None` when the cursor is past the end of `text` or touches no
/// word character on either side.
pub fn extract_word(text: &str, cursor: usize, class: WordClass) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    if cursor > chars.len() {
        return None;
    }

    let mut start = cursor;
    while start > 0 && class.contains(chars[start - 1]) {
        start -= 1;
    }
    let mut end = cursor;
    while end < chars.len() && class.contains(chars[end]) {
        end += 1;
    }

    if start == end {
        return None;
    }
    Some(chars[start..end].iter().collect())
}

/// The code identifier under `position` (a UTF-16 column) in a full document.
pub fn word_at_position(text: &str, position: Position) -> Option<String> {
    let line = line_at(text, position.line as usize)?;
    extract_word(line, char_index(line, position.character as usize), WordClass::Code)
}

/// The operator at `offset`, or just before it when `offset` is the end of
/// `content`.
pub fn operator_at(content: &str, offset: usize) -> Option<char> {
    let chars: Vec<char> = content.chars().collect();
    if offset > chars.len() {
        return None;
    }

    let c = match chars.get(offset) {
        Some(&c) => c,
        None => *chars.get(offset.checked_sub(1)?)?,
    };
    OPERATORS.contains(&c).then_some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, character: u32) -> Position {
        Position { line, character }
    }

    // ── code words ──

    #[test]
    fn word_at_cursor() {
        assert_eq!(
            word_at_position(r#"note("c e g")"#, pos(0, 2)).as_deref(),
            Some("note")
        );
    }

    #[test]
    fn word_when_cursor_at_end() {
        assert_eq!(
            word_at_position(r#"note("c e g")"#, pos(0, 4)).as_deref(),
            Some("note")
        );
    }

    #[test]
    fn whitespace_has_no_word() {
        assert_eq!(word_at_position("  ", pos(0, 1)), None);
    }

    #[test]
    fn respects_line_index() {
        assert_eq!(word_at_position("a\nb", pos(1, 0)).as_deref(), Some("b"));
    }

    #[test]
    fn partial_word_at_end_of_line() {
        assert_eq!(word_at_position("del", pos(0, 3)).as_deref(), Some("del"));
    }

    #[test]
    fn out_of_range_line_has_no_word() {
        assert_eq!(word_at_position("note", pos(5, 0)), None);
    }

    #[test]
    fn empty_line_has_no_word() {
        assert_eq!(word_at_position("note\n\nrev", pos(1, 0)), None);
    }

    #[test]
    fn word_before_paren() {
        assert_eq!(word_at_position("note(", pos(0, 4)).as_deref(), Some("note"));
    }

    #[test]
    fn word_after_dot() {
        assert_eq!(
            word_at_position(r#"note("c").lpf(500)"#, pos(0, 12)).as_deref(),
            Some("lpf")
        );
    }

    #[test]
    fn word_after_astral_character() {
        // the note emoji takes UTF-16 columns 0 and 1
        let text = "\u{1F3B5} lpf";
        assert_eq!(word_at_position(text, pos(0, 4)).as_deref(), Some("lpf"));
        assert_eq!(word_at_position(text, pos(0, 6)).as_deref(), Some("lpf"));
        assert_eq!(word_at_position(text, pos(0, 2)), None);
    }

    #[test]
    fn code_words_exclude_hash() {
        assert_eq!(extract_word("c#3", 0, WordClass::Code).as_deref(), Some("c"));
    }

    #[test]
    fn cursor_past_end_has_no_word() {
        assert_eq!(extract_word("rev", 10, WordClass::Code), None);
    }

    // ── notation words ──

    #[test]
    fn notation_word_at_cursor() {
        assert_eq!(
            extract_word("c3 e3 g3", 1, WordClass::Notation).as_deref(),
            Some("c3")
        );
        assert_eq!(
            extract_word("c3 e3 g3", 2, WordClass::Notation).as_deref(),
            Some("c3")
        );
    }

    #[test]
    fn notation_word_between_spaces() {
        assert_eq!(extract_word("c3  e3", 3, WordClass::Notation), None);
    }

    #[test]
    fn notation_word_with_sharp() {
        assert_eq!(
            extract_word("c#3 eb3", 2, WordClass::Notation).as_deref(),
            Some("c#3")
        );
    }

    #[test]
    fn notation_word_stops_at_operators() {
        assert_eq!(
            extract_word("bd*4", 1, WordClass::Notation).as_deref(),
            Some("bd")
        );
        assert_eq!(
            extract_word("[bd sd]", 4, WordClass::Notation).as_deref(),
            Some("sd")
        );
    }

    #[test]
    fn notation_word_out_of_bounds() {
        assert_eq!(extract_word("c3", 10, WordClass::Notation), None);
    }

    // ── operators ──

    #[test]
    fn detects_star() {
        assert_eq!(operator_at("bd*4", 2), Some('*'));
    }

    #[test]
    fn detects_slash() {
        assert_eq!(operator_at("bd/2", 2), Some('/'));
    }

    #[test]
    fn detects_rest() {
        assert_eq!(operator_at("bd ~ sd", 3), Some('~'));
    }

    #[test]
    fn detects_brackets() {
        assert_eq!(operator_at("[bd bd]", 0), Some('['));
        assert_eq!(operator_at("<bd sd>", 0), Some('<'));
    }

    #[test]
    fn detects_comma() {
        assert_eq!(operator_at("bd,sd", 2), Some(','));
    }

    #[test]
    fn detects_euclid_paren() {
        assert_eq!(operator_at("bd(3,8)", 2), Some('('));
    }

    #[test]
    fn non_operator() {
        assert_eq!(operator_at("bd sd", 1), None);
    }

    #[test]
    fn no_fallback_when_char_present() {
        // the character at the cursor exists, so the '*' before it is not used
        assert_eq!(operator_at("bd*4", 3), None);
    }

    #[test]
    fn falls_back_at_end_of_content() {
        assert_eq!(operator_at("[bd sd]", 7), Some(']'));
        assert_eq!(operator_at("bd", 2), None);
    }

    #[test]
    fn empty_content() {
        assert_eq!(operator_at("", 0), None);
    }

    #[test]
    fn offset_past_end() {
        assert_eq!(operator_at("bd*", 9), None);
    }
}
