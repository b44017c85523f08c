//! Quoted-literal detection around a cursor.
//!
//! Only double quotes and backticks open a literal; single quotes are left to
//! ordinary code. Literals never span lines.

use lsp_types::Position;

use crate::model::StringContext;

/// Fetch a line of `text` by zero-based index. Empty lines count as missing.
pub fn line_at(text: &str, line: usize) -> Option<&str> {
    text.split('\n').nth(line).filter(|l| !l.is_empty())
}

/// Convert a UTF-16 column (the editor protocol's default unit) into a char
/// index of `line`. A column inside a surrogate pair rounds down; columns past
/// the end stay past the end by the same distance.
pub fn char_index(line: &str, utf16_column: usize) -> usize {
    let mut units = 0;
    for (index, c) in line.chars().enumerate() {
        let next = units + c.len_utf16();
        if next > utf16_column {
            return index;
        }
        units = next;
    }
    line.chars().count() + (utf16_column - units)
}

fn is_delimiter(c: char) -> bool {
    c == '"' || c == '`'
}

/// Find the `(open, close)` delimiter indices of the literal holding `cursor`.
///
/// The first literal containing the cursor wins. An unterminated literal
/// extends to the end of the line.
fn find_boundaries(chars: &[char], cursor: usize) -> Option<(usize, usize)> {
    let mut open: Option<(usize, char)> = None;

    for (i, &c) in chars.iter().enumerate() {
        match open {
            None if is_delimiter(c) => open = Some((i, c)),
            Some((start, quote)) if c == quote && chars[i - 1] != '\\' => {
                if cursor > start && cursor <= i {
                    return Some((start, i));
                }
                open = None;
            }
            _ => {}
        }
    }

    match open {
        Some((start, _)) if cursor > start => Some((start, chars.len())),
        _ => None,
    }
}

/// Locate the literal enclosing character `cursor` of a single line.
///
/// `cursor` and the returned offsets are char indices.
pub fn locate(line: &str, cursor: usize) -> Option<StringContext> {
    let chars: Vec<char> = line.chars().collect();
    let (start, end) = find_boundaries(&chars, cursor)?;

    Some(StringContext {
        in_string: true,
        string_start: start,
        string_end: end,
        content: chars[start + 1..end].iter().collect(),
        cursor_offset: cursor - start - 1,
    })
}

/// Locate the literal enclosing `position` in a full document.
/// `position.character` is a UTF-16 column.
pub fn string_context(text: &str, position: Position) -> Option<StringContext> {
    let line = line_at(text, position.line as usize)?;
    locate(line, char_index(line, position.character as usize))
}
