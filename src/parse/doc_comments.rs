//! Documentation comment extraction.
//!
//! A block runs from `/**` to the next `*/`. Inside a block every line is
//! stripped of its `*` decoration and fed through a small state machine:
//! free text before the first tag is the description, and each `@tag` line
//! opens a section that lasts until the next tag line or the end of the block.

use crate::model::Parameter;

/// A documentation block that carried a `@name` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub name: String,
    pub description: String,
    pub params: Vec<Parameter>,
    pub examples: Vec<String>,
    pub synonyms: Vec<String>,
}

/// Section of a block the scanner is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Example,
    /// Any other tag; continuation lines are ignored
    Tag,
}

/// Find the inner text of every `/** ... */` block, markers removed.
///
/// An unterminated trailing block is ignored.
pub fn extract_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find("/**") {
        let after = &rest[start + 3..];
        let Some(end) = after.find("*/") else {
            break;
        };
        blocks.push(&after[..end]);
        rest = &after[end + 2..];
    }
    blocks
}

/// Strip leading whitespace and one `*` decoration, then trim.
fn strip_decoration(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed.strip_prefix('*').unwrap_or(trimmed).trim()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Leading identifier of `text`, possibly empty.
fn leading_ident(text: &str) -> &str {
    let end = text.find(|c| !is_ident_char(c)).unwrap_or(text.len());
    &text[..end]
}

/// Split a tag line (`@word rest`) into its tag word and trimmed argument.
fn split_tag(line: &str) -> (&str, &str) {
    let body = &line[1..];
    match body.find(char::is_whitespace) {
        Some(idx) => (&body[..idx], body[idx..].trim()),
        None => (body, ""),
    }
}

/// Parse a `@param` argument of the form `{type} name description`.
///
/// Anything else (missing type, bracketed optional names) yields `None`.
fn parse_param(arg: &str) -> Option<Parameter> {
    let rest = arg.strip_prefix('{')?;
    let close = rest.find('}')?;
    let param_type = &rest[..close];
    if param_type.is_empty() {
        return None;
    }

    let after = &rest[close + 1..];
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let after = after.trim_start();
    let name = leading_ident(after);
    if name.is_empty() {
        return None;
    }

    Some(Parameter {
        name: name.to_string(),
        param_type: param_type.to_string(),
        description: after[name.len()..].trim().to_string(),
        optional: false,
    })
}

fn flush_example(lines: &mut Vec<&str>, examples: &mut Vec<String>) {
    if !lines.is_empty() {
        examples.push(lines.join("\n"));
        lines.clear();
    }
}

/// Parse the inner text of one block. Returns `None` when the block has no
/// usable `@name`.
pub fn parse_block(block: &str) -> Option<DocBlock> {
    let mut name: Option<String> = None;
    let mut description: Vec<&str> = Vec::new();
    let mut params = Vec::new();
    let mut examples = Vec::new();
    let mut synonyms = Vec::new();
    let mut synonym_tag_seen = false;

    let mut section = Section::Description;
    let mut example_lines: Vec<&str> = Vec::new();

    for raw in block.lines() {
        let line = strip_decoration(raw);

        if line.starts_with('@') {
            if section == Section::Example {
                flush_example(&mut example_lines, &mut examples);
            }

            let (tag, arg) = split_tag(line);
            section = match tag {
                "name" => {
                    let ident = leading_ident(arg);
                    if name.is_none() && !ident.is_empty() {
                        name = Some(ident.to_string());
                    }
                    Section::Tag
                }
                "param" => {
                    params.extend(parse_param(arg));
                    Section::Tag
                }
                "example" => Section::Example,
                // only the first synonym tag of a block counts
                "synonym" | "synonyms" if !synonym_tag_seen => {
                    synonym_tag_seen = true;
                    synonyms.extend(
                        arg.split(|c: char| c == ',' || c.is_whitespace())
                            .filter(|s| !s.is_empty())
                            .map(str::to_string),
                    );
                    Section::Tag
                }
                _ => Section::Tag,
            };
            continue;
        }

        match section {
            Section::Description if !line.is_empty() => description.push(line),
            Section::Example if !line.is_empty() => example_lines.push(line),
            _ => {}
        }
    }

    if section == Section::Example {
        flush_example(&mut example_lines, &mut examples);
    }

    Some(DocBlock {
        name: name?,
        description: description.join(" ").trim().to_string(),
        params,
        examples,
        synonyms,
    })
}
