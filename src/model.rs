use serde::{Deserialize, Serialize};

/// Functional grouping of a documented function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    Effect,
    Pattern,
    Synth,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Effect => "effect",
            Category::Pattern => "pattern",
            Category::Synth => "synth",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(Category::Core),
            "effect" => Ok(Category::Effect),
            "pattern" => Ok(Category::Pattern),
            "synth" => Ok(Category::Synth),
            _ => Err(()),
        }
    }
}

/// A documented function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
    pub optional: bool,
}

/// One entry of the function catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub signature: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    pub examples: Vec<String>,
    pub category: Category,
}

impl FunctionDescriptor {
    /// Build a descriptor, deriving its signature from name and parameters
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<Parameter>,
        examples: Vec<String>,
        category: Category,
    ) -> Self {
        let name = name.into();
        let signature = build_signature(&name, &parameters);
        Self {
            name,
            signature,
            description: description.into(),
            parameters,
            examples,
            category,
        }
    }

    /// Copy of this descriptor under another name (used for synonyms)
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            signature: build_signature(name, &self.parameters),
            ..self.clone()
        }
    }
}

/// Display signature: `name()` or `name(a: T, b: U)`
pub fn build_signature(name: &str, parameters: &[Parameter]) -> String {
    let params = parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.param_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{name}({params})")
}

/// Kind of a mini-notation vocabulary element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyCategory {
    Note,
    Sample,
    Operator,
    Modifier,
}

/// A word or symbol of the mini-notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyElement {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
    pub category: VocabularyCategory,
}

/// Core mini-notation tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiniNotationVocabulary {
    pub notes: Vec<VocabularyElement>,
    pub samples: Vec<VocabularyElement>,
    pub operators: Vec<VocabularyElement>,
}

/// Optional sound-name tables (general MIDI, drum machines, synths)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedVocabulary {
    pub gm_instruments: Vec<VocabularyElement>,
    pub drum_machines: Vec<VocabularyElement>,
    pub synths: Vec<VocabularyElement>,
}

impl ExtendedVocabulary {
    /// Sub-tables in lookup order
    pub fn tables(&self) -> [&[VocabularyElement]; 3] {
        [
            self.gm_instruments.as_slice(),
            self.drum_machines.as_slice(),
            self.synths.as_slice(),
        ]
    }
}

/// The quoted literal enclosing a cursor, on a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringContext {
    pub in_string: bool,
    /// Index of the opening delimiter
    pub string_start: usize,
    /// Index of the closing delimiter, or the line length when unterminated
    pub string_end: usize,
    pub content: String,
    /// Cursor position relative to the start of `content`
    pub cursor_offset: usize,
}

/// A note word split into its pitch and optional octave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNoteToken {
    /// Lowercase letter plus optional accidental, e.g. `c#`
    pub note: String,
    pub octave: Option<String>,
}

/// Result of a knowledge-base build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub source: String,
    pub output: String,
    pub entries: usize,
}

/// One line of the `list` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub signature: String,
    pub category: Category,
}
