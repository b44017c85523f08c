//! Name-based category classification for catalog entries.

use regex::Regex;

use crate::model::Category;

/// Pattern groups in evaluation order; the first group with a matching
/// pattern decides the category.
const GROUPS: &[(Category, &[&str])] = &[
    (
        Category::Effect,
        &[
            r"^lp[a-z]?$",
            r"^hp[a-z]?$",
            r"^bp[a-z]?$",
            "delay",
            "room",
            "reverb",
            "phaser",
            "crush",
            "distort",
            "gain",
            "pan",
            "vowel",
            "attack",
            "decay",
            "sustain",
            "release",
            "tremolo",
            "vibrato",
            "orbit",
            "compress",
            "shape",
            "coarse",
        ],
    ),
    (
        Category::Pattern,
        &[
            r"^fast$",
            r"^slow$",
            r"^rev$",
            r"^jux",
            r"^chunk$",
            r"^ply$",
            r"^struct$",
            r"^mask$",
        ],
    ),
    (
        Category::Synth,
        &[r"^wt", r"^fm", r"sine|saw|square|triangle|noise"],
    ),
];

fn compiled_groups() -> &'static [(Category, Vec<Regex>)] {
    use std::sync::OnceLock;
    static GROUPS_RE: OnceLock<Vec<(Category, Vec<Regex>)>> = OnceLock::new();
    GROUPS_RE.get_or_init(|| {
        GROUPS
            .iter()
            .map(|(category, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("invalid category pattern"))
                    .collect();
                (*category, compiled)
            })
            .collect()
    })
}

/// Classify a function name. Unmatched names are `Core`.
pub fn categorize(name: &str) -> Category {
    compiled_groups()
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(name)))
        .map_or(Category::Core, |(category, _)| *category)
}
