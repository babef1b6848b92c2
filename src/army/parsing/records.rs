//! Intermediate records produced by the parser
//!
//! These are short lived: the flattener consumes them right away and they are never
//! stored. Features are kept as raw strings, since telling an enhancement apart from a
//! reinforcement or a decorative tag is the flattener's business.

use std::fmt;

/// The allegiance line and the bullets listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAllegiance {
    pub name: String,
    pub features: Vec<String>,
}

/// One warscroll line and the bullets listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWarscroll {
    pub name: String,
    pub features: Vec<String>,
}

impl ParsedWarscroll {
    pub fn new(name: impl Into<String>, features: &[&str]) -> Self {
        ParsedWarscroll {
            name: name.into(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The section headers the builder tool writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Leaders,
    Battleline,
    Units,
    Behemoths,
    Artillery,
    EndlessSpells,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Leaders,
        Section::Battleline,
        Section::Units,
        Section::Behemoths,
        Section::Artillery,
        Section::EndlessSpells,
    ];

    /// The header line as exported
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Leaders => "Leaders",
            Section::Battleline => "Battleline",
            Section::Units => "Units",
            Section::Behemoths => "Behemoths",
            Section::Artillery => "Artillery",
            Section::EndlessSpells => "Endless Spells & Invocations",
        }
    }

    /// Match a whole header line, exactly.
    pub fn from_header(text: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.as_str() == text)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
