//! Error types for the armylist library
//!
//! Each stage owns its error type so callers can tell a rejected export apart from a
//! programming error such as a cross-faction bank insertion.

use thiserror::Error;

use crate::army::items::Faction;

/// Failure to parse an army list export.
///
/// Parsing is atomic: when any of these is returned no part of the list is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The export does not open with an `Allegiance: <name>` line
    #[error("line {line}: expected `Allegiance: <name>`")]
    MissingAllegiance { line: usize },

    /// A section header is not followed by at least one warscroll line
    #[error("line {line}: section `{section}` lists no warscrolls")]
    EmptySection { line: usize, section: String },

    /// A section header followed by a line that is not a warscroll
    #[error("line {line}: expected a warscroll line, found `{found}`")]
    MalformedWarscroll { line: usize, found: String },
}

impl ParseError {
    /// The 1-based line number the error points at
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingAllegiance { line }
            | ParseError::EmptySection { line, .. }
            | ParseError::MalformedWarscroll { line, .. } => *line,
        }
    }
}

/// A flat army list that breaks the one-entry-per-name rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArmyListError {
    #[error("warscroll `{0}` is listed more than once")]
    DuplicateWarscroll(String),

    #[error("enhancement `{0}` is listed more than once")]
    DuplicateEnhancement(String),
}

/// Knowledge bank misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// An army list was labelled with an archetype of another faction
    #[error("cannot file a `{list}` army list under a `{archetype}` archetype")]
    FactionMismatch { archetype: Faction, list: Faction },
}

/// Failure to import or export a knowledge bank.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid army list in stored bank: {0}")]
    ArmyList(#[from] ArmyListError),

    #[error("invalid stored bank: {0}")]
    Bank(#[from] BankError),
}

/// Failure to load or validate settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("classifier.k must be at least 1")]
    ZeroNeighbours,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_report_their_line() {
        let err = ParseError::EmptySection {
            line: 7,
            section: "Leaders".into(),
        };
        assert_eq!(err.line(), 7);
        assert_eq!(err.to_string(), "line 7: section `Leaders` lists no warscrolls");
    }

    #[test]
    fn faction_mismatch_names_both_factions() {
        let err = BankError::FactionMismatch {
            archetype: Faction::new("Ogor Mawtribes"),
            list: Faction::new("Ironjawz"),
        };
        assert_eq!(
            err.to_string(),
            "cannot file a `Ironjawz` army list under a `Ogor Mawtribes` archetype"
        );
    }
}
