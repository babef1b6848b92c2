//! # armylist
//!
//! Parses army list exports from the warscroll builder tool and classifies them into
//! player-defined archetypes.
//!
//! File Layout
//!
//! The work is split into a text front end and a classification back end, which only
//! meet at the flattened army list:
//!
//! src/army
//!   ├── lexing        Tokens, line grouping and line classification
//!   ├── parsing       Section grammar over classified lines
//!   ├── flattening    Parsed records into a counted, deduplicated army list
//!   ├── items         Faction, warscrolls, enhancements, flat army lists
//!   ├── distance      Count-weighted edit distance between army lists
//!   ├── bank          Labelled army lists, grouped by archetype
//!   └── classifier    k-nearest neighbour voting over a knowledge bank
//!
//! For testing guidelines and verified sample lists, see the [testing module](army::testing).

pub mod army;

pub use army::bank::{add_to_bank, Archetype, KnowledgeBank};
pub use army::classifier::{classify, ClassifierConfig, VoteMode};
pub use army::distance::DistanceWeights;
pub use army::error::{ArmyListError, BankError, ParseError};
pub use army::flattening::flatten;
pub use army::items::{CanonicalArmyList, Enhancement, Faction, FlatArmyList, Warscroll};
