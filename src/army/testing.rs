//! Testing utilities for army list assertions
//!
//! # Testing Guidelines
//!
//! Tests of the text front end should use the two tools in this module together:
//!
//! 1. **[ArmySamples]** - verified army list exports
//! 2. **[assert_army](fn@assert_army)** - fluent verification of flattened lists
//!
//! ## Rule 1: Prefer ArmySamples for Whole Exports
//!
//! Exports from the list builder carry details that are easy to get subtly wrong when
//! typed by hand: en-dash bullets, `*` markers after the point cost, `N x` prefixes and
//! the free-form trailer of battalions and totals. The files under `docs/samples/` are
//! real exports, checked against the flattened lists they should produce.
//!
//! ```rust-example
//! use armylist::army::testing::ArmySamples;
//! use armylist::flatten;
//!
//! // CORRECT: use a verified export
//! let list = flatten(ArmySamples::OGOR_KRAGNOS)?;
//!
//! // WRONG: retyping an export inline
//! let list = flatten("Allegiance: Ogor Mawtribes\nLeaders\n...")?;
//! ```
//!
//! Short inline snippets remain fine for unit tests of a single grammar rule.
//!
//! ## Rule 2: Use assert_army for Flattened Lists
//!
//! ```rust-example
//! use armylist::army::testing::assert_army;
//!
//! assert_army(&list)
//!     .faction("Ogor Mawtribes")
//!     .warscroll_count(4)
//!     .warscroll("Mournfang Pack", 3)
//!     .enhancement("Metalcruncher", 1)
//!     .no_enhancement("Ribcracker");
//! ```
//!
//! A failed assertion names the list's full contents, which beats a bare `left != right`.

mod testing_assertions;

pub use testing_assertions::{assert_army, ArmyAssertion};

/// Verified army list exports, embedded from `docs/samples/`.
pub struct ArmySamples;

impl ArmySamples {
    /// Ogor Mawtribes around Kragnos and a Frostlord, with three Mournfang Packs
    pub const OGOR_KRAGNOS: &'static str = include_str!("../../docs/samples/ogor-kragnos.txt");

    /// Ogor Mawtribes around a Frostlord and the Krondspine Incarnate
    pub const OGOR_INCARNATE: &'static str =
        include_str!("../../docs/samples/ogor-incarnate.txt");

    /// Ironjawz, exported with en-dash bullets and an endless spell section
    pub const IRONJAWZ: &'static str = include_str!("../../docs/samples/ironjawz.txt");

    /// Opens with a section instead of the allegiance line
    pub const MISSING_ALLEGIANCE: &'static str =
        include_str!("../../docs/samples/missing-allegiance.txt");

    /// A `Battleline` header with nothing under it
    pub const EMPTY_SECTION: &'static str = include_str!("../../docs/samples/empty-section.txt");

    /// Every sample that parses, by file name
    pub fn valid() -> [(&'static str, &'static str); 3] {
        [
            ("ogor-kragnos.txt", Self::OGOR_KRAGNOS),
            ("ogor-incarnate.txt", Self::OGOR_INCARNATE),
            ("ironjawz.txt", Self::IRONJAWZ),
        ]
    }

    /// Look a sample up by file name.
    pub fn get(name: &str) -> Option<&'static str> {
        match name {
            "ogor-kragnos.txt" => Some(Self::OGOR_KRAGNOS),
            "ogor-incarnate.txt" => Some(Self::OGOR_INCARNATE),
            "ironjawz.txt" => Some(Self::IRONJAWZ),
            "missing-allegiance.txt" => Some(Self::MISSING_ALLEGIANCE),
            "empty-section.txt" => Some(Self::EMPTY_SECTION),
            _ => None,
        }
    }
}
