//! Army list items and the flattened army list
//!
//!     A flattened army list is the essence of an export: its faction plus two
//!     (metaphorical) decks of cards, one of warscrolls and one of enhancements. Each card
//!     carries a name and the number of times it occurs in the list.
//!
//!     Warscrolls and enhancements share one generic [Item] type tagged by a zero-sized
//!     kind marker, so the two decks can never be compared with each other while the
//!     distance engine only has to be written once, against the [Counted] capability.
//!
//! Canonical Form
//!
//!     Distances are only meaningful between lists whose decks are sorted by the item
//!     ordering (name, then count). Sorting is an explicit step, [FlatArmyList::canonicalize],
//!     which hands back a [CanonicalArmyList]. The knowledge bank only stores canonical
//!     lists.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use crate::army::error::ArmyListError;

/// The top-level grouping of an army list, e.g. `Ogor Mawtribes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faction(String);

impl Faction {
    pub fn new(name: impl Into<String>) -> Self {
        Faction(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Faction {
    fn from(name: &str) -> Self {
        Faction::new(name)
    }
}

/// Anything with a name and a number of occurrences.
pub trait Counted {
    fn name(&self) -> &str;
    fn count(&self) -> u32;
}

/// Marker for the kind of an [Item].
pub trait ItemKind {
    /// Human readable name of the kind, used in messages
    const LABEL: &'static str;
}

/// Kind marker for warscrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WarscrollKind;

/// Kind marker for enhancements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EnhancementKind;

impl ItemKind for WarscrollKind {
    const LABEL: &'static str = "warscroll";
}

impl ItemKind for EnhancementKind {
    const LABEL: &'static str = "enhancement";
}

/// A named army list entry and how many times it occurs.
///
/// Ordering is by name, then by count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Item<K> {
    pub name: String,
    pub count: u32,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K> Item<K> {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Item {
            name: name.into(),
            count,
            kind: PhantomData,
        }
    }
}

impl<K> Counted for Item<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> u32 {
        self.count
    }
}

impl<K> fmt::Display for Item<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.count, self.name)
    }
}

/// A warscroll, counted by appearances plus reinforcements
pub type Warscroll = Item<WarscrollKind>;

/// An enhancement (command trait, artefact, spell, prayer, mount trait), counted by appearances
pub type Enhancement = Item<EnhancementKind>;

/// An army list reduced to its faction, warscrolls and enhancements.
///
/// No two warscrolls and no two enhancements share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatArmyList {
    faction: Faction,
    warscrolls: Vec<Warscroll>,
    enhancements: Vec<Enhancement>,
}

impl FlatArmyList {
    /// Build a flat army list, rejecting repeated names.
    pub fn new(
        faction: Faction,
        warscrolls: Vec<Warscroll>,
        enhancements: Vec<Enhancement>,
    ) -> Result<Self, ArmyListError> {
        let list = FlatArmyList {
            faction,
            warscrolls,
            enhancements,
        };
        list.validate()?;
        Ok(list)
    }

    /// Build from decks that were merged by name already.
    pub(crate) fn from_merged(
        faction: Faction,
        warscrolls: Vec<Warscroll>,
        enhancements: Vec<Enhancement>,
    ) -> Self {
        debug_assert!(first_duplicate(&warscrolls).is_none());
        debug_assert!(first_duplicate(&enhancements).is_none());
        FlatArmyList {
            faction,
            warscrolls,
            enhancements,
        }
    }

    /// Check the one-entry-per-name rule.
    pub fn validate(&self) -> Result<(), ArmyListError> {
        if let Some(name) = first_duplicate(&self.warscrolls) {
            return Err(ArmyListError::DuplicateWarscroll(name.to_string()));
        }
        if let Some(name) = first_duplicate(&self.enhancements) {
            return Err(ArmyListError::DuplicateEnhancement(name.to_string()));
        }
        Ok(())
    }

    pub fn faction(&self) -> &Faction {
        &self.faction
    }

    pub fn warscrolls(&self) -> &[Warscroll] {
        &self.warscrolls
    }

    pub fn enhancements(&self) -> &[Enhancement] {
        &self.enhancements
    }

    /// Total number of warscroll occurrences
    pub fn warscroll_total(&self) -> u32 {
        self.warscrolls.iter().map(|w| w.count).sum()
    }

    /// Total number of enhancement occurrences
    pub fn enhancement_total(&self) -> u32 {
        self.enhancements.iter().map(|e| e.count).sum()
    }

    /// Whether both decks are already in item order
    pub fn is_canonical(&self) -> bool {
        is_sorted(&self.warscrolls) && is_sorted(&self.enhancements)
    }

    /// Sort both decks into item order.
    pub fn canonicalize(mut self) -> CanonicalArmyList {
        self.warscrolls.sort();
        self.enhancements.sort();
        CanonicalArmyList(self)
    }
}

impl fmt::Display for FlatArmyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Allegiance: {}", self.faction)?;
        writeln!(f, "Warscrolls")?;
        for warscroll in &self.warscrolls {
            writeln!(f, "  {}", warscroll)?;
        }
        writeln!(f, "Enhancements")?;
        for enhancement in &self.enhancements {
            writeln!(f, "  {}", enhancement)?;
        }
        Ok(())
    }
}

/// A flat army list whose decks are sorted into item order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalArmyList(FlatArmyList);

impl CanonicalArmyList {
    pub fn into_inner(self) -> FlatArmyList {
        self.0
    }
}

impl Deref for CanonicalArmyList {
    type Target = FlatArmyList;

    fn deref(&self) -> &FlatArmyList {
        &self.0
    }
}

impl From<FlatArmyList> for CanonicalArmyList {
    fn from(list: FlatArmyList) -> Self {
        list.canonicalize()
    }
}

impl fmt::Display for CanonicalArmyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn first_duplicate<K>(items: &[Item<K>]) -> Option<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| item.name.as_str())
        .find(|name| !seen.insert(*name))
}

fn is_sorted<K: Ord>(items: &[Item<K>]) -> bool {
    items.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ogors() -> Faction {
        Faction::new("Ogor Mawtribes")
    }

    #[test]
    fn items_order_by_name_then_count() {
        let mut items = vec![
            Warscroll::new("Mournfang Pack", 3),
            Warscroll::new("Frostlord on Stonehorn", 1),
            Warscroll::new("Huskard on Stonehorn", 2),
            Warscroll::new("Huskard on Stonehorn", 1),
        ];
        items.sort();

        assert_eq!(
            items,
            vec![
                Warscroll::new("Frostlord on Stonehorn", 1),
                Warscroll::new("Huskard on Stonehorn", 1),
                Warscroll::new("Huskard on Stonehorn", 2),
                Warscroll::new("Mournfang Pack", 3),
            ]
        );
    }

    #[test]
    fn new_rejects_repeated_warscrolls() {
        let result = FlatArmyList::new(
            ogors(),
            vec![
                Warscroll::new("Mournfang Pack", 1),
                Warscroll::new("Mournfang Pack", 2),
            ],
            vec![],
        );
        assert_eq!(
            result,
            Err(ArmyListError::DuplicateWarscroll("Mournfang Pack".into()))
        );
    }

    #[test]
    fn new_rejects_repeated_enhancements() {
        let result = FlatArmyList::new(
            ogors(),
            vec![],
            vec![
                Enhancement::new("Ribcracker", 1),
                Enhancement::new("Ribcracker", 1),
            ],
        );
        assert_eq!(
            result,
            Err(ArmyListError::DuplicateEnhancement("Ribcracker".into()))
        );
    }

    #[test]
    fn same_name_across_decks_is_allowed() {
        let result = FlatArmyList::new(
            ogors(),
            vec![Warscroll::new("Gutmagic", 1)],
            vec![Enhancement::new("Gutmagic", 1)],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn canonicalize_sorts_both_decks() {
        let list = FlatArmyList::new(
            ogors(),
            vec![
                Warscroll::new("Kragnos, The End of Empires", 1),
                Warscroll::new("Frostlord on Stonehorn", 1),
            ],
            vec![
                Enhancement::new("Splatter-cleaver", 1),
                Enhancement::new("Metalcruncher", 1),
            ],
        )
        .unwrap();
        assert!(!list.is_canonical());

        let canonical = list.canonicalize();
        assert!(canonical.is_canonical());
        assert_eq!(canonical.warscrolls()[0].name, "Frostlord on Stonehorn");
        assert_eq!(canonical.enhancements()[0].name, "Metalcruncher");
    }

    #[test]
    fn totals_sum_counts() {
        let list = FlatArmyList::new(
            ogors(),
            vec![
                Warscroll::new("Frostlord on Stonehorn", 1),
                Warscroll::new("Mournfang Pack", 3),
            ],
            vec![Enhancement::new("Metalcruncher", 1)],
        )
        .unwrap();
        assert_eq!(list.warscroll_total(), 4);
        assert_eq!(list.enhancement_total(), 1);
    }

    #[test]
    fn items_serialize_without_their_kind() {
        let json = serde_json::to_string(&Warscroll::new("Mournfang Pack", 3)).unwrap();
        assert_eq!(json, r#"{"name":"Mournfang Pack","count":3}"#);

        let back: Warscroll = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Warscroll::new("Mournfang Pack", 3));
    }
}
