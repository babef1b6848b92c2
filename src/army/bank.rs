//! Knowledge bank of labelled army lists
//!
//!     The knowledge bank is the labelled data the classifier learns from: every army
//!     list in it has been filed under an [Archetype], a human assigned label within a
//!     faction ("Kragnos Beastclaw Raiders" within Ogor Mawtribes).
//!
//!     The bank seeds from hand labelled lists. Lists the classifier labels can be filed
//!     back in to grow it; pruning mislabelled data stays a manual task, the bank only
//!     ever grows.
//!
//! Invariants
//!
//!     - Every list is filed under an archetype of its own faction.
//!     - Every stored list is a [CanonicalArmyList].
//!     - Within one archetype, lists keep insertion order.
//!     - Archetypes iterate in their natural order (faction, then label).
//!
//!     Use [store] to save a bank to JSON and load it back.

pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::army::error::BankError;
use crate::army::items::{CanonicalArmyList, Faction, FlatArmyList};

/// A named style of play within a faction, used as the classification label.
///
/// Ordering is by faction, then label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Archetype {
    pub faction: Faction,
    pub label: String,
}

impl Archetype {
    pub fn new(faction: Faction, label: impl Into<String>) -> Self {
        Archetype {
            faction,
            label: label.into(),
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.faction)
    }
}

/// Army lists filed under their archetypes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBank {
    data: BTreeMap<Archetype, Vec<CanonicalArmyList>>,
}

impl KnowledgeBank {
    /// An empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// File an army list under an archetype of the same faction.
    ///
    /// The list is canonicalised on the way in. On a faction mismatch the bank is left
    /// untouched.
    pub fn insert(
        &mut self,
        archetype: Archetype,
        list: FlatArmyList,
    ) -> Result<&mut Self, BankError> {
        if archetype.faction != *list.faction() {
            return Err(BankError::FactionMismatch {
                archetype: archetype.faction,
                list: list.faction().clone(),
            });
        }

        let lists = self.data.entry(archetype).or_default();
        lists.push(list.canonicalize());
        debug!(filed = lists.len(), "filed army list");
        Ok(self)
    }

    /// Lists filed under an archetype, in insertion order.
    pub fn lists(&self, archetype: &Archetype) -> &[CanonicalArmyList] {
        self.data.get(archetype).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every archetype with at least one list, in natural order.
    pub fn archetypes(&self) -> impl Iterator<Item = &Archetype> {
        self.data.keys()
    }

    /// Archetypes of one faction, in label order.
    ///
    /// The iterator borrows only the bank, so the faction may be a temporary.
    pub fn archetypes_of(&self, faction: &Faction) -> impl Iterator<Item = &Archetype> + '_ {
        let faction = faction.clone();
        self.data.keys().filter(move |a| a.faction == faction)
    }

    /// Every archetype with its lists, in natural order.
    pub fn iter(&self) -> impl Iterator<Item = (&Archetype, &[CanonicalArmyList])> {
        self.data.iter().map(|(a, lists)| (a, lists.as_slice()))
    }

    /// Total number of filed lists
    pub fn len(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// File an army list under an archetype and hand the bank back for chaining.
///
/// ```ignore
/// let bank = add_to_bank(raiders, list_1, KnowledgeBank::new())?;
/// let bank = add_to_bank(incarnate, list_2, bank)?;
/// ```
pub fn add_to_bank(
    archetype: Archetype,
    list: FlatArmyList,
    mut bank: KnowledgeBank,
) -> Result<KnowledgeBank, BankError> {
    bank.insert(archetype, list)?;
    Ok(bank)
}
