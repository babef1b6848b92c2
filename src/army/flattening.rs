//! Flattening parsed records into a [FlatArmyList]
//!
//!     The flattener walks the parsed warscrolls once for each deck:
//!
//!         - Warscrolls: every parsed warscroll contributes `1 + Σ reinforcements` to the
//!           warscroll of its name. Three separately listed `Mournfang Pack` entries end up
//!           as one warscroll with count 3 (plus any reinforcements).
//!         - Enhancements: every `<label>: <value>` feature contributes 1 to the
//!           enhancement named `<value>`. Reinforcements do not multiply enhancements.
//!
//!     Both decks keep first-seen order. Sorting into canonical order is a separate step,
//!     see [FlatArmyList::canonicalize].
//!
//!     The `N x ` prefix of a warscroll line and the allegiance features play no part.

pub mod features;

use std::collections::HashMap;
use tracing::{debug, trace};

use crate::army::error::ParseError;
use crate::army::items::{Enhancement, Faction, FlatArmyList, Item, Warscroll};
use crate::army::parsing::{self, ParsedAllegiance, ParsedWarscroll};

/// Parse and flatten an army list export.
pub fn flatten(source: &str) -> Result<FlatArmyList, ParseError> {
    let (allegiance, warscrolls) = parsing::parse(source)?;
    Ok(flatten_records(&allegiance, &warscrolls))
}

/// Flatten already parsed records.
pub fn flatten_records(
    allegiance: &ParsedAllegiance,
    warscrolls: &[ParsedWarscroll],
) -> FlatArmyList {
    let faction = Faction::new(allegiance.name.as_str());
    let warscroll_deck = convert_warscrolls(warscrolls);
    let enhancement_deck = convert_enhancements(warscrolls);

    debug!(
        faction = %faction,
        warscrolls = warscroll_deck.len(),
        enhancements = enhancement_deck.len(),
        "flattened army list"
    );
    FlatArmyList::from_merged(faction, warscroll_deck, enhancement_deck)
}

/// Count warscroll occurrences by name, reinforcements included.
pub fn convert_warscrolls(warscrolls: &[ParsedWarscroll]) -> Vec<Warscroll> {
    let mut tally = Tally::default();
    for warscroll in warscrolls {
        let reinforcements: u32 = warscroll
            .features
            .iter()
            .filter_map(|feature| features::reinforcement(feature))
            .fold(0, u32::saturating_add);
        trace!(name = %warscroll.name, reinforcements, "counted warscroll");
        tally.add(&warscroll.name, reinforcements.saturating_add(1));
    }
    tally.into_items()
}

/// Count enhancement occurrences by name, across every warscroll.
pub fn convert_enhancements(warscrolls: &[ParsedWarscroll]) -> Vec<Enhancement> {
    let mut tally = Tally::default();
    for feature in warscrolls.iter().flat_map(|w| &w.features) {
        if let Some(name) = features::enhancement(feature) {
            tally.add(name, 1);
        }
    }
    tally.into_items()
}

/// Counts by name, in first-seen order
#[derive(Default)]
struct Tally {
    counts: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, name: &str, count: u32) {
        match self.index.get(name) {
            Some(&i) => self.counts[i].1 = self.counts[i].1.saturating_add(count),
            None => {
                self.index.insert(name.to_string(), self.counts.len());
                self.counts.push((name.to_string(), count));
            }
        }
    }

    fn into_items<K>(self) -> Vec<Item<K>> {
        self.counts
            .into_iter()
            .map(|(name, count)| Item::new(name, count))
            .collect()
    }
}
