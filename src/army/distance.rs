//! Distance between army lists
//!
//!     The distance between two decks is a Levenshtein distance over items, with two
//!     twists: every edit costs the count of the items it touches, and substituting an
//!     item for a different one costs as much as deleting one and inserting the other.
//!
//!         - delete item `a`:               `count(a)`
//!         - insert item `b`:               `count(b)`
//!         - substitute `a` by `b`, same name:  `|count(a) - count(b)|`
//!         - substitute `a` by `b`, otherwise:  `count(a) + count(b)`
//!
//!     With both decks sorted by name, items of the same name line up on the diagonal of
//!     the distance matrix, so the result approximates the size of the symmetric
//!     difference of the two decks as multisets.
//!
//! Preconditions
//!
//!     Both decks must be in canonical order. Unsorted decks still produce an edit
//!     distance, just not the one the classifier expects; nothing checks for it. Use
//!     [army_distance] on [CanonicalArmyList]s to have the types enforce it.

use serde::Deserialize;

use crate::army::items::{CanonicalArmyList, Counted};

/// How much each deck weighs in the distance between two army lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DistanceWeights {
    pub warscroll: u64,
    pub enhancement: u64,
}

impl DistanceWeights {
    pub fn new(warscroll: u64, enhancement: u64) -> Self {
        DistanceWeights {
            warscroll,
            enhancement,
        }
    }

    /// Both decks count the same
    pub fn uniform() -> Self {
        DistanceWeights::new(1, 1)
    }
}

impl Default for DistanceWeights {
    fn default() -> Self {
        DistanceWeights::new(2, 1)
    }
}

/// Weighted distance between two canonical army lists.
///
/// Factions are not compared; the classifier only measures lists of the same faction.
/// The weighted sum saturates at `u64::MAX`.
pub fn army_distance(
    list_1: &CanonicalArmyList,
    list_2: &CanonicalArmyList,
    weights: DistanceWeights,
) -> u64 {
    let warscroll_distance = item_distance(list_1.warscrolls(), list_2.warscrolls());
    let enhancement_distance = item_distance(list_1.enhancements(), list_2.enhancements());

    warscroll_distance
        .saturating_mul(weights.warscroll)
        .saturating_add(enhancement_distance.saturating_mul(weights.enhancement))
}

/// Count-weighted edit distance between two item decks.
pub fn item_distance<T: Counted>(list_1: &[T], list_2: &[T]) -> u64 {
    if list_1.is_empty() {
        return total_count(list_2);
    }
    if list_2.is_empty() {
        return total_count(list_1);
    }

    // Two rows of the (len_1 + 1) x (len_2 + 1) matrix: `previous` holds row i - 1,
    // `current` row i. Row 0 turns the empty deck into list_2 by inserting everything.
    let mut previous: Vec<u64> = Vec::with_capacity(list_2.len() + 1);
    previous.push(0);
    for item in list_2 {
        let last = previous[previous.len() - 1];
        previous.push(last + count(item));
    }
    let mut current = vec![0; list_2.len() + 1];

    for item_1 in list_1 {
        let count_1 = count(item_1);
        // Column 0 turns list_1 into the empty deck by deleting everything
        current[0] = previous[0] + count_1;

        for (j, item_2) in list_2.iter().enumerate() {
            let count_2 = count(item_2);
            let substitution = if item_1.name() == item_2.name() {
                count_1.abs_diff(count_2)
            } else {
                count_1 + count_2
            };

            current[j + 1] = (previous[j + 1] + count_1)
                .min(current[j] + count_2)
                .min(previous[j] + substitution);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[list_2.len()]
}

fn count<T: Counted>(item: &T) -> u64 {
    u64::from(item.count())
}

fn total_count<T: Counted>(items: &[T]) -> u64 {
    items.iter().map(count).sum()
}
