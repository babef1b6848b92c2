//! k-nearest-neighbour classification of army lists
//!
//!     The classifier labels an unseen army list with the archetype of the most similar
//!     lists in a [KnowledgeBank]:
//!
//!         1. Measure the distance from the candidate to every list filed under an
//!            archetype of the candidate's faction.
//!         2. Sort the `(distance, archetype)` neighbours ascending, equal distances
//!            falling back on archetype order, and keep the first `k`.
//!         3. Let the `k` nearest vote.
//!
//!     No neighbours means no classification: a bank without archetypes of the
//!     candidate's faction yields `None`, which is not an error. The candidate is never
//!     filed into the bank.
//!
//! Voting
//!
//!     [VoteMode::Plain]: every neighbour casts one vote for its archetype.
//!
//!     [VoteMode::DistanceWeighted]: every neighbour casts `1 / distance` votes. An exact
//!     match (distance 0) outweighs any finite sum, so if one of the `k` nearest is an
//!     exact match only the exact matches vote, one vote each.
//!
//!     In both modes a tie goes to the tied archetype that shows up first in neighbour
//!     order, i.e. the one with the nearest neighbour.

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::army::bank::{Archetype, KnowledgeBank};
use crate::army::distance::{army_distance, DistanceWeights};
use crate::army::items::{CanonicalArmyList, FlatArmyList};

/// How the nearest neighbours vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteMode {
    /// One vote per neighbour
    #[default]
    Plain,
    /// `1 / distance` votes per neighbour
    DistanceWeighted,
}

/// Classification parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Number of neighbours that vote; at least 1
    pub k: usize,
    pub vote: VoteMode,
    pub weights: DistanceWeights,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            k: 1,
            vote: VoteMode::Plain,
            weights: DistanceWeights::default(),
        }
    }
}

/// A labelled list and its distance to the candidate
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Neighbour<'a> {
    pub distance: u64,
    pub archetype: &'a Archetype,
}

/// Label an army list with the archetype of its nearest neighbours.
///
/// A `k` of 0 is treated as 1.
pub fn classify(
    list: &FlatArmyList,
    bank: &KnowledgeBank,
    config: &ClassifierConfig,
) -> Option<Archetype> {
    let candidate = list.clone().canonicalize();
    classify_canonical(&candidate, bank, config)
}

/// [classify] for a list that is canonical already.
pub fn classify_canonical(
    candidate: &CanonicalArmyList,
    bank: &KnowledgeBank,
    config: &ClassifierConfig,
) -> Option<Archetype> {
    let mut neighbours = neighbours(candidate, bank, config.weights);
    neighbours.truncate(config.k.max(1));

    let winner = match config.vote {
        VoteMode::Plain => plain_vote(&neighbours),
        VoteMode::DistanceWeighted => weighted_vote(&neighbours),
    };

    debug!(
        faction = %candidate.faction(),
        k = config.k,
        vote = ?config.vote,
        archetype = winner.map(|a| a.label.as_str()),
        "classified army list"
    );
    winner.cloned()
}

/// Every same-faction list in the bank, nearest first.
pub fn neighbours<'a>(
    candidate: &CanonicalArmyList,
    bank: &'a KnowledgeBank,
    weights: DistanceWeights,
) -> Vec<Neighbour<'a>> {
    let mut neighbours: Vec<Neighbour<'a>> = bank
        .iter()
        .filter(|(archetype, _)| archetype.faction == *candidate.faction())
        .flat_map(|(archetype, lists)| {
            lists.iter().map(move |list| Neighbour {
                distance: army_distance(candidate, list, weights),
                archetype,
            })
        })
        .collect();
    neighbours.sort();

    for neighbour in &neighbours {
        trace!(
            archetype = %neighbour.archetype,
            distance = neighbour.distance,
            "neighbour"
        );
    }
    neighbours
}

/// Majority vote, ties to the earliest archetype in neighbour order.
pub fn plain_vote<'a>(neighbours: &[Neighbour<'a>]) -> Option<&'a Archetype> {
    let tally = tally(neighbours, |_| 1usize);
    first_maximum(tally, |left, right| left > right)
}

/// Inverse distance vote, exact matches first.
///
/// Each neighbour at distance `d` is worth `lcm / d` votes, `lcm` being the least
/// common multiple of the distances, so sums compare exactly. Distances too large for
/// that fall back on floating point sums.
pub fn weighted_vote<'a>(neighbours: &[Neighbour<'a>]) -> Option<&'a Archetype> {
    let exact: Vec<Neighbour<'a>> = neighbours
        .iter()
        .filter(|n| n.distance == 0)
        .cloned()
        .collect();
    if !exact.is_empty() {
        return plain_vote(&exact);
    }

    match common_multiple(neighbours) {
        Some(lcm) => {
            let tally = tally(neighbours, |n| lcm / u128::from(n.distance));
            first_maximum(tally, |left, right| left > right)
        }
        None => {
            warn!(
                neighbours = neighbours.len(),
                "distances too large for an exact weighted vote"
            );
            let tally = tally(neighbours, |n| 1.0 / n.distance as f64);
            first_maximum(tally, |left, right| left > right)
        }
    }
}

/// Votes per archetype, in order of first appearance.
fn tally<'a, V: std::ops::AddAssign + Copy>(
    neighbours: &[Neighbour<'a>],
    votes_of: impl Fn(&Neighbour<'a>) -> V,
) -> Vec<(&'a Archetype, V)> {
    let mut tally: Vec<(&'a Archetype, V)> = Vec::new();
    for neighbour in neighbours {
        let weight = votes_of(neighbour);
        match tally.iter_mut().find(|(a, _)| *a == neighbour.archetype) {
            Some((_, votes)) => *votes += weight,
            None => tally.push((neighbour.archetype, weight)),
        }
    }
    tally
}

/// Least common multiple of the (non-zero) distances, provided every
/// `lcm / distance` sum still fits in a `u128`.
fn common_multiple(neighbours: &[Neighbour<'_>]) -> Option<u128> {
    let lcm = neighbours.iter().try_fold(1u128, |lcm, n| {
        let d = u128::from(n.distance);
        (lcm / gcd(lcm, d)).checked_mul(d)
    })?;
    neighbours
        .iter()
        .try_fold(0u128, |sum, n| sum.checked_add(lcm / u128::from(n.distance)))?;
    Some(lcm)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// The first entry no later entry beats.
fn first_maximum<'a, V: Copy>(
    tally: Vec<(&'a Archetype, V)>,
    beats: impl Fn(V, V) -> bool,
) -> Option<&'a Archetype> {
    let mut entries = tally.into_iter();
    let mut best = entries.next()?;
    for entry in entries {
        if beats(entry.1, best.1) {
            best = entry;
        }
    }
    Some(best.0)
}
