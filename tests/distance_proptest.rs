//! Property-based tests for the army list distance

use armylist::army::distance::{army_distance, item_distance};
use armylist::{DistanceWeights, Enhancement, Faction, FlatArmyList, Warscroll};
use proptest::prelude::*;
use std::collections::BTreeMap;

const NAMES: &[&str] = &[
    "Butcher",
    "Frost Sabres",
    "Frostlord on Stonehorn",
    "Gnoblars",
    "Huskard on Stonehorn",
    "Kragnos, The End of Empires",
    "Mournfang Pack",
    "Ogor Gluttons",
    "Stonehorn Beastriders",
];

/// A deck of unique names in canonical order
fn deck_strategy() -> impl Strategy<Value = Vec<Warscroll>> {
    prop::collection::btree_map(prop::sample::select(NAMES), 1u32..6, 0..7).prop_map(
        |deck: BTreeMap<&str, u32>| {
            deck.into_iter()
                .map(|(name, count)| Warscroll::new(name, count))
                .collect()
        },
    )
}

fn total(deck: &[Warscroll]) -> u64 {
    deck.iter().map(|w| u64::from(w.count)).sum()
}

proptest! {
    #[test]
    fn test_distance_to_self_is_zero(deck in deck_strategy()) {
        prop_assert_eq!(item_distance(&deck, &deck), 0);
    }

    #[test]
    fn test_distance_is_symmetric(a in deck_strategy(), b in deck_strategy()) {
        prop_assert_eq!(item_distance(&a, &b), item_distance(&b, &a));
    }

    #[test]
    fn test_distance_to_empty_is_total(deck in deck_strategy()) {
        prop_assert_eq!(item_distance(&deck, &[]), total(&deck));
        prop_assert_eq!(item_distance(&[], &deck), total(&deck));
    }

    #[test]
    fn test_distance_is_bounded_by_totals(a in deck_strategy(), b in deck_strategy()) {
        let distance = item_distance(&a, &b);
        prop_assert!(distance >= total(&a).abs_diff(total(&b)));
        prop_assert!(distance <= total(&a) + total(&b));
    }

    #[test]
    fn test_triangle_inequality(
        a in deck_strategy(),
        b in deck_strategy(),
        c in deck_strategy()
    ) {
        prop_assert!(item_distance(&a, &c) <= item_distance(&a, &b) + item_distance(&b, &c));
    }

    #[test]
    fn test_weights_scale_each_deck(
        a in deck_strategy(),
        b in deck_strategy(),
        war_weight in 0u64..5,
        enh_weight in 0u64..5
    ) {
        let faction = Faction::new("Ogor Mawtribes");
        let enhancements = |deck: &[Warscroll]| -> Vec<Enhancement> {
            deck.iter().map(|w| Enhancement::new(w.name.clone(), w.count)).collect()
        };
        let list_a = FlatArmyList::new(faction.clone(), a.clone(), enhancements(&b))
            .unwrap()
            .canonicalize();
        let list_b = FlatArmyList::new(faction, b.clone(), enhancements(&a))
            .unwrap()
            .canonicalize();

        let deck_distance = item_distance(&a, &b);
        prop_assert_eq!(
            army_distance(&list_a, &list_b, DistanceWeights::new(war_weight, enh_weight)),
            deck_distance * war_weight + deck_distance * enh_weight
        );
    }
}
