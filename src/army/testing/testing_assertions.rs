//! Fluent assertion API for flattened army lists

use crate::army::items::{Counted, FlatArmyList};

/// Create an assertion builder for a flat army list
pub fn assert_army(list: &FlatArmyList) -> ArmyAssertion<'_> {
    ArmyAssertion { list }
}

pub struct ArmyAssertion<'a> {
    list: &'a FlatArmyList,
}

impl<'a> ArmyAssertion<'a> {
    /// Assert the faction name
    pub fn faction(self, expected: &str) -> Self {
        let actual = self.list.faction().name();
        assert_eq!(
            actual, expected,
            "Expected faction '{}', found '{}'",
            expected, actual
        );
        self
    }

    /// Assert the number of distinct warscrolls
    pub fn warscroll_count(self, expected: usize) -> Self {
        let actual = self.list.warscrolls().len();
        assert_eq!(
            actual,
            expected,
            "Expected {} warscrolls, found {}: [{}]",
            expected,
            actual,
            summarize(self.list.warscrolls())
        );
        self
    }

    /// Assert the number of distinct enhancements
    pub fn enhancement_count(self, expected: usize) -> Self {
        let actual = self.list.enhancements().len();
        assert_eq!(
            actual,
            expected,
            "Expected {} enhancements, found {}: [{}]",
            expected,
            actual,
            summarize(self.list.enhancements())
        );
        self
    }

    /// Assert a warscroll is present with the given count
    pub fn warscroll(self, name: &str, expected: u32) -> Self {
        assert_item("warscroll", self.list.warscrolls(), name, expected);
        self
    }

    /// Assert an enhancement is present with the given count
    pub fn enhancement(self, name: &str, expected: u32) -> Self {
        assert_item("enhancement", self.list.enhancements(), name, expected);
        self
    }

    /// Assert no warscroll has the given name
    pub fn no_warscroll(self, name: &str) -> Self {
        assert!(
            !self.list.warscrolls().iter().any(|w| w.name == name),
            "Expected no warscroll '{}', found one in [{}]",
            name,
            summarize(self.list.warscrolls())
        );
        self
    }

    /// Assert no enhancement has the given name
    pub fn no_enhancement(self, name: &str) -> Self {
        assert!(
            !self.list.enhancements().iter().any(|e| e.name == name),
            "Expected no enhancement '{}', found one in [{}]",
            name,
            summarize(self.list.enhancements())
        );
        self
    }
}

fn assert_item<T: Counted>(kind: &str, items: &[T], name: &str, expected: u32) {
    match items.iter().find(|item| item.name() == name) {
        Some(item) => assert_eq!(
            item.count(),
            expected,
            "Expected {} '{}' x {}, found x {}",
            kind,
            name,
            expected,
            item.count()
        ),
        None => panic!(
            "Expected {} '{}', found only [{}]",
            kind,
            name,
            summarize(items)
        ),
    }
}

fn summarize<T: Counted>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("{} x {}", item.count(), item.name()))
        .collect::<Vec<_>>()
        .join(", ")
}
