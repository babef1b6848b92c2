//! Feature recognizers
//!
//! Bullet features are captured verbatim by the parser. Two shapes carry meaning:
//!
//! - `Reinforced x <digits>`: the warscroll is reinforced that many times
//! - `<label>: <value>`: an enhancement named `<value>` (command trait, artefact, spell,
//!   prayer, mount trait). The label is word characters and spaces only.
//!
//! Everything else (`General`, `Blood Vulture`, ...) is a decorative tag.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static REINFORCEMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Reinforced x ([0-9]+)$").unwrap());

static ENHANCEMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s]+: (.+)$").unwrap());

/// A reinforcement multiplier, if the feature declares one.
///
/// Multipliers too large for a `u32` are not recognised.
pub fn reinforcement(feature: &str) -> Option<u32> {
    let digits = REINFORCEMENT_REGEX.captures(feature)?.get(1)?.as_str();
    match digits.parse() {
        Ok(times) => Some(times),
        Err(_) => {
            warn!(feature, "ignoring oversize reinforcement count");
            None
        }
    }
}

/// The enhancement name, if the feature declares one.
pub fn enhancement(feature: &str) -> Option<&str> {
    ENHANCEMENT_REGEX
        .captures(feature)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str())
}
