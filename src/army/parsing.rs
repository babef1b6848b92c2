//! Parsing of army list exports
//!
//! Turns the raw text of a warscroll builder export into a [ParsedAllegiance] and the
//! [ParsedWarscroll]s of every section, in source order.
//!
//! Parsing is atomic: the export either parses, or a [ParseError] is returned and
//! nothing else. Content after the last section (battalions, point totals, drop counts)
//! does not take part in the grammar and is ignored.
//!
//! Example export:
//!
//! ```text
//! Allegiance: Ogor Mawtribes
//! - Mawtribe: Bloodgullet
//!
//! Leaders
//! Frostlord on Stonehorn (430)
//! - General
//! - Command Trait: Nice Drop of the Red Stuff!
//!
//! Battleline
//! 2 x Mournfang Pack (160)*
//! - Reinforced x 1
//!
//! Total: 1970 / 2000
//! ```

pub mod grammar;
pub mod records;

use chumsky::Parser;
use tracing::debug;

use crate::army::error::ParseError;
use crate::army::lexing::{lex_lines, Line, LineKind};

pub use records::{ParsedAllegiance, ParsedWarscroll, Section};

/// Parse an army list export.
pub fn parse(source: &str) -> Result<(ParsedAllegiance, Vec<ParsedWarscroll>), ParseError> {
    let lines = lex_lines(source);
    debug!(lines = lines.len(), "parsing army list");

    let document = grammar::document().parse(lines).map_err(|errors| {
        let line = errors
            .first()
            .map(|e| e.span().start + 1)
            .unwrap_or(1);
        ParseError::MissingAllegiance { line }
    })?;

    check_trailer(&document.trailer)?;

    debug!(
        faction = %document.allegiance.name,
        warscrolls = document.warscrolls.len(),
        ignored_lines = document.trailer.len(),
        "parsed army list"
    );
    Ok((document.allegiance, document.warscrolls))
}

/// Reject a section header the grammar had to leave behind.
///
/// Only the first non-blank trailing line matters: anything after a line that does not
/// open a section is free-form.
fn check_trailer(trailer: &[Line]) -> Result<(), ParseError> {
    let mut lines = trailer.iter().skip_while(|l| l.kind == LineKind::Blank);

    let (header, section) = match lines.next() {
        Some(line) => match &line.kind {
            LineKind::Header(section) => (line, *section),
            _ => return Ok(()),
        },
        None => return Ok(()),
    };

    match lines.next() {
        Some(line) if line.kind != LineKind::Blank => Err(ParseError::MalformedWarscroll {
            line: line.number,
            found: line.text.clone(),
        }),
        _ => Err(ParseError::EmptySection {
            line: header.number,
            section: section.to_string(),
        }),
    }
}
