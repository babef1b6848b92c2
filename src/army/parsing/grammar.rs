//! Army list grammar
//!
//! Combinator parsers over classified lines. The grammar, line by line:
//!
//! ```text
//! document   := allegiance section* trailer
//! allegiance := <allegiance-line> <bullet-line>*
//! section    := <blank-line>* <header-line> warscroll+
//! warscroll  := <warscroll-line> <bullet-line>*
//! trailer    := <any-line>*
//! ```
//!
//! The trailer swallows whatever follows the last section (battalions, point totals,
//! drop counts). Since `section*` backtracks on failure, a header that is not followed by
//! a warscroll also ends up in the trailer; [super::parse] inspects the trailer to turn
//! that into an error.

use chumsky::prelude::*;
use std::ops::Range;

use super::records::{ParsedAllegiance, ParsedWarscroll};
use crate::army::lexing::{Line, LineKind};

/// Type alias for parser error
pub(crate) type ParserError = Simple<Line>;

/// Line index range, as chumsky reports it for slice input
type Span = Range<usize>;

/// The grammar's view of a whole export
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedDocument {
    pub allegiance: ParsedAllegiance,
    pub warscrolls: Vec<ParsedWarscroll>,
    pub trailer: Vec<Line>,
}

/// Parse a whole export.
pub(crate) fn document() -> impl Parser<Line, ParsedDocument, Error = ParserError> + Clone {
    allegiance()
        .then(section().repeated().flatten())
        .then(filter(|_: &Line| true).repeated())
        .then_ignore(end())
        .map(|((allegiance, warscrolls), trailer)| ParsedDocument {
            allegiance,
            warscrolls,
            trailer,
        })
}

/// The allegiance line and its bullets
pub(crate) fn allegiance() -> impl Parser<Line, ParsedAllegiance, Error = ParserError> + Clone {
    filter_map(|span: Span, line: Line| match line.kind {
        LineKind::Allegiance(name) => Ok(name),
        _ => Err(ParserError::custom(span, "expected an allegiance line")),
    })
    .then(bullet().repeated())
    .map(|(name, features)| ParsedAllegiance { name, features })
}

/// A header and the warscrolls under it
pub(crate) fn section() -> impl Parser<Line, Vec<ParsedWarscroll>, Error = ParserError> + Clone
{
    blank()
        .repeated()
        .ignore_then(header())
        .ignore_then(warscroll().repeated().at_least(1))
}

/// A warscroll line and its bullets
pub(crate) fn warscroll() -> impl Parser<Line, ParsedWarscroll, Error = ParserError> + Clone {
    filter_map(|span: Span, line: Line| match line.kind {
        LineKind::Warscroll(name) => Ok(name),
        _ => Err(ParserError::custom(span, "expected a warscroll line")),
    })
    .then(bullet().repeated())
    .map(|(name, features)| ParsedWarscroll { name, features })
}

fn bullet() -> impl Parser<Line, String, Error = ParserError> + Clone {
    filter_map(|span: Span, line: Line| match line.kind {
        LineKind::Bullet(feature) => Ok(feature),
        _ => Err(ParserError::custom(span, "expected a bullet line")),
    })
}

fn header() -> impl Parser<Line, (), Error = ParserError> + Clone {
    filter(|line: &Line| matches!(line.kind, LineKind::Header(_))).ignored()
}

fn blank() -> impl Parser<Line, (), Error = ParserError> + Clone {
    filter(|line: &Line| line.kind == LineKind::Blank).ignored()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::lexing::lex_lines;

    #[test]
    fn test_allegiance_collects_bullets() {
        let lines = lex_lines(
            "Allegiance: Ogor Mawtribes\n- Mawtribe: Bloodgullet\n- Triumphs: Inspired\n",
        );
        let parsed = allegiance().parse(lines).unwrap();

        assert_eq!(parsed.name, "Ogor Mawtribes");
        assert_eq!(parsed.features, vec!["Mawtribe: Bloodgullet", "Triumphs: Inspired"]);
    }

    #[test]
    fn test_section_skips_leading_blank_lines() {
        let lines = lex_lines("\n\nLeaders\nKragnos, The End of Empires (720)\n");
        let parsed = section().parse(lines).unwrap();

        assert_eq!(parsed, vec![ParsedWarscroll::new("Kragnos, The End of Empires", &[])]);
    }

    #[test]
    fn test_section_requires_a_warscroll() {
        let lines = lex_lines("Leaders\n\nBattleline\n");
        assert!(section().parse(lines).is_err());
    }

    #[test]
    fn test_warscroll_collects_bullets() {
        let lines = lex_lines("Huskard on Stonehorn (340)*\n- Blood Vulture\n– Reinforced x 1\n");
        let parsed = warscroll().parse(lines).unwrap();

        assert_eq!(
            parsed,
            ParsedWarscroll::new("Huskard on Stonehorn", &["Blood Vulture", "Reinforced x 1"])
        );
    }

    #[test]
    fn test_document_keeps_trailing_lines() {
        let lines = lex_lines(
            "Allegiance: Ogor Mawtribes\n\nLeaders\nButcher (130)\n\nCore Battalions\n*Battle Regiment\n",
        );
        let parsed = document().parse(lines).unwrap();

        assert_eq!(parsed.warscrolls, vec![ParsedWarscroll::new("Butcher", &[])]);
        let trailer: Vec<&str> = parsed.trailer.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(trailer, vec!["", "Core Battalions", "*Battle Regiment"]);
    }

    #[test]
    fn test_document_requires_allegiance_first() {
        let lines = lex_lines("Leaders\nButcher (130)\n");
        assert!(document().parse(lines).is_err());
    }
}
