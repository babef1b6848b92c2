//! Line Classification
//!
//! Determines what a line is from its tokens. Classification follows this order
//! (important for correctness):
//!
//! 1. Blank lines (nothing but whitespace)
//! 2. Allegiance lines: `Allegiance: <name>`
//! 3. Bullet lines: `- <feature>`, with either dash
//! 4. Section headers: the whole line is one of the known headers
//! 5. Warscroll lines: `[N x ]<name> (<cost>)[marker]`
//! 6. Anything else
//!
//! Leading whitespace is ignored for every kind of line. Bullets are tried before
//! warscrolls so that a feature with a parenthesis in it stays a feature.

use std::ops::Range;

use super::{SourceLine, Token, TokenSpan};
use crate::army::parsing::records::Section;

/// A classified line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    /// 1-based line number in the source
    pub number: usize,
    /// Line content after leading whitespace
    pub text: String,
    pub kind: LineKind,
}

/// What a line is, with the part of it the grammar keeps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LineKind {
    Blank,
    /// Faction name following `Allegiance: `
    Allegiance(String),
    /// Everything following the bullet dash and its space
    Bullet(String),
    Header(Section),
    /// Warscroll name, without count prefix, cost or marker
    Warscroll(String),
    Other,
}

/// Classify one source line.
pub fn classify_line(line: &SourceLine, source: &str) -> Line {
    let content = skip_whitespace(&line.tokens);
    let text_start = content
        .first()
        .map(|(_, span)| span.start)
        .unwrap_or(line.span.end);
    let text = &source[text_start..line.span.end];

    Line {
        number: line.number,
        text: text.to_string(),
        kind: line_kind(content, line.span.end, text, source),
    }
}

fn line_kind(content: &[TokenSpan], line_end: usize, text: &str, source: &str) -> LineKind {
    if content.is_empty() {
        return LineKind::Blank;
    }

    if let Some(name) = allegiance_name(content, line_end, source) {
        return LineKind::Allegiance(name.to_string());
    }

    if let Some(feature) = bullet_text(content, line_end, source) {
        return LineKind::Bullet(feature.to_string());
    }

    if let Some(section) = Section::from_header(text) {
        return LineKind::Header(section);
    }

    if let Some(name) = warscroll_name(content, source) {
        return LineKind::Warscroll(name.to_string());
    }

    LineKind::Other
}

/// Tokens after any leading whitespace
fn skip_whitespace(tokens: &[TokenSpan]) -> &[TokenSpan] {
    let start = tokens
        .iter()
        .position(|(t, _)| *t != Token::Whitespace)
        .unwrap_or(tokens.len());
    &tokens[start..]
}

/// Rest of the line after a whitespace token, skipping exactly one space.
///
/// Returns None when the whitespace does not start with a space or nothing follows it.
fn after_single_space<'s>(
    space: &Range<usize>,
    line_end: usize,
    source: &'s str,
) -> Option<&'s str> {
    if !source[space.clone()].starts_with(' ') {
        return None;
    }
    let rest = &source[space.start + 1..line_end];
    (!rest.is_empty()).then_some(rest)
}

/// `Allegiance: <name>`
fn allegiance_name<'s>(content: &[TokenSpan], line_end: usize, source: &'s str) -> Option<&'s str> {
    match content {
        [(Token::Text, word), (Token::Colon, _), (Token::Whitespace, space), ..]
            if &source[word.clone()] == "Allegiance" =>
        {
            after_single_space(space, line_end, source)
        }
        _ => None,
    }
}

/// `- <feature>` or `– <feature>`
fn bullet_text<'s>(content: &[TokenSpan], line_end: usize, source: &'s str) -> Option<&'s str> {
    match content {
        [(Token::Dash, _), (Token::Whitespace, space), ..] => {
            after_single_space(space, line_end, source)
        }
        _ => None,
    }
}

/// `[N x ]<name> (<cost>)[marker]`
///
/// The name runs up to the first opening parenthesis and loses its trailing whitespace.
/// The line must end in a parenthesised number, optionally followed by one marker
/// character such as the `*` flagging a unit that may be reinforced.
fn warscroll_name<'s>(content: &[TokenSpan], source: &'s str) -> Option<&'s str> {
    let name_tokens = strip_count_prefix(content, source);
    let cost_start = cost_position(content, source)?;

    let first_paren = name_tokens
        .iter()
        .position(|(t, _)| *t == Token::OpenParen)?;
    if first_paren == 0 {
        return None;
    }
    let name_start = name_tokens[0].1.start;
    let name_end = name_tokens[first_paren].1.start;
    if name_end > cost_start {
        return None;
    }

    let name = source[name_start..name_end].trim_end();
    (!name.is_empty()).then_some(name)
}

/// Drop an `N x ` repetition prefix. The name has to follow it.
fn strip_count_prefix<'a>(content: &'a [TokenSpan], source: &str) -> &'a [TokenSpan] {
    match content {
        [(Token::Number, _), (Token::Whitespace, s1), (Token::Text, x), (Token::Whitespace, s2), rest @ ..]
            if &source[s1.clone()] == " "
                && &source[x.clone()] == "x"
                && &source[s2.clone()] == " " =>
        {
            rest
        }
        _ => content,
    }
}

/// Byte offset of the `(` opening the trailing point cost.
fn cost_position(content: &[TokenSpan], source: &str) -> Option<usize> {
    let mut tail: Vec<&TokenSpan> = content
        .iter()
        .rev()
        .skip_while(|(t, _)| *t == Token::Whitespace)
        .collect();

    if let Some((token, span)) = tail.first() {
        let is_marker = *token != Token::CloseParen
            && *token != Token::Whitespace
            && source[span.clone()].chars().count() == 1;
        if is_marker {
            tail.remove(0);
        }
    }

    match tail.as_slice() {
        [(Token::CloseParen, _), (Token::Number, _), (Token::OpenParen, open), ..] => {
            Some(open.start)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::lexing::lex_lines;

    fn kind(line: &str) -> LineKind {
        lex_lines(line).remove(0).kind
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(kind("   \t "), LineKind::Blank);
    }

    #[test]
    fn test_allegiance_line() {
        assert_eq!(
            kind("    Allegiance: Ogor Mawtribes"),
            LineKind::Allegiance("Ogor Mawtribes".into())
        );
    }

    #[test]
    fn test_allegiance_without_name_is_other() {
        assert_eq!(kind("Allegiance: "), LineKind::Other);
        assert_eq!(kind("Allegiance:Ogor Mawtribes"), LineKind::Other);
    }

    #[test]
    fn test_bullet_lines() {
        assert_eq!(
            kind("- Command Trait: Nice Drop of the Red Stuff!"),
            LineKind::Bullet("Command Trait: Nice Drop of the Red Stuff!".into())
        );
        assert_eq!(
            kind("  – Mount Trait: Metalcruncher"),
            LineKind::Bullet("Mount Trait: Metalcruncher".into())
        );
        assert_eq!(kind("-General"), LineKind::Other);
    }

    #[test]
    fn test_bullet_with_parenthesis_stays_a_bullet() {
        assert_eq!(
            kind("- Gargant Hackers (x2)"),
            LineKind::Bullet("Gargant Hackers (x2)".into())
        );
    }

    #[test]
    fn test_headers() {
        assert_eq!(kind("Leaders"), LineKind::Header(Section::Leaders));
        assert_eq!(kind("  Battleline"), LineKind::Header(Section::Battleline));
        assert_eq!(
            kind("Endless Spells & Invocations"),
            LineKind::Header(Section::EndlessSpells)
        );
        assert_eq!(kind("Leaders:"), LineKind::Other);
        assert_eq!(kind("Core Battalions"), LineKind::Other);
    }

    #[test]
    fn test_warscroll_lines() {
        assert_eq!(
            kind("Kragnos, The End of Empires (720)"),
            LineKind::Warscroll("Kragnos, The End of Empires".into())
        );
        assert_eq!(
            kind("Huskard on Stonehorn (340)*"),
            LineKind::Warscroll("Huskard on Stonehorn".into())
        );
        assert_eq!(
            kind("    2 x Mournfang Pack (160)*"),
            LineKind::Warscroll("Mournfang Pack".into())
        );
    }

    #[test]
    fn test_warscroll_name_stops_at_first_parenthesis() {
        assert_eq!(
            kind("Gotrek Gurnisson (Legends) (300)"),
            LineKind::Warscroll("Gotrek Gurnisson".into())
        );
    }

    #[test]
    fn test_count_prefix_requires_a_name() {
        assert_eq!(kind("2 x (160)"), LineKind::Other);
        assert_eq!(kind("2 x (160)*"), LineKind::Other);
    }

    #[test]
    fn test_malformed_warscroll_lines() {
        assert_eq!(kind("Mournfang Pack"), LineKind::Other);
        assert_eq!(kind("Mournfang Pack (lots)"), LineKind::Other);
        assert_eq!(kind("Mournfang Pack (160) extra"), LineKind::Other);
        assert_eq!(kind("(160)"), LineKind::Other);
        assert_eq!(kind("Total: 1970 / 2000"), LineKind::Other);
    }

    #[test]
    fn test_line_text_skips_leading_whitespace() {
        let line = lex_lines("   Core Battalions").remove(0);
        assert_eq!(line.text, "Core Battalions");
        assert_eq!(line.number, 1);
    }
}
