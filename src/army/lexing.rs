//! Lexing for army list exports
//!
//! Lexing runs in two steps:
//!
//! 1. [tokenize] splits the raw text into logos tokens with byte ranges.
//! 2. [lex_lines] groups those tokens into lines and classifies each line by shape
//!    (see [line_classification]). The parser only ever sees classified lines.
//!
//! The export format is line oriented and whitespace sensitive: a leading dash marks a
//! feature, a parenthesised cost marks a warscroll and a handful of fixed words mark
//! section headers. Nothing here knows what a warscroll or an enhancement means.

pub mod line_classification;

use logos::Logos;
use std::ops::Range;

pub use line_classification::{classify_line, Line, LineKind};

/// Raw tokens of an army list export.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    #[regex(r"\r?\n")]
    Newline,

    /// A run of whitespace that does not break the line
    #[regex(r"[^\S\r\n]+")]
    Whitespace,

    /// A bullet dash, or the en-dash it turns into when pasted from rich text
    #[token("-")]
    #[token("–")]
    Dash,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(":")]
    Colon,

    #[token("*")]
    Star,

    #[regex(r"[0-9]+")]
    Number,

    /// Anything else, up to the next token boundary
    #[regex(r"[^\s\-–():*0-9]+")]
    Text,
}

/// Token paired with its byte range in the source
pub type TokenSpan = (Token, Range<usize>);

/// Tokenize an army list export.
///
/// Input logos cannot match (a lone carriage return, for instance) is kept as [Token::Text]
/// so that every byte of the source is covered by exactly one token.
pub fn tokenize(source: &str) -> Vec<TokenSpan> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| (token.unwrap_or(Token::Text), span))
        .collect()
}

/// The tokens of a single source line, without its line break.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    /// Byte range of the line content, line break excluded
    pub span: Range<usize>,
    pub tokens: Vec<TokenSpan>,
}

/// Group a flat token vector into lines, split at [Token::Newline].
///
/// Empty lines are kept, since blank lines separate sections. A last line without a
/// trailing line break is still a line.
pub fn group_lines(source: &str, tokens: Vec<TokenSpan>) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut line_start = 0;

    for (token, span) in tokens {
        if token == Token::Newline {
            lines.push(SourceLine {
                number: lines.len() + 1,
                span: line_start..span.start,
                tokens: std::mem::take(&mut current),
            });
            line_start = span.end;
        } else {
            current.push((token, span));
        }
    }

    if !current.is_empty() {
        lines.push(SourceLine {
            number: lines.len() + 1,
            span: line_start..source.len(),
            tokens: current,
        });
    }

    lines
}

/// Tokenize, group and classify an army list export.
pub fn lex_lines(source: &str) -> Vec<Line> {
    group_lines(source, tokenize(source))
        .iter()
        .map(|line| classify_line(line, source))
        .collect()
}
