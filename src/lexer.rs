//! Tokenization for wish command lines
//!
//! A line is first cut into segments on the parallel marker `&`, then each
//! segment is tokenized into words and the output redirection operator `>`.
//! Words are separated by spaces, tabs and newlines only; there is no quoting
//! and no escaping.
//!
//! Lines are raw bytes. Words keep every byte they were given, so a file
//! name that is not valid UTF-8 reaches `open` and `execv` unchanged.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{map, value},
    sequence::preceded,
    IResult,
};
use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

/// Separates the commands of one cohort
pub const PARALLEL_MARKER: u8 = b'&';

/// Introduces the redirection target of a command
pub const REDIRECT_MARKER: u8 = b'>';

/// Bytes that separate words
pub const BLANKS: [u8; 3] = [b' ', b'\t', b'\n'];

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A word (command name, argument or file name)
    Word(OsString),
    /// Output redirection: >
    Redirect,
}

fn is_blank(b: u8) -> bool {
    BLANKS.contains(&b)
}

/// Parse a run of blanks (possibly empty)
fn blanks(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(is_blank)(input)
}

/// Parse > operator
fn redirect_op(input: &[u8]) -> IResult<&[u8], Token> {
    value(Token::Redirect, char(char::from(REDIRECT_MARKER)))(input)
}

/// Parse a word: anything up to the next blank or >
fn word(input: &[u8]) -> IResult<&[u8], Token> {
    map(
        take_while1(|b: u8| !is_blank(b) && b != REDIRECT_MARKER),
        |bytes: &[u8]| Token::Word(OsString::from_vec(bytes.to_vec())),
    )(input)
}

/// Parse any single token
fn token(input: &[u8]) -> IResult<&[u8], Token> {
    preceded(blanks, alt((redirect_op, word)))(input)
}

/// Strip leading and trailing blanks
pub fn trim_blanks(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&b| !is_blank(b));
    let end = input.iter().rposition(|&b| !is_blank(b));
    match (start, end) {
        (Some(start), Some(end)) => &input[start..=end],
        _ => &[],
    }
}

/// Split a line into trimmed, non-empty command segments, left to right.
///
/// Empty segments (whitespace only, or produced by adjacent markers) are
/// dropped here and never reach the parser.
pub fn segments(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|&b| b == PARALLEL_MARKER)
        .map(trim_blanks)
        .filter(|segment| !segment.is_empty())
}

/// Tokenize one command segment
pub fn lex(input: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;
    // Every byte is either a blank, `>` or part of a word, so `token` only
    // stops on trailing blanks or the end of input
    while let Ok((remaining, next)) = token(rest) {
        tokens.push(next);
        rest = remaining;
    }
    tokens
}
