//! Parser for wish command segments
//!
//! Grammar of one segment (after trimming):
//!
//! ```text
//! command  := word+ redirect?
//! redirect := '>' word
//! ```
//!
//! Anything else is rejected, and the whole segment is abandoned.

use crate::ast::Command;
use crate::lexer::{lex, Token};
use std::ffi::OsString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Redirection without a command before it")]
    MissingCommand,
    #[error("More than one redirection in a command")]
    MultipleRedirects,
    #[error("Redirection without a target file")]
    MissingTarget,
    #[error("Redirection target must be a single word, found {0}")]
    ExtraTargets(usize),
}

/// Parser state
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Consume and return the current token
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Parse the whole token list into a command.
    ///
    /// `Ok(None)` means there was nothing to run.
    pub fn parse(&mut self) -> Result<Option<Command>, ParseError> {
        let argv = self.parse_words();

        if self.peek().is_none() {
            return Ok(Command::new(argv, None));
        }

        // The only token that stops parse_words is a redirection
        if argv.is_empty() {
            return Err(ParseError::MissingCommand);
        }
        let target = self.parse_redirect()?;

        Ok(Command::new(argv, Some(target)))
    }

    /// Collect words up to the next operator
    fn parse_words(&mut self) -> Vec<OsString> {
        let mut words = Vec::new();
        while let Some(Token::Word(word)) = self.peek() {
            words.push(word.clone());
            self.pos += 1;
        }
        words
    }

    /// Parse `'>' word` and require that nothing follows it
    fn parse_redirect(&mut self) -> Result<OsString, ParseError> {
        self.advance(); // consume the '>'

        let rest = &self.tokens[self.pos..];
        if rest.contains(&Token::Redirect) {
            return Err(ParseError::MultipleRedirects);
        }

        let mut targets = self.parse_words();
        match targets.len() {
            0 => Err(ParseError::MissingTarget),
            1 => Ok(targets.remove(0)),
            n => Err(ParseError::ExtraTargets(n)),
        }
    }
}

/// Parse one trimmed command segment
pub fn parse_command(segment: &[u8]) -> Result<Option<Command>, ParseError> {
    Parser::new(lex(segment)).parse()
}
