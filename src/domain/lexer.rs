//! Token scanner for the legacy hierarchy format.
//!
//! Input is a run of `D{Name|Variant}` tokens with `D` in `{0,1}` and both
//! identifiers in `[a-zA-Z]+`. Anything that does not form a token is skipped.

use regex::{CaptureMatches, Regex};

/// How the builder moves its cursor after attaching a token's node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bit {
    /// `0`: descend into the new node
    Descend,
    /// `1`: stay, then climb to the nearest ancestor with an open right slot
    Sibling,
}

/// One matched `D{Name|Variant}` token. The variant is kept raw so it is
/// only validated if the builder actually processes the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub bit: Bit,
    pub name: &'a str,
    pub variant: &'a str,
}

pub struct Lexer {
    token_regex: Regex,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            token_regex: Regex::new(r"([01])\{([a-zA-Z]+)\|([a-zA-Z]+)\}").unwrap(),
        }
    }

    /// Tokens in input order.
    pub fn tokens<'r, 'h>(&'r self, input: &'h str) -> Tokens<'r, 'h> {
        Tokens {
            captures: self.token_regex.captures_iter(input),
        }
    }
}

pub struct Tokens<'r, 'h> {
    captures: CaptureMatches<'r, 'h>,
}

impl<'r, 'h> Iterator for Tokens<'r, 'h> {
    type Item = Token<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.captures.next()?;
        let bit = match caps.get(1)?.as_str() {
            "0" => Bit::Descend,
            _ => Bit::Sibling,
        };
        Some(Token {
            bit,
            name: caps.get(2)?.as_str(),
            variant: caps.get(3)?.as_str(),
        })
    }
}
