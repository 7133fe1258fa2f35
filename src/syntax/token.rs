//! Tokens and the cursor the parser consumes them through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::LocationId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    ParenLeft,
    ParenRight,
    BracketLeft,
    BracketRight,
    CurlyLeft,
    CurlyRight,
    Comma,
    Semicolon,
    Ident,
    String,
    Number,
}

impl TokenKind {
    /// How the kind is named in diagnostics.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::ParenLeft => "'('",
            Self::ParenRight => "')'",
            Self::BracketLeft => "'['",
            Self::BracketRight => "']'",
            Self::CurlyLeft => "'{'",
            Self::CurlyRight => "'}'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Ident => "identifier",
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: LocationId,
}

impl Token {
    pub const fn new(kind: TokenKind, loc: LocationId) -> Self {
        Self { kind, loc }
    }
}

/// Front-to-back cursor over a lexed token sequence.
///
/// Consumed tokens are never revisited. After a parse error the cursor is
/// left wherever the failure occurred and should not be reused.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|tok| tok.kind)
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Option<Token> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    /// Index of the next unconsumed token.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
