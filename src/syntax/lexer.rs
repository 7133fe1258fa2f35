//! Lexical analysis for esc source code.
//!
//! The scan is byte-oriented: identifier classification uses fixed ASCII
//! tables indexed by raw byte value, so any non-ASCII byte outside a string
//! or comment is rejected. The first malformed lexeme aborts the scan and no
//! partial token list is returned.

use tracing::debug;

use crate::context::{Context, Location};
use crate::errors::{to_source_span, ErrorKind, ErrorReporting, EscError};
use crate::syntax::token::{Token, TokenKind};

// ============================================================================
// CLASSIFICATION TABLES
// ============================================================================

/// Bytes that may start an identifier.
static IDENT_BEGIN: [bool; 256] = ident_table(false);

/// Bytes that may continue an identifier: the start set plus digits.
static IDENT_CONT: [bool; 256] = ident_table(true);

const fn ident_table(digits: bool) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < 256 {
        let b = i as u8;
        table[i] = b.is_ascii_alphabetic()
            || matches!(
                b,
                b'!' | b'$'
                    | b'%'
                    | b'&'
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'/'
                    | b':'
                    | b'<'
                    | b'='
                    | b'>'
                    | b'?'
                    | b'^'
                    | b'_'
                    | b'|'
                    | b'~'
            )
            || (digits && b.is_ascii_digit());
        i += 1;
    }
    table
}

pub fn is_ident_begin(b: u8) -> bool {
    IDENT_BEGIN[b as usize]
}

pub fn is_ident_cont(b: u8) -> bool {
    IDENT_CONT[b as usize]
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Tokenizes the context's source, registering one location per token.
///
/// Token locations are registered in source order, so the `n`th token of a
/// fresh context has location id `n`.
pub fn lex(ctx: &mut Context) -> Result<Vec<Token>, EscError> {
    let lexemes = Scanner::new(ctx.src())
        .scan()
        .map_err(|(kind, loc)| ctx.report(kind, to_source_span(loc)))?;

    let tokens: Vec<Token> = lexemes
        .into_iter()
        .map(|(kind, loc)| Token::new(kind, ctx.add_span(loc)))
        .collect();

    debug!(
        source = ctx.name(),
        tokens = tokens.len(),
        locations = ctx.len(),
        "lexed source"
    );
    Ok(tokens)
}

// ============================================================================
// SCANNER
// ============================================================================

type Lexeme = (TokenKind, Location);
type LexFailure = (ErrorKind, Location);

/// Pure scan over the source; owns no location table so it can borrow the
/// text freely.
struct Scanner<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Scanner<'src> {
    fn new(src: &'src str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.pos += 1;
        }
    }

    fn span_from(&self, start: usize) -> Location {
        Location::new(start, self.pos - start)
    }

    fn scan(mut self) -> Result<Vec<Lexeme>, LexFailure> {
        let mut lexemes = Vec::new();

        while let Some(b) = self.peek() {
            let start = self.pos;
            let kind = match b {
                b' ' | b'\t' | b'\n' => {
                    self.pos += 1;
                    continue;
                }
                b'#' => {
                    self.advance_while(|c| c != b'\n');
                    continue;
                }
                b',' => self.single(TokenKind::Comma),
                b';' => self.single(TokenKind::Semicolon),
                b'(' => self.single(TokenKind::ParenLeft),
                b')' => self.single(TokenKind::ParenRight),
                b'[' => self.single(TokenKind::BracketLeft),
                b']' => self.single(TokenKind::BracketRight),
                b'{' => self.single(TokenKind::CurlyLeft),
                b'}' => self.single(TokenKind::CurlyRight),
                b'"' => self.string(start)?,
                b'0'..=b'9' => self.number(start)?,
                c if is_ident_begin(c) => {
                    self.advance_while(is_ident_cont);
                    TokenKind::Ident
                }
                _ => return Err(self.unrecognized(start)),
            };
            lexemes.push((kind, self.span_from(start)));
        }

        Ok(lexemes)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    /// Contents are taken verbatim up to the next `"`; escapes are not
    /// interpreted.
    fn string(&mut self, start: usize) -> Result<TokenKind, LexFailure> {
        let body = start + 1;
        match self.bytes[body..].iter().position(|&c| c == b'"') {
            Some(i) => {
                self.pos = body + i + 1;
                Ok(TokenKind::String)
            }
            None => {
                self.pos = self.bytes.len();
                Err((ErrorKind::UnterminatedString, self.span_from(start)))
            }
        }
    }

    /// End of input ends the numeral like any other non-identifier byte.
    fn number(&mut self, start: usize) -> Result<TokenKind, LexFailure> {
        self.advance_while(|c| c.is_ascii_digit());
        if self.peek().is_some_and(is_ident_begin) {
            self.advance_while(is_ident_cont);
            let lexeme = self.src[start..self.pos].to_string();
            return Err((ErrorKind::MalformedNumber { lexeme }, self.span_from(start)));
        }
        Ok(TokenKind::Number)
    }

    fn unrecognized(&self, start: usize) -> LexFailure {
        // Every accepted lexeme is ASCII, so `start` is always a char boundary.
        let found = self.src[start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        (
            ErrorKind::UnrecognizedCharacter { found },
            Location::new(start, found.len_utf8()),
        )
    }
}
