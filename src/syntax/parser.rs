//! esc Parser
//!
//! Single-pass, non-backtracking recursive descent over a [`TokenStream`].
//! The kind of the next token alone picks the production; the first mismatch
//! fails the whole parse.
//!
//! ```text
//! Call   ::= '(' Word Word* ')'
//! Word   ::= Call | Array | Block | Ident | String | Number
//! Array  ::= '[' Stmt* ']'
//! Block  ::= '{' Stmt* '}'
//! Stmt   ::= Word ';'?
//! ```
//!
//! A `Stmt` without its `;` is the sequence's result and ends entry
//! collection: the closing delimiter must follow it directly.
//!
//! Words nest at most [`MAX_NESTING_DEPTH`] levels below the root call.

use tracing::{debug, trace};

use crate::ast::{Array, Ast, AstClass, Block, Metadata, Node, Word};
use crate::context::{Context, LocationId};
use crate::errors::{to_source_span, ErrorKind, ErrorReporting, EscError};
use crate::syntax::token::{Token, TokenKind, TokenStream};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses one call from the front of `tokens`.
///
/// Tokens after the closing `)` are left in the stream. On error the stream
/// is left partially consumed.
pub fn parse(ctx: &mut Context, tokens: &mut TokenStream) -> Result<Node<Ast>, EscError> {
    let start = tokens.offset();
    let program = Parser::new(ctx, &mut *tokens).call()?;
    debug!(
        consumed = tokens.offset() - start,
        root = program.meta().loc(),
        "parsed call"
    );
    Ok(program)
}

/// Parses any single word from the front of `tokens`.
pub fn parse_word(ctx: &mut Context, tokens: &mut TokenStream) -> Result<Node<Word>, EscError> {
    Parser::new(ctx, tokens).word()
}

/// Fails if any token is left in the stream.
pub fn expect_end(ctx: &Context, tokens: &TokenStream) -> Result<(), EscError> {
    match tokens.peek() {
        None => Ok(()),
        Some(tok) => Err(ctx.report(
            ErrorKind::TrailingInput {
                found: describe(ctx, tok),
            },
            to_source_span(ctx.location(tok.loc)),
        )),
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// Deepest word nesting accepted before the parse bails out.
///
/// Every level costs a few stack frames, so unbounded input could otherwise
/// overflow the stack instead of failing.
pub const MAX_NESTING_DEPTH: usize = 128;

struct Parser<'a> {
    ctx: &'a mut Context,
    tokens: &'a mut TokenStream,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(ctx: &'a mut Context, tokens: &'a mut TokenStream) -> Self {
        Self {
            ctx,
            tokens,
            depth: 0,
        }
    }

    fn call(&mut self) -> Result<Node<Ast>, EscError> {
        let open = self.expect(TokenKind::ParenLeft, "'('")?;
        let function = self.word()?;

        let mut arguments = Vec::new();
        while self.at_entry(TokenKind::ParenRight) {
            arguments.push(self.word()?);
        }

        let close = self.expect(TokenKind::ParenRight, "')'")?;
        let loc = self.close_span(open, close);
        trace!(loc, arguments = arguments.len(), "closed call");
        Ok(Node::new(Metadata::new(loc), Ast::new(function, arguments)))
    }

    fn word(&mut self) -> Result<Node<Word>, EscError> {
        let Some(tok) = self.tokens.peek() else {
            return Err(self.eof("a word"));
        };
        self.enter_nesting(tok)?;
        let word = match tok.kind {
            TokenKind::ParenLeft => self.call().map(|call| call.map(Word::Ast)),
            TokenKind::BracketLeft => self.array(),
            TokenKind::CurlyLeft => self.block(),
            TokenKind::Ident => self.ident(),
            TokenKind::String => self.string(),
            TokenKind::Number => self.number(),
            _ => Err(self.unexpected(tok, "a word").with_help(
                "a word is a call, array, block, identifier, string or number",
            )),
        };
        self.depth -= 1;
        word
    }

    fn array(&mut self) -> Result<Node<Word>, EscError> {
        let (statements, result, loc) =
            self.sequence(TokenKind::BracketLeft, TokenKind::BracketRight)?;
        trace!(loc, statements = statements.len(), "closed array");
        Ok(Node::new(
            Metadata::new(loc),
            Word::Array(Array::new(statements, result)),
        ))
    }

    fn block(&mut self) -> Result<Node<Word>, EscError> {
        let (statements, result, loc) =
            self.sequence(TokenKind::CurlyLeft, TokenKind::CurlyRight)?;
        trace!(loc, statements = statements.len(), "closed block");
        Ok(Node::new(
            Metadata::new(loc),
            Word::Block(Block::new(statements, result)),
        ))
    }

    /// Shared body of arrays and blocks.
    fn sequence(
        &mut self,
        open_kind: TokenKind,
        close_kind: TokenKind,
    ) -> Result<(Vec<Node<Word>>, Option<Node<Word>>, LocationId), EscError> {
        let open = self.expect(open_kind, open_kind.describe())?;

        let mut statements = Vec::new();
        let mut result = None;
        while self.at_entry(close_kind) {
            let (entry, class) = self.stmt()?;
            match class {
                AstClass::Statement => statements.push(entry),
                AstClass::Expression => {
                    result = Some(entry);
                    break;
                }
            }
        }

        let close = self.expect(close_kind, close_kind.describe())?;
        Ok((statements, result, self.close_span(open, close)))
    }

    fn stmt(&mut self) -> Result<(Node<Word>, AstClass), EscError> {
        let entry = self.word()?;
        if self.tokens.peek_kind() == Some(TokenKind::Semicolon) {
            self.tokens.advance();
            return Ok((entry, AstClass::Statement));
        }
        Ok((entry, AstClass::Expression))
    }

    // ------------------------------------------------------------------------
    // Leaves reuse the token's own location.
    // ------------------------------------------------------------------------

    fn ident(&mut self) -> Result<Node<Word>, EscError> {
        let tok = self.expect(TokenKind::Ident, "identifier")?;
        let name = self.ctx.text(tok.loc).to_string();
        Ok(Node::new(Metadata::new(tok.loc), Word::Identifier(name)))
    }

    fn string(&mut self) -> Result<Node<Word>, EscError> {
        let tok = self.expect(TokenKind::String, "string")?;
        let text = self.ctx.text(tok.loc);
        let Some(content) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) else {
            return Err(self.invalid_literal(tok, "string"));
        };
        let content = content.to_string();
        Ok(Node::new(Metadata::new(tok.loc), Word::String(content)))
    }

    fn number(&mut self) -> Result<Node<Word>, EscError> {
        let tok = self.expect(TokenKind::Number, "number")?;
        let value = self
            .ctx
            .text(tok.loc)
            .parse::<i64>()
            .map_err(|_| self.invalid_literal(tok, "number"))?;
        Ok(Node::new(Metadata::new(tok.loc), Word::Number(value)))
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// True while another entry precedes `close`. End of input also stops
    /// the loop so the closing `expect` reports it.
    fn at_entry(&self, close: TokenKind) -> bool {
        self.tokens.peek_kind().is_some_and(|kind| kind != close)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, EscError> {
        match self.tokens.advance() {
            Some(tok) if tok.kind == kind => Ok(tok),
            Some(tok) => Err(self.unexpected(tok, expected)),
            None => Err(self.eof(expected)),
        }
    }

    fn enter_nesting(&mut self, tok: Token) -> Result<(), EscError> {
        if self.depth >= MAX_NESTING_DEPTH {
            debug!(loc = tok.loc, "nesting limit reached");
            return Err(self.ctx.report(
                ErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                to_source_span(self.ctx.location(tok.loc)),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Registers the span from `open` through `close`.
    fn close_span(&mut self, open: Token, close: Token) -> LocationId {
        let span = self.ctx.location(open.loc) + self.ctx.location(close.loc);
        self.ctx.add_span(span)
    }

    fn unexpected(&self, tok: Token, expected: &str) -> EscError {
        let found = describe(&*self.ctx, tok);
        self.ctx.unexpected_token(
            expected,
            &found,
            to_source_span(self.ctx.location(tok.loc)),
        )
    }

    fn eof(&self, expected: &str) -> EscError {
        let end = self.ctx.src().len();
        self.ctx.unexpected_eof(expected, (end..end).into())
    }

    fn invalid_literal(&self, tok: Token, literal_type: &str) -> EscError {
        self.ctx.report(
            ErrorKind::InvalidLiteral {
                literal_type: literal_type.into(),
                value: self.ctx.text(tok.loc).into(),
            },
            to_source_span(self.ctx.location(tok.loc)),
        )
    }
}

fn describe(ctx: &Context, tok: Token) -> String {
    match tok.kind {
        TokenKind::Ident | TokenKind::Number | TokenKind::String => {
            format!("{} '{}'", tok.kind, ctx.text(tok.loc))
        }
        kind => kind.describe().to_string(),
    }
}
