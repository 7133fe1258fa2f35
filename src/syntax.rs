//! Syntax module for the esc language
//!
//! Source text flows through [`lexer::lex`] into a [`token::TokenStream`] and
//! then through [`parser::parse`] into a located tree. Both phases register
//! spans in the shared [`Context`].

use crate::ast::{Ast, Node};
use crate::context::Context;
use crate::errors::EscError;

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::lex;
pub use parser::parse;
pub use token::{Token, TokenKind, TokenStream};

/// Lexes and parses one whole compilation unit.
///
/// Unlike [`parse`], which leaves any tokens after the root call in the
/// stream, this rejects trailing input.
pub fn parse_source(ctx: &mut Context) -> Result<Node<Ast>, EscError> {
    let tokens = lex(ctx)?;
    let mut stream = TokenStream::new(tokens);
    let program = parse(ctx, &mut stream)?;
    parser::expect_end(ctx, &stream)?;
    Ok(program)
}
