//! esc: the front end of a small Lisp-like expression language.
//!
//! Source text is lexed into tokens and parsed into a tree of located
//! [`ast::Word`]s. Every token and node refers back into the source through
//! the location table held by [`context::Context`].
//!
//! ```rust
//! use esc::{parse_source, Context, Word};
//!
//! let mut ctx = Context::new("(add 1 2)");
//! let program = parse_source(&mut ctx).unwrap();
//! assert_eq!(program.get().function().get(), &Word::Identifier("add".into()));
//! assert_eq!(ctx.location(program.meta().loc()).len, 9);
//! ```

pub use crate::ast::{Array, Ast, AstClass, Block, Metadata, Node, Word};
pub use crate::context::{Context, Location, LocationId};
pub use crate::errors::{ErrorCategory, ErrorKind, EscError};
pub use crate::syntax::{lex, parse, parse_source, Token, TokenKind, TokenStream};

pub mod ast;
pub mod cli;
pub mod context;
pub mod errors;
pub mod syntax;
