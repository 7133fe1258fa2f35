//! AST module for the esc language
//!
//! Every node pairs its payload with [`Metadata`] naming the source range that
//! produced it. The tree is built bottom-up by the parser and never mutated
//! afterwards; parents own their children exclusively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::LocationId;

// ============================================================================
// NODE WRAPPER
// ============================================================================

/// Source attribution attached to every node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    loc: LocationId,
}

impl Metadata {
    pub const fn new(loc: LocationId) -> Self {
        Self { loc }
    }

    pub const fn loc(&self) -> LocationId {
        self.loc
    }
}

/// A located value.
///
/// # Examples
///
/// ```rust
/// use esc::ast::{Metadata, Node, Word};
/// let node = Node::new(Metadata::new(3), 42_i64);
/// let word: Node<Word> = node.map(Word::Number);
/// assert_eq!(word.meta().loc(), 3);
/// assert_eq!(word.get(), &Word::Number(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<T> {
    meta: Metadata,
    value: T,
}

impl<T> Node<T> {
    pub fn new(meta: Metadata, value: T) -> Self {
        Self { meta, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// Rewraps the payload under a new type, keeping the same metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Node<U> {
        Node {
            meta: self.meta,
            value: f(self.value),
        }
    }
}

// ============================================================================
// WORDS
// ============================================================================

/// Every value form the language can express.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Word {
    Number(i64),
    String(String),
    Identifier(String),
    Array(Array),
    Block(Block),
    Ast(Ast),
}

/// Whether a sequence entry was terminated by `;`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstClass {
    Statement,
    Expression,
}

/// `[ ... ]`: statements plus an optional trailing result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Array {
    statements: Vec<Node<Word>>,
    result: Option<Box<Node<Word>>>,
}

/// `{ ... }`: statements plus an optional trailing result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    statements: Vec<Node<Word>>,
    result: Option<Box<Node<Word>>>,
}

/// A call: function position followed by arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ast {
    function: Box<Node<Word>>,
    arguments: Vec<Node<Word>>,
}

impl Array {
    pub fn new(statements: Vec<Node<Word>>, result: Option<Node<Word>>) -> Self {
        Self {
            statements,
            result: result.map(Box::new),
        }
    }

    pub fn statements(&self) -> &[Node<Word>] {
        &self.statements
    }

    pub fn result(&self) -> Option<&Node<Word>> {
        self.result.as_deref()
    }
}

impl Block {
    pub fn new(statements: Vec<Node<Word>>, result: Option<Node<Word>>) -> Self {
        Self {
            statements,
            result: result.map(Box::new),
        }
    }

    pub fn statements(&self) -> &[Node<Word>] {
        &self.statements
    }

    pub fn result(&self) -> Option<&Node<Word>> {
        self.result.as_deref()
    }
}

impl Ast {
    pub fn new(function: Node<Word>, arguments: Vec<Node<Word>>) -> Self {
        Self {
            function: Box::new(function),
            arguments,
        }
    }

    pub fn function(&self) -> &Node<Word> {
        &self.function
    }

    pub fn arguments(&self) -> &[Node<Word>] {
        &self.arguments
    }
}

impl From<Ast> for Word {
    fn from(ast: Ast) -> Self {
        Word::Ast(ast)
    }
}

impl From<Array> for Word {
    fn from(array: Array) -> Self {
        Word::Array(array)
    }
}

impl From<Block> for Word {
    fn from(block: Block) -> Self {
        Word::Block(block)
    }
}

// ============================================================================
// PRETTY PRINTING
// ============================================================================

impl Word {
    /// Canonical source rendering. Strings are printed verbatim between
    /// quotes since their contents are never unescaped.
    pub fn pretty(&self) -> String {
        use Word::*;
        match self {
            Number(n) => n.to_string(),
            String(s) => format!("\"{}\"", s),
            Identifier(s) => s.clone(),
            Array(array) => pretty_sequence('[', ']', &array.statements, array.result()),
            Block(block) => pretty_sequence('{', '}', &block.statements, block.result()),
            Ast(ast) => ast.pretty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Word::Number(_) => "Number",
            Word::String(_) => "String",
            Word::Identifier(_) => "Identifier",
            Word::Array(_) => "Array",
            Word::Block(_) => "Block",
            Word::Ast(_) => "Ast",
        }
    }
}

impl Ast {
    pub fn pretty(&self) -> String {
        let mut parts = Vec::with_capacity(self.arguments.len() + 1);
        parts.push(self.function.get().pretty());
        parts.extend(self.arguments.iter().map(|arg| arg.get().pretty()));
        format!("({})", parts.join(" "))
    }
}

fn pretty_sequence(
    open: char,
    close: char,
    statements: &[Node<Word>],
    result: Option<&Node<Word>>,
) -> String {
    let mut s = String::new();
    s.push(open);
    let mut first = true;
    for stmt in statements {
        if !first {
            s.push(' ');
        }
        s.push_str(&stmt.get().pretty());
        s.push(';');
        first = false;
    }
    if let Some(result) = result {
        if !first {
            s.push(' ');
        }
        s.push_str(&result.get().pretty());
    }
    s.push(close);
    s
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
