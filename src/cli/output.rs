//! Handles all user-facing output for the CLI.
//!
//! Token tables, tree dumps and JSON all go through here so every command
//! prints spans the same way.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::{Ast, Node, Word};
use crate::context::{Context, Location};
use crate::syntax::{Token, TokenKind};

/// One token as shown to users: kind, span and source text.
#[derive(Debug, Serialize)]
pub struct TokenRecord<'a> {
    pub kind: TokenKind,
    pub loc: usize,
    pub offset: usize,
    pub len: usize,
    pub text: &'a str,
}

/// A parsed program together with the table its ids point into.
#[derive(Debug, Serialize)]
pub struct AstDump<'a> {
    pub root: &'a Node<Ast>,
    pub locations: Vec<Location>,
}

pub fn token_records<'a>(ctx: &'a Context, tokens: &[Token]) -> Vec<TokenRecord<'a>> {
    tokens
        .iter()
        .map(|tok| {
            let loc = ctx.location(tok.loc);
            TokenRecord {
                kind: tok.kind,
                loc: tok.loc,
                offset: loc.offset,
                len: loc.len,
                text: ctx.text(tok.loc),
            }
        })
        .collect()
}

pub fn print_tokens(ctx: &Context, tokens: &[Token]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    print_header(&mut stdout, &format!("{} ({} tokens)", ctx.name(), tokens.len()))?;
    for record in token_records(ctx, tokens) {
        writeln!(
            stdout,
            "{:>5}..{:<5} {:<13} {}",
            record.offset,
            record.offset + record.len,
            format!("{:?}", record.kind),
            record.text
        )?;
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_tree(ctx: &Context, root: &Node<Ast>) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    print_header(&mut stdout, ctx.name())?;
    write!(stdout, "{}", render_tree(ctx, root))
}

/// Indented one-node-per-line rendering with byte ranges.
pub fn render_tree(ctx: &Context, root: &Node<Ast>) -> String {
    let mut out = String::new();
    render_ast(ctx, root, 0, &mut out);
    out
}

fn render_ast(ctx: &Context, node: &Node<Ast>, depth: usize, out: &mut String) {
    push_line(ctx, out, depth, "Ast", node.meta().loc());
    render_word(ctx, node.get().function(), depth + 1, out);
    for arg in node.get().arguments() {
        render_word(ctx, arg, depth + 1, out);
    }
}

fn render_word(ctx: &Context, node: &Node<Word>, depth: usize, out: &mut String) {
    let loc = node.meta().loc();
    match node.get() {
        Word::Number(n) => push_line(ctx, out, depth, &format!("Number {}", n), loc),
        Word::String(s) => push_line(ctx, out, depth, &format!("String {:?}", s), loc),
        Word::Identifier(s) => push_line(ctx, out, depth, &format!("Identifier {}", s), loc),
        Word::Array(array) => {
            push_line(ctx, out, depth, "Array", loc);
            render_sequence(ctx, array.statements(), array.result(), depth + 1, out);
        }
        Word::Block(block) => {
            push_line(ctx, out, depth, "Block", loc);
            render_sequence(ctx, block.statements(), block.result(), depth + 1, out);
        }
        Word::Ast(ast) => {
            push_line(ctx, out, depth, "Ast", loc);
            render_word(ctx, ast.function(), depth + 1, out);
            for arg in ast.arguments() {
                render_word(ctx, arg, depth + 1, out);
            }
        }
    }
}

fn render_sequence(
    ctx: &Context,
    statements: &[Node<Word>],
    result: Option<&Node<Word>>,
    depth: usize,
    out: &mut String,
) {
    for stmt in statements {
        render_word(ctx, stmt, depth, out);
    }
    if let Some(result) = result {
        push_line(ctx, out, depth, "=>", result.meta().loc());
        render_word(ctx, result, depth + 1, out);
    }
}

fn push_line(ctx: &Context, out: &mut String, depth: usize, label: &str, loc: usize) {
    let span = ctx.location(loc);
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} @{}..{}\n", label, span.offset, span.end()));
}

fn print_header(stdout: &mut StandardStream, title: &str) -> io::Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(stdout, "--- {} ---", title)?;
    stdout.reset()
}

/// Prints a green or red summary line.
pub fn print_summary(ok: bool, message: &str) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let color = if ok { Color::Green } else { Color::Red };
    stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    writeln!(stdout, "{}", message)?;
    stdout.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{lex, parse_source};

    #[test]
    fn records_carry_source_text() {
        let mut ctx = Context::new("(f \"x\")");
        let tokens = lex(&mut ctx).unwrap();
        let records = token_records(&ctx, &tokens);
        assert_eq!(records[2].text, "\"x\"");
        assert_eq!((records[2].offset, records[2].len), (3, 3));
    }

    #[test]
    fn tree_lists_every_node_with_its_span() {
        let mut ctx = Context::new("(f [1; 2])");
        let root = parse_source(&mut ctx).unwrap();
        let expected = "\
Ast @0..10
  Identifier f @1..2
  Array @3..9
    Number 1 @4..5
    => @7..8
      Number 2 @7..8
";
        assert_eq!(render_tree(&ctx, &root), expected);
    }
}
