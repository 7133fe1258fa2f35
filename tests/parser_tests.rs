// tests/parser_tests.rs

use esc::syntax::parser::MAX_NESTING_DEPTH;
use esc::{
    lex, parse, parse_source, Context, ErrorCategory, ErrorKind, Location, Node, TokenStream, Word,
};

// Parses a whole program, panicking with the diagnostic on failure.
fn program(src: &str) -> (Context, Node<esc::Ast>) {
    let mut ctx = Context::new(src);
    let root = parse_source(&mut ctx).unwrap_or_else(|e| panic!("{src}: {e}"));
    (ctx, root)
}

fn argument(root: &Node<esc::Ast>, index: usize) -> &Word {
    root.get().arguments()[index].get()
}

#[test]
fn test_end_to_end_add() {
    let (ctx, root) = program("(add 1 2)");
    assert_eq!(root.get().function().get(), &Word::Identifier("add".into()));
    assert_eq!(argument(&root, 0), &Word::Number(1));
    assert_eq!(argument(&root, 1), &Word::Number(2));
    assert_eq!(ctx.location(root.meta().loc()), Location::new(0, 9));
}

#[test]
fn test_nested_calls_pretty_print() {
    let (_, root) = program("(+ 1 (* 2 3))");
    assert_eq!(root.get().pretty(), "(+ 1 (* 2 3))");
}

#[test]
fn test_function_position_can_be_any_word() {
    let (_, root) = program("((curry f 1) 2)");
    assert_eq!(root.get().function().get().type_name(), "Ast");
    let (_, root) = program("([f; g] x)");
    assert_eq!(root.get().function().get().type_name(), "Array");
}

#[test]
fn test_string_contents_are_verbatim() {
    let (_, root) = program(r#"(print "a\nb" "")"#);
    assert_eq!(argument(&root, 0), &Word::String(r"a\nb".into()));
    assert_eq!(argument(&root, 1), &Word::String(String::new()));
}

#[test]
fn test_block_statement_and_result() {
    let (_, root) = program("(f {1; 2; 3})");
    let Word::Block(block) = argument(&root, 0) else {
        panic!("expected a block");
    };
    let statements: Vec<&Word> = block.statements().iter().map(Node::get).collect();
    assert_eq!(statements, vec![&Word::Number(1), &Word::Number(2)]);
    assert_eq!(block.result().map(Node::get), Some(&Word::Number(3)));
}

#[test]
fn test_block_of_statements_only() {
    let (_, root) = program("(f {1; 2;})");
    let Word::Block(block) = argument(&root, 0) else {
        panic!("expected a block");
    };
    assert_eq!(block.statements().len(), 2);
    assert!(block.result().is_none());
}

#[test]
fn test_expression_ends_array_entries() {
    let mut ctx = Context::new("(f [1 2; 3 4])");
    let err = parse_source(&mut ctx).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert_eq!(
        err.kind,
        ErrorKind::UnexpectedToken {
            expected: "']'".into(),
            found: "number '2'".into(),
        }
    );
}

#[test]
fn test_single_result_array_consumes_closer() {
    let mut ctx = Context::new("(f [(g 1)]) (h)");
    let tokens = lex(&mut ctx).unwrap();
    let mut stream = TokenStream::new(tokens);
    let root = parse(&mut ctx, &mut stream).unwrap();

    let Word::Array(array) = argument(&root, 0) else {
        panic!("expected an array");
    };
    assert!(array.statements().is_empty());
    assert_eq!(array.result().unwrap().get().pretty(), "(g 1)");
    // Only the second program remains.
    assert_eq!(stream.remaining().len(), 3);
}

#[test]
fn test_arrays_and_blocks_are_distinct() {
    let (_, root) = program("(f [a] {a})");
    assert_eq!(argument(&root, 0).type_name(), "Array");
    assert_eq!(argument(&root, 1).type_name(), "Block");
}

#[test]
fn test_unclosed_call_fails() {
    let mut ctx = Context::new("(foo");
    let err = parse_source(&mut ctx).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert_eq!(err.error_code(), "esc::parse::unexpected_eof");
}

#[test]
fn test_mismatched_brackets_fail() {
    for src in ["(+ 1}", "(f [1)", "(f {1]", "[1]", "(f ;)", "()"] {
        let mut ctx = Context::new(src);
        let err = parse_source(&mut ctx).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Parse, "{src}");
    }
}

#[test]
fn test_trailing_input_is_rejected() {
    let mut ctx = Context::new("(a) b");
    let err = parse_source(&mut ctx).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TrailingInput { found: "identifier 'b'".into() });
    assert_eq!(err.location(), Location::new(4, 1));
}

#[test]
fn test_lex_errors_surface_through_parse_source() {
    let mut ctx = Context::new("(add 123abc)");
    let err = parse_source(&mut ctx).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lex);
}

#[test]
fn test_round_trip_parse_pretty_parse() {
    let cases = [
        "(+ 1 2)",
        "(f [1; 2; 3] {x; y})",
        "(define main {(print \"hi\"); (exit 0)})",
        "(a [] {} [b;])",
    ];
    for src in cases {
        let (_, first) = program(src);
        let rendered = first.get().pretty();
        let (_, second) = program(&rendered);
        assert_eq!(second.get().pretty(), rendered, "round trip failed for {src}");
    }
}

#[test]
fn test_fixture_parses() {
    let src = include_str!("fixtures/good/blocks.esc");
    let (ctx, root) = program(src);
    assert_eq!(root.get().function().get(), &Word::Identifier("define".into()));
    let body = &root.get().arguments()[1];
    assert!(ctx.text(body.meta().loc()).starts_with('{'));
    assert!(ctx.text(body.meta().loc()).ends_with('}'));
}

#[test]
fn test_deep_nesting_fails_instead_of_overflowing() {
    let depth = 100_000;
    let src = format!("{}f{}", "(".repeat(depth), ")".repeat(depth));
    let mut ctx = Context::new(src);
    let err = parse_source(&mut ctx).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert_eq!(err.error_code(), "esc::parse::nesting_too_deep");
    assert_eq!(
        err.kind,
        ErrorKind::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
    // The root call is depth 0, so the paren that crosses the limit is the
    // (MAX_NESTING_DEPTH + 2)-th one.
    assert_eq!(err.location(), Location::new(MAX_NESTING_DEPTH + 1, 1));
}

#[test]
fn test_deep_mixed_sequences_fail_with_nesting_error() {
    let depth = 50_000;
    let src = format!("(f {}x{})", "[{".repeat(depth), "}]".repeat(depth));
    let mut ctx = Context::new(src);
    let err = parse_source(&mut ctx).unwrap_err();
    assert_eq!(err.error_code(), "esc::parse::nesting_too_deep");
}
