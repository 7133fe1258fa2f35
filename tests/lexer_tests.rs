use esc::{lex, Context, ErrorCategory, ErrorKind, TokenKind};

fn kinds_and_texts(src: &str) -> Vec<(TokenKind, String)> {
    let mut ctx = Context::new(src);
    let tokens = lex(&mut ctx).unwrap();
    tokens
        .iter()
        .map(|t| (t.kind, ctx.text(t.loc).to_string()))
        .collect()
}

#[test]
fn add_call_tokens() {
    let got = kinds_and_texts("(add 1 2)");
    let expected = vec![
        (TokenKind::ParenLeft, "("),
        (TokenKind::Ident, "add"),
        (TokenKind::Number, "1"),
        (TokenKind::Number, "2"),
        (TokenKind::ParenRight, ")"),
    ];
    let expected: Vec<(TokenKind, String)> =
        expected.into_iter().map(|(k, s)| (k, s.to_string())).collect();
    assert_eq!(got, expected);
}

#[test]
fn every_token_span_reproduces_its_lexeme() {
    let src = "(let [x; \"two_words\"] {(f x, 12);}) # done\n";
    let mut ctx = Context::new(src);
    let tokens = lex(&mut ctx).unwrap();
    let mut rebuilt = String::new();
    for tok in &tokens {
        let loc = ctx.location(tok.loc);
        assert_eq!(&src[loc.offset..loc.end()], ctx.text(tok.loc));
        rebuilt.push_str(ctx.text(tok.loc));
    }
    let stripped: String = src
        .split('#')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    assert_eq!(rebuilt, stripped);
}

#[test]
fn number_followed_by_identifier() {
    let mut ctx = Context::new("123abc");
    let err = lex(&mut ctx).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lex);
    assert!(matches!(err.kind, ErrorKind::MalformedNumber { .. }));

    let got = kinds_and_texts("123 abc");
    assert_eq!(
        got,
        vec![
            (TokenKind::Number, "123".to_string()),
            (TokenKind::Ident, "abc".to_string())
        ]
    );
}

#[test]
fn identifier_may_contain_digits() {
    let got = kinds_and_texts("abc123");
    assert_eq!(got, vec![(TokenKind::Ident, "abc123".to_string())]);
}

#[test]
fn unterminated_string() {
    let mut ctx = Context::new("\"abc");
    let err = lex(&mut ctx).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedString);
}

#[test]
fn unknown_bytes_are_rejected() {
    for src in ["@", "(f `x)", "'a", "\r\n", "(f \\)"] {
        let mut ctx = Context::new(src);
        let err = lex(&mut ctx).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::UnrecognizedCharacter { .. }),
            "{src:?} gave {err}"
        );
    }
}

#[test]
fn comment_runs_to_end_of_line_only() {
    let got = kinds_and_texts("# (ignored)\n(kept)");
    assert_eq!(got.len(), 3);
    assert_eq!(got[1], (TokenKind::Ident, "kept".to_string()));
}

#[test]
fn comma_and_semicolon_are_tokens() {
    let got = kinds_and_texts("a,b;c");
    let kinds: Vec<TokenKind> = got.into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Ident
        ]
    );
}
