//! esc Error Handling
//!
//! One error type for the whole front end. Lexing and parsing stop at the
//! first malformed construct, so an [`EscError`] always describes exactly one
//! problem together with the byte range that caused it.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::context::{Context, Location};

// ============================================================================
// ERROR DATA
// ============================================================================

/// The single error type: what went wrong, where, and how to help.
#[derive(Debug)]
pub struct EscError {
    pub kind: ErrorKind,
    pub source_info: SourceInfo,
    pub diagnostic_info: DiagnosticInfo,
}

/// Every failure the lexer or parser can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // Lex errors
    #[error("Lex error: unterminated string literal")]
    UnterminatedString,
    #[error("Lex error: malformed number '{lexeme}'")]
    MalformedNumber { lexeme: String },
    #[error("Lex error: unrecognized character {found:?}")]
    UnrecognizedCharacter { found: char },

    // Parse errors
    #[error("Parse error: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("Parse error: expected {expected}, found end of input")]
    UnexpectedEof { expected: String },
    #[error("Parse error: invalid {literal_type} '{value}'")]
    InvalidLiteral { literal_type: String, value: String },
    #[error("Parse error: unexpected {found} after the program")]
    TrailingInput { found: String },
    #[error("Parse error: nesting is too deep (maximum {limit} levels)")]
    NestingTooDeep { limit: usize },
}

/// Where the error happened.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lex,
    Parse,
}

impl ErrorCategory {
    pub const fn phase(&self) -> &'static str {
        match self {
            Self::Lex => "lex",
            Self::Parse => "parse",
        }
    }
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnterminatedString
            | Self::MalformedNumber { .. }
            | Self::UnrecognizedCharacter { .. } => ErrorCategory::Lex,

            Self::UnexpectedToken { .. }
            | Self::UnexpectedEof { .. }
            | Self::InvalidLiteral { .. }
            | Self::TrailingInput { .. }
            | Self::NestingTooDeep { .. } => ErrorCategory::Parse,
        }
    }

    /// Stable suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated_string",
            Self::MalformedNumber { .. } => "malformed_number",
            Self::UnrecognizedCharacter { .. } => "unrecognized_character",
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::UnexpectedEof { .. } => "unexpected_eof",
            Self::InvalidLiteral { .. } => "invalid_literal",
            Self::TrailingInput { .. } => "trailing_input",
            Self::NestingTooDeep { .. } => "nesting_too_deep",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "string starts here",
            Self::MalformedNumber { .. } => "malformed number",
            Self::UnrecognizedCharacter { .. } => "unrecognized character",
            Self::UnexpectedToken { .. } => "unexpected token",
            Self::UnexpectedEof { .. } => "input ends here",
            Self::InvalidLiteral { .. } => "invalid literal",
            Self::TrailingInput { .. } => "trailing input",
            Self::NestingTooDeep { .. } => "opened past the nesting limit",
        }
    }

    fn default_help(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedString => Some("add a closing '\"'"),
            Self::MalformedNumber { .. } => {
                Some("separate the number from the identifier with whitespace")
            }
            Self::TrailingInput { .. } => Some("a program is a single parenthesized call"),
            Self::NestingTooDeep { .. } => {
                Some("bind inner expressions to names in a block to flatten the nesting")
            }
            _ => None,
        }
    }
}

// ============================================================================
// ERROR CONSTRUCTION
// ============================================================================

/// Anything that can attribute an [`ErrorKind`] to a source range.
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> EscError;

    fn unexpected_token(&self, expected: &str, found: &str, span: SourceSpan) -> EscError {
        self.report(
            ErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    fn unexpected_eof(&self, expected: &str, span: SourceSpan) -> EscError {
        self.report(
            ErrorKind::UnexpectedEof {
                expected: expected.into(),
            },
            span,
        )
    }
}

impl ErrorReporting for Context {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> EscError {
        let phase = kind.category().phase();
        let error_code = format!("esc::{}::{}", phase, kind.code_suffix());
        let help = kind.default_help().map(String::from);

        EscError {
            kind,
            source_info: SourceInfo {
                source: Arc::new(NamedSource::new(self.name(), self.src().to_string())),
                primary_span: span,
                phase: phase.to_string(),
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }
}

/// Converts a location-table span to a miette span.
pub fn to_source_span(loc: Location) -> SourceSpan {
    SourceSpan::from(loc.offset..loc.end())
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

impl EscError {
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn error_code(&self) -> &str {
        &self.diagnostic_info.error_code
    }

    /// Byte range of the offending input.
    pub fn location(&self) -> Location {
        Location::new(
            self.source_info.primary_span.offset(),
            self.source_info.primary_span.len(),
        )
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }
}

impl std::error::Error for EscError {}

impl fmt::Display for EscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for EscError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

/// Prints an error with full miette diagnostics to stderr.
pub fn print_error(error: EscError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_phase_and_kind() {
        let ctx = Context::new("\"abc");
        let err = ctx.report(ErrorKind::UnterminatedString, (0..4).into());
        assert_eq!(err.error_code(), "esc::lex::unterminated_string");
        assert_eq!(err.category(), ErrorCategory::Lex);
        assert_eq!(err.location(), Location::new(0, 4));
        assert!(err.diagnostic_info.help.is_some());
    }

    #[test]
    fn display_uses_kind_message() {
        let ctx = Context::new("(foo");
        let err = ctx.unexpected_eof("')'", (4..4).into());
        assert_eq!(
            err.to_string(),
            "Parse error: expected ')', found end of input"
        );
        assert_eq!(err.error_code(), "esc::parse::unexpected_eof");
    }

    #[test]
    fn nesting_limit_is_a_parse_error() {
        let ctx = Context::new("((((");
        let err = ctx.report(ErrorKind::NestingTooDeep { limit: 3 }, (3..4).into());
        assert_eq!(err.error_code(), "esc::parse::nesting_too_deep");
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(
            err.to_string(),
            "Parse error: nesting is too deep (maximum 3 levels)"
        );
    }

    #[test]
    fn to_source_span_keeps_offset_and_length() {
        let span = to_source_span(Location::new(3, 5));
        assert_eq!(span.offset(), 3);
        assert_eq!(span.len(), 5);
    }
}
