use std::fmt;

use thiserror::Error;

/// Error kinds for categorizing parse errors.
///
/// Everything else the parser meets is tolerated: malformed annotations
/// fall back to plain text, so a timer that cannot be read is the only
/// failure a recipe can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A `~` with an unclosed duration brace, or one that cannot start a timer at all.
    InvalidTimerSyntax,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::InvalidTimerSyntax => f.write_str("invalid timer syntax"),
        }
    }
}

/// A fatal parse error with the offending text and its line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} '{text}' on line {line}")]
pub struct ParseError {
    /// Error categorization
    pub kind: ParseErrorKind,
    /// The source text that could not be parsed
    pub text: String,
    /// 1-based line number where the error occurred
    pub line: usize,
}

impl ParseError {
    /// Create an error for a malformed timer annotation.
    pub fn invalid_timer(text: impl Into<String>, line: usize) -> Self {
        Self {
            kind: ParseErrorKind::InvalidTimerSyntax,
            text: text.into(),
            line,
        }
    }

    /// Error categorization.
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Result type alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
