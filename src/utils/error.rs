//! Error handling for startlang

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Text reported as `found` when the lexeme stream runs dry inside a rule
pub const END_OF_INPUT: &str = "end of input";

/// Pipeline error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Lexer Errors ====================

    #[error("No token pattern matches the input at byte {offset}")]
    LexFailure { offset: usize },

    // ==================== Parser Errors ====================

    #[error("Expected {expected} instead of \"{found}\".")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Expected \"end\" but the input ended first.")]
    MissingTerminator { span: Span },

    #[error("Unexpected symbols after \"end\": \"{found}\".")]
    TrailingInput { found: String, span: Span },

    // ==================== Driver Errors ====================

    #[error("IO error: {0}")]
    Io(String),

    #[error("Assembler error: {0}")]
    Assembler(String),
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::LexFailure { offset } => Some(Span::at(*offset)),
            Self::UnexpectedToken { span, .. } => Some(*span),
            Self::MissingTerminator { span } => Some(*span),
            Self::TrailingInput { span, .. } => Some(*span),
            Self::Io(_) | Self::Assembler(_) => None,
        }
    }

    /// Stable diagnostic code, used by the JSON reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::LexFailure { .. } => "E0001",
            Self::UnexpectedToken { .. } => "E0002",
            Self::MissingTerminator { .. } => "E0003",
            Self::TrailingInput { .. } => "E0004",
            Self::Io(_) => "E0100",
            Self::Assembler(_) => "E0101",
        }
    }
}
