//! Token definitions for startlang

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::Span;

/// A classified chunk of source text produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexeme {
    /// Exact matched substring
    pub source: String,
    #[serde(rename = "token")]
    pub kind: TokenKind,
    pub span: Span,
}

impl Lexeme {
    pub fn new(source: impl Into<String>, kind: TokenKind, span: Span) -> Self {
        Self {
            source: source.into(),
            kind,
            span,
        }
    }

    /// Compares this lexeme's token with an expected token
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Token kinds, declared in matching priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Spaces, tabs, newlines
    WhiteSpace,

    // ============ Reserved words ============
    /// start
    Start,
    /// end
    End,
    /// print
    Print,

    // ============ Operators and punctuation ============
    /// =
    AssignmentOperator,
    /// (
    OpenParen,
    /// )
    CloseParen,
    /// /*
    OpenComment,
    /// */
    CloseComment,

    // ============ Identifiers and Literals ============
    Identifier,
    /// Integer literal
    Number,

    /// Any single character nothing else claims
    Unrecognized,
}

impl TokenKind {
    /// Every kind, highest priority first
    pub const ALL: [TokenKind; 12] = [
        TokenKind::WhiteSpace,
        TokenKind::Start,
        TokenKind::End,
        TokenKind::Print,
        TokenKind::AssignmentOperator,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenComment,
        TokenKind::CloseComment,
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::Unrecognized,
    ];

    /// Legacy token name, as shown to users
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::WhiteSpace => "white_space",
            TokenKind::Start => "start",
            TokenKind::End => "end",
            TokenKind::Print => "print",
            TokenKind::AssignmentOperator => "assignment_operator",
            TokenKind::OpenParen => "open_paren",
            TokenKind::CloseParen => "close_paren",
            TokenKind::OpenComment => "open_comment",
            TokenKind::CloseComment => "close_comment",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Unrecognized => "unrecognized",
        }
    }

    /// How a parse error describes this token when it was expected
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::WhiteSpace => "white space",
            TokenKind::Start => "\"start\"",
            TokenKind::End => "\"end\"",
            TokenKind::Print => "\"print\"",
            TokenKind::AssignmentOperator => "an assignment operator",
            TokenKind::OpenParen => "\"(\"",
            TokenKind::CloseParen => "\")\"",
            TokenKind::OpenComment => "\"/*\"",
            TokenKind::CloseComment => "\"*/\"",
            TokenKind::Identifier => "an identifier",
            TokenKind::Number => "a number",
            TokenKind::Unrecognized => "an unrecognized symbol",
        }
    }

    /// Try to convert an identifier to a reserved word
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "start" => Some(TokenKind::Start),
            "end" => Some(TokenKind::End),
            "print" => Some(TokenKind::Print),
            _ => None,
        }
    }

    /// Source pattern for this kind, without the start anchor
    fn pattern(&self) -> &'static str {
        match self {
            TokenKind::WhiteSpace => r"\s+",
            TokenKind::Start => r"start(?-u:\b)",
            TokenKind::End => r"end(?-u:\b)",
            TokenKind::Print => r"print(?-u:\b)",
            TokenKind::AssignmentOperator => r"=",
            TokenKind::OpenParen => r"\(",
            TokenKind::CloseParen => r"\)",
            TokenKind::OpenComment => r"/\*",
            TokenKind::CloseComment => r"\*/",
            // Must come after the reserved words.
            TokenKind::Identifier => r"[a-zA-Z]+[a-zA-Z0-9_]*",
            TokenKind::Number => r"[0-9]+(?-u:\b)",
            // Must be last.
            TokenKind::Unrecognized => r"(?s).",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    /// The token table: one start-anchored regex per kind, in priority order.
    static ref TOKEN_TABLE: Vec<(TokenKind, Regex)> = TokenKind::ALL
        .iter()
        .map(|kind| {
            let regex = Regex::new(&format!("^(?:{})", kind.pattern()))
                .expect("token patterns are valid regexes");
            (*kind, regex)
        })
        .collect();
}

/// Match the token table against the front of `input`.
///
/// Returns the first (highest priority) kind whose pattern matches, with the
/// length of the match. Empty matches never win.
pub fn match_prefix(input: &str) -> Option<(TokenKind, usize)> {
    TOKEN_TABLE.iter().find_map(|(kind, regex)| {
        regex
            .find(input)
            .filter(|m| !m.as_str().is_empty())
            .map(|m| (*kind, m.end()))
    })
}
