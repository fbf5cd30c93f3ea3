//! Lexer for startlang
//!
//! Converts source code into a filtered sequence of lexemes. White space is
//! dropped, and so is everything from an open comment up to and including the
//! next close comment. Comments do not nest.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::frontend::token::{match_prefix, Lexeme, TokenKind};
use crate::utils::{Error, Result, Span};

/// How the lexer carves the next lexeme off the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LexMode {
    /// Priority-ordered token table
    #[default]
    Pattern,
    /// Hand-rolled scanner splitting on stop characters
    Scan,
}

const WHITE_SPACE: &[char] = &[' ', '\t', '\r', '\n'];
const STOP_CHARS: &[char] = &[' ', '\t', '\r', '\n', '(', ')', '=', '*', '/'];

/// The lexer state
pub struct Lexer {
    mode: LexMode,
    /// Inside a `/* ... */` region
    in_comment: bool,
}

impl Lexer {
    pub fn new(mode: LexMode) -> Self {
        Self {
            mode,
            in_comment: false,
        }
    }

    /// Lex the entire source, keeping only lexemes the parser should see
    pub fn analyze(&mut self, source: &str) -> Result<Vec<Lexeme>> {
        self.in_comment = false;
        let mut lexemes = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            let (kind, len) = match self.mode {
                LexMode::Pattern => match_prefix(rest),
                LexMode::Scan => scan_prefix(rest),
            }
            .ok_or(Error::LexFailure { offset: pos })?;

            let lexeme = Lexeme::new(&rest[..len], kind, Span::new(pos, pos + len));
            pos += len;

            match kind {
                TokenKind::OpenComment => self.in_comment = true,
                TokenKind::CloseComment => self.in_comment = false,
                TokenKind::WhiteSpace => {}
                _ if self.in_comment => trace!("discarding {:?} inside comment", lexeme.source),
                _ => lexemes.push(lexeme),
            }
        }

        debug!("lexed {} lexemes ({:?} mode)", lexemes.len(), self.mode);
        Ok(lexemes)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(LexMode::Pattern)
    }
}

/// Carve one lexeme off the front of `input` without the token table.
fn scan_prefix(input: &str) -> Option<(TokenKind, usize)> {
    let first = input.chars().next()?;

    let len = if !STOP_CHARS.contains(&first) {
        input.find(STOP_CHARS).unwrap_or(input.len())
    } else if WHITE_SPACE.contains(&first) {
        input.find(|c| !WHITE_SPACE.contains(&c)).unwrap_or(input.len())
    } else if input.starts_with("/*") || input.starts_with("*/") {
        2
    } else {
        1
    };

    let text = &input[..len];
    Some((classify(text), len))
}

fn classify(text: &str) -> TokenKind {
    if let Some(keyword) = TokenKind::keyword_from_str(text) {
        return keyword;
    }
    if is_identifier(text) {
        return TokenKind::Identifier;
    }
    match text {
        "(" => TokenKind::OpenParen,
        ")" => TokenKind::CloseParen,
        "=" => TokenKind::AssignmentOperator,
        "/*" => TokenKind::OpenComment,
        "*/" => TokenKind::CloseComment,
        _ if text.starts_with(WHITE_SPACE) => TokenKind::WhiteSpace,
        _ if text.bytes().all(|b| b.is_ascii_digit()) => TokenKind::Number,
        _ => TokenKind::Unrecognized,
    }
}

/// `[a-zA-Z][a-zA-Z0-9_]*`
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A lexeme sequence with a read cursor, scoped to a single parse
#[derive(Debug, Clone)]
pub struct LexemeStream {
    lexemes: Vec<Lexeme>,
    pos: usize,
    /// Where the source ended, for end-of-input diagnostics
    end: usize,
}

impl LexemeStream {
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        let end = lexemes.last().map_or(0, |l| l.span.end);
        Self { lexemes, pos: 0, end }
    }

    /// Next lexeme without advancing
    pub fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    /// Next lexeme, advancing the cursor. Stays `None` once exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Lexeme> {
        let lexeme = self.lexemes.get(self.pos)?;
        self.pos += 1;
        Some(lexeme)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lexemes.len()
    }

    /// Span just past the last lexeme
    pub fn end_span(&self) -> Span {
        Span::at(self.end)
    }

    /// Rewind the cursor to the first lexeme
    pub fn restart(&mut self) {
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str, mode: LexMode) -> Vec<TokenKind> {
        Lexer::new(mode)
            .analyze(source)
            .unwrap()
            .into_iter()
            .map(|l| l.kind)
            .collect()
    }

    #[test]
    fn test_simple_program() {
        let lexemes = Lexer::default().analyze("start x=3 print(x) end").unwrap();
        let sources: Vec<_> = lexemes.iter().map(|l| l.source.as_str()).collect();
        assert_eq!(sources, ["start", "x", "=", "3", "print", "(", "x", ")", "end"]);
        assert!(lexemes[0].is(TokenKind::Start));
        assert!(lexemes[1].is(TokenKind::Identifier));
        assert!(lexemes[3].is(TokenKind::Number));
        assert_eq!(lexemes[4].span, Span::new(10, 15));
    }

    #[test]
    fn test_print_is_always_reserved() {
        for mode in [LexMode::Pattern, LexMode::Scan] {
            assert_eq!(kinds("print", mode), [TokenKind::Print]);
        }
    }

    #[test]
    fn test_comment_is_dropped() {
        assert_eq!(
            kinds("start /* x=1 */ print(2) end", LexMode::Pattern),
            kinds("start print(2) end", LexMode::Pattern),
        );
    }

    #[test]
    fn test_comments_do_not_nest() {
        let lexemes = Lexer::default().analyze("/* a /* b */ c */").unwrap();
        let sources: Vec<_> = lexemes.iter().map(|l| l.source.as_str()).collect();
        // the first */ closes the comment; the trailing */ is itself dropped
        assert_eq!(sources, ["c"]);
    }

    #[test]
    fn test_unterminated_comment_swallows_rest() {
        assert_eq!(kinds("start /* print(1) end", LexMode::Pattern), [TokenKind::Start]);
    }

    #[test]
    fn test_non_ascii_next_to_keyword_and_number() {
        let lexemes = Lexer::default().analyze("printé start x=5é end").unwrap();
        let pairs: Vec<_> = lexemes.iter().map(|l| (l.kind, l.source.as_str())).collect();
        assert_eq!(
            pairs,
            [
                (TokenKind::Print, "print"),
                (TokenKind::Unrecognized, "é"),
                (TokenKind::Start, "start"),
                (TokenKind::Identifier, "x"),
                (TokenKind::AssignmentOperator, "="),
                (TokenKind::Number, "5"),
                (TokenKind::Unrecognized, "é"),
                (TokenKind::End, "end"),
            ]
        );
    }

    #[test]
    fn test_unrecognized_characters() {
        assert_eq!(
            kinds("x + 1", LexMode::Pattern),
            [TokenKind::Identifier, TokenKind::Unrecognized, TokenKind::Number]
        );
    }

    #[test]
    fn test_scan_mode() {
        assert_eq!(
            kinds("start\n\tx=10 /*c*/ print(x) end", LexMode::Scan),
            [
                TokenKind::Start,
                TokenKind::Identifier,
                TokenKind::AssignmentOperator,
                TokenKind::Number,
                TokenKind::Print,
                TokenKind::OpenParen,
                TokenKind::Identifier,
                TokenKind::CloseParen,
                TokenKind::End,
            ]
        );
        assert_eq!(kinds("x+1", LexMode::Scan), [TokenKind::Unrecognized]);
        assert_eq!(kinds("a * b", LexMode::Scan)[1], TokenKind::Unrecognized);
    }

    #[test]
    fn test_stream_end_is_stable() {
        let lexemes = Lexer::default().analyze("start end").unwrap();
        let mut stream = LexemeStream::new(lexemes);
        assert_eq!(stream.peek().map(|l| l.kind), Some(TokenKind::Start));
        assert_eq!(stream.next().map(|l| l.kind), Some(TokenKind::Start));
        assert_eq!(stream.next().map(|l| l.kind), Some(TokenKind::End));
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
        assert!(stream.is_exhausted());
        assert_eq!(stream.end_span(), Span::at(9));

        stream.restart();
        assert_eq!(stream.peek().map(|l| l.kind), Some(TokenKind::Start));
    }
}
