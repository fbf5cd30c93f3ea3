//! Parser for startlang
//!
//! Recursive descent, one routine per grammar rule. Every choice point looks
//! at exactly one lexeme before committing, and nothing backtracks.

use log::debug;

use crate::frontend::ast::*;
use crate::frontend::lexer::LexemeStream;
use crate::frontend::token::{Lexeme, TokenKind};
use crate::utils::{Error, Result, END_OF_INPUT};

/// The parser
pub struct Parser<'a> {
    stream: &'a mut LexemeStream,
}

impl<'a> Parser<'a> {
    pub fn new(stream: &'a mut LexemeStream) -> Self {
        Self { stream }
    }

    // ==================== Helper Methods ====================

    fn unexpected(&self, expected: &str, found: Option<&Lexeme>) -> Error {
        match found {
            Some(lexeme) => Error::UnexpectedToken {
                expected: expected.to_string(),
                found: lexeme.source.clone(),
                span: lexeme.span,
            },
            None => Error::UnexpectedToken {
                expected: expected.to_string(),
                found: END_OF_INPUT.to_string(),
                span: self.stream.end_span(),
            },
        }
    }

    /// Consume the next lexeme, which must be of `kind`, and return its source
    fn expect(&mut self, kind: TokenKind) -> Result<String> {
        match self.stream.peek() {
            Some(lexeme) if lexeme.is(kind) => {
                let source = lexeme.source.clone();
                self.stream.next();
                Ok(source)
            }
            found => Err(self.unexpected(kind.describe(), found)),
        }
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.stream.peek().map(|l| l.kind)
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program and check nothing follows it
    pub fn parse_program(&mut self) -> Result<Program> {
        self.expect(TokenKind::Start)?;

        let mut statements = Vec::new();
        loop {
            match self.peek_kind() {
                None | Some(TokenKind::End) => break,
                Some(_) => statements.push(self.parse_statement()?),
            }
        }

        if self.stream.is_exhausted() {
            return Err(Error::MissingTerminator {
                span: self.stream.end_span(),
            });
        }
        self.expect(TokenKind::End)?;

        if let Some(extra) = self.stream.peek() {
            return Err(Error::TrailingInput {
                found: extra.source.clone(),
                span: extra.span,
            });
        }

        debug!("parsed {} statements", statements.len());
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek_kind() {
            Some(TokenKind::Identifier) => self.parse_assignment(),
            Some(TokenKind::Print) => self.parse_output(),
            _ => Err(self.unexpected("a statement", self.stream.peek())),
        }
    }

    fn parse_assignment(&mut self) -> Result<Statement> {
        let identifier = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::AssignmentOperator)?;
        let expression = self.parse_expression()?;
        Ok(Statement::Assignment {
            identifier,
            expression,
        })
    }

    fn parse_output(&mut self) -> Result<Statement> {
        self.expect(TokenKind::Print)?;
        self.expect(TokenKind::OpenParen)?;
        let expression = self.parse_expression()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(Statement::Output { expression })
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        match self.peek_kind() {
            Some(TokenKind::Identifier) => Ok(Expression::Identifier(
                self.expect(TokenKind::Identifier)?,
            )),
            Some(TokenKind::Number) => Ok(Expression::Number(self.expect(TokenKind::Number)?)),
            _ => Err(self.unexpected("an expression", self.stream.peek())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;
    use crate::utils::Span;

    fn parse(source: &str) -> Result<Program> {
        let lexemes = Lexer::default().analyze(source)?;
        let mut stream = LexemeStream::new(lexemes);
        Parser::new(&mut stream).parse_program()
    }

    #[test]
    fn test_empty_program() {
        let program = parse("start end").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_statements_keep_source_order() {
        let program = parse("start x=3 print(x) y = 07 end").unwrap();
        assert_eq!(
            program.statements,
            vec![
                Statement::Assignment {
                    identifier: "x".to_string(),
                    expression: Expression::Number("3".to_string()),
                },
                Statement::Output {
                    expression: Expression::Identifier("x".to_string()),
                },
                Statement::Assignment {
                    identifier: "y".to_string(),
                    expression: Expression::Number("07".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse("start print(x end").unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedToken {
                expected: "\")\"".to_string(),
                found: "end".to_string(),
                span: Span::new(14, 17),
            }
        );
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("start x=1 end trailing").unwrap_err();
        assert!(matches!(err, Error::TrailingInput { ref found, .. } if found == "trailing"));
    }

    #[test]
    fn test_missing_end() {
        let err = parse("start x=1").unwrap_err();
        assert_eq!(err, Error::MissingTerminator { span: Span::at(9) });
    }

    #[test]
    fn test_missing_start() {
        let err = parse("x=1 end").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { ref found, .. } if found == "x"));
        assert_eq!(err.to_string(), "Expected \"start\" instead of \"x\".");
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { ref found, .. } if found == END_OF_INPUT));
    }

    #[test]
    fn test_bad_statement() {
        let err = parse("start 5 end").unwrap_err();
        assert_eq!(err.to_string(), "Expected a statement instead of \"5\".");
    }

    #[test]
    fn test_bad_expression() {
        let err = parse("start x = print end").unwrap_err();
        assert_eq!(err.to_string(), "Expected an expression instead of \"print\".");
    }

    #[test]
    fn test_missing_assignment_operator() {
        let err = parse("start x 1 end").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected an assignment operator instead of \"1\"."
        );
    }

    #[test]
    fn test_input_ends_mid_statement() {
        let err = parse("start print(").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { ref found, .. } if found == END_OF_INPUT));
    }
}
