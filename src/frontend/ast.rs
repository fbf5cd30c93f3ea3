//! Abstract Syntax Tree definitions for startlang
//!
//! ```text
//! program    ::= 'start' statement* 'end'
//! statement  ::= assignment | output
//! assignment ::= identifier '=' expression
//! output     ::= 'print' '(' expression ')'
//! expression ::= identifier | number
//! ```

use serde::{Deserialize, Serialize};

/// A complete program
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `identifier = expression`
    Assignment {
        identifier: String,
        expression: Expression,
    },
    /// `print(expression)`
    Output { expression: Expression },
}

/// Expressions
///
/// Number literals keep their source text; the backends decide how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(String),
    Number(String),
}

impl Expression {
    /// The source text this expression was parsed from
    pub fn source(&self) -> &str {
        match self {
            Expression::Identifier(text) | Expression::Number(text) => text,
        }
    }
}

impl Program {
    /// Distinct identifiers assigned anywhere in the program, in order of first assignment
    pub fn assigned_identifiers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for stmt in &self.statements {
            if let Statement::Assignment { identifier, .. } = stmt {
                if !seen.contains(&identifier.as_str()) {
                    seen.push(identifier);
                }
            }
        }
        seen
    }
}
