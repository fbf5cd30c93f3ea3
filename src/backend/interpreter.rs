//! Tree-walking interpreter
//!
//! Runs statements strictly left to right against a fresh value table.
//! Identifiers that were never assigned read as 0.

use std::collections::HashMap;

use log::debug;

use crate::backend::codegen::Backend;
use crate::frontend::ast::*;

/// The single numeric type of the language, as wide as a compiled stack slot
pub type Value = i32;

/// Interpreter for parsed programs
#[derive(Debug, Default)]
pub struct Interpreter {
    values: HashMap<String, Value>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret a program, returning everything it printed
    pub fn interpret(&mut self, program: &Program) -> String {
        self.values.clear();
        let mut output = String::new();
        for stmt in &program.statements {
            if let Some(fragment) = self.exec_statement(stmt) {
                output.push_str(&fragment);
            }
        }
        debug!(
            "interpreted {} statements, {} bindings",
            program.statements.len(),
            self.values.len()
        );
        output
    }

    fn exec_statement(&mut self, stmt: &Statement) -> Option<String> {
        match stmt {
            Statement::Assignment {
                identifier,
                expression,
            } => {
                let value = self.eval(expression);
                self.values.insert(identifier.clone(), value);
                None
            }
            Statement::Output { expression } => Some(format!("{}\n", self.eval(expression))),
        }
    }

    fn eval(&self, expr: &Expression) -> Value {
        match expr {
            Expression::Identifier(name) => self.values.get(name).copied().unwrap_or(0),
            Expression::Number(text) => parse_number(text),
        }
    }

    /// Current value of a variable, if it has been assigned
    pub fn value_of(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }
}

/// Read an all-digit literal, wrapping modulo 2^32 like a 32-bit register.
pub fn parse_number(text: &str) -> Value {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |acc, b| acc.wrapping_mul(10).wrapping_add(u32::from(b - b'0')))
        as Value
}

impl Backend for Interpreter {
    fn run(&mut self, program: &Program) -> String {
        self.interpret(program)
    }

    fn name(&self) -> &str {
        "interpreter"
    }
}
