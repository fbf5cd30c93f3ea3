//! Parse tree printer
//!
//! Renders the nonterminal structure of a parsed program as indented text,
//! for diagnostics. Purely a view; nothing downstream reads it.

use std::fmt::Write;

use crate::frontend::ast::*;

/// Pretty printer for parse trees
pub struct TreePrinter {
    output: String,
    indent: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.output, "{:width$}{}", "", text, width = self.indent * 2);
    }

    fn nested(&mut self, label: &str, body: impl FnOnce(&mut Self)) {
        self.line(label);
        self.indent += 1;
        body(self);
        self.indent -= 1;
    }

    /// Print a program's parse tree to string
    pub fn print_program(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent = 0;

        self.nested("<program>", |p| {
            p.line("start");
            for stmt in &program.statements {
                p.print_statement(stmt);
            }
            p.line("end");
        });

        std::mem::take(&mut self.output)
    }

    fn print_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Assignment {
                identifier,
                expression,
            } => self.nested("<assignment_statement>", |p| {
                p.line(identifier);
                p.line("=");
                p.print_expression(expression);
            }),
            Statement::Output { expression } => self.nested("<output_statement>", |p| {
                p.line("print");
                p.line("(");
                p.print_expression(expression);
                p.line(")");
            }),
        }
    }

    fn print_expression(&mut self, expr: &Expression) {
        let kind = match expr {
            Expression::Identifier(_) => "<identifier>",
            Expression::Number(_) => "<number>",
        };
        self.nested("<expression>", |p| {
            p.nested(kind, |p| p.line(expr.source()));
        });
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn print_tree(program: &Program) -> String {
    let mut printer = TreePrinter::new();
    printer.print_program(program)
}
