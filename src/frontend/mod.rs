//! Frontend module - Lexer, Parser, parse tree view

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod tree_printer;
