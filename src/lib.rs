//! startlang
//!
//! Front end and two back ends for a tiny imperative language:
//!
//! ```text
//! start
//!   x = 3      /* assignment */
//!   print(x)
//! end
//! ```
//!
//! The pipeline is four independent stages: [`analyze`] turns source text
//! into lexemes, [`parse`] builds a [`Program`] from a lexeme stream, and
//! [`interpret`] and [`compile`] each walk the finished tree.

pub mod backend;
pub mod feedback;
pub mod frontend;
pub mod utils;

pub use backend::{Backend, Interpreter, X86CodeGen};
pub use frontend::ast::{Expression, Program, Statement};
pub use frontend::lexer::{LexMode, LexemeStream, Lexer};
pub use frontend::token::{Lexeme, TokenKind};
pub use utils::{Error, Result, Span};

/// Lex `source` with the token table
pub fn analyze(source: &str) -> Result<Vec<Lexeme>> {
    Lexer::default().analyze(source)
}

/// Parse one program from `stream`, which must hold nothing after `end`
pub fn parse(stream: &mut LexemeStream) -> Result<Program> {
    frontend::parser::Parser::new(stream).parse_program()
}

/// Run `program` and collect what it prints
pub fn interpret(program: &Program) -> String {
    Interpreter::new().interpret(program)
}

/// Translate `program` to x86-64 assembly
pub fn compile(program: &Program) -> String {
    X86CodeGen::new().generate(program)
}

/// Lex and parse in one go
pub fn parse_source(source: &str) -> Result<Program> {
    let mut stream = LexemeStream::new(analyze(source)?);
    parse(&mut stream)
}
