//! Backend trait - the seam shared by every consumer of a parsed program
//!
//! Both the interpreter and the assembly generator walk the same immutable
//! tree and produce text. Each run starts from an empty symbol table.

use crate::frontend::ast::Program;

/// A pass over a finished parse tree
pub trait Backend {
    /// Run the pass and return its text artifact
    fn run(&mut self, program: &Program) -> String;

    /// Get the backend name
    fn name(&self) -> &str;
}
