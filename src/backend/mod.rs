//! Backend module - interpretation and code generation

pub mod codegen;
pub mod interpreter;
pub mod x86;

pub use codegen::Backend;
pub use interpreter::Interpreter;
pub use x86::X86CodeGen;
