//! x86-64 Backend - Generate Intel-syntax assembly from the parse tree
//!
//! The output is meant for the system assembler and links against libc's
//! `printf`.

mod x86_codegen;

pub use x86_codegen::{frame_size, X86CodeGen};
