//! x86-64 Code Generator
//!
//! Emits one `main` function. Every variable lives in a 4-byte stack slot
//! below `rbp`, handed out in order of first assignment.

use std::collections::HashMap;
use std::fmt::Write;

use log::debug;

use crate::backend::codegen::Backend;
use crate::backend::interpreter::parse_number;
use crate::frontend::ast::*;

/// Bytes per variable slot
const SLOT_SIZE: usize = 4;
/// Stack alignment required at call sites
const FRAME_ALIGN: usize = 16;

/// Frame size needed for `program`: one slot per distinct assigned
/// identifier, rounded up to the call alignment, and never below one
/// alignment unit.
pub fn frame_size(program: &Program) -> usize {
    let needed = SLOT_SIZE * program.assigned_identifiers().len();
    needed.div_ceil(FRAME_ALIGN).max(1) * FRAME_ALIGN
}

/// Assembly code generator
#[derive(Debug, Default)]
pub struct X86CodeGen {
    output: String,
    /// Identifier -> offset below rbp
    addresses: HashMap<String, usize>,
}

impl X86CodeGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the full assembly listing for a program
    pub fn generate(&mut self, program: &Program) -> String {
        self.output.clear();
        self.addresses.clear();

        let frame = frame_size(program);
        self.emit_prologue(frame);
        for stmt in &program.statements {
            self.emit_statement(stmt);
        }
        self.emit_epilogue();

        debug!(
            "generated {} bytes of assembly, frame {} bytes, {} slots",
            self.output.len(),
            frame,
            self.addresses.len()
        );
        std::mem::take(&mut self.output)
    }

    /// Stack offset assigned to `name`, if it has been stored to
    pub fn address_of(&self, name: &str) -> Option<usize> {
        self.addresses.get(name).copied()
    }

    fn emit_prologue(&mut self, frame: usize) {
        self.output.push_str(concat!(
            "    .intel_syntax noprefix\n",
            "    .section .rodata\n",
            ".LC0:\n",
            "    .string \"%d\\n\"\n",
            "    .text\n",
            "    .globl main\n",
            "    .type main, @function\n",
            "main:\n",
            "# prologue\n",
            "    push rbp\n",
            "    mov rbp, rsp\n",
        ));
        let _ = write!(self.output, "    sub rsp, {}", frame);
    }

    fn emit_epilogue(&mut self) {
        self.output
            .push_str("\n# epilogue\n    mov eax, 0\n    leave\n    ret\n");
        self.output
            .push_str("    .section .note.GNU-stack,\"\",@progbits\n");
    }

    fn emit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Assignment {
                identifier,
                expression,
            } => {
                let address = self.allocate(identifier);
                let operand = self.operand(expression);
                let _ = write!(
                    self.output,
                    "\n# {} = {}\n    mov eax, {}\n    mov DWORD PTR [rbp-{}], eax",
                    identifier,
                    expression.source(),
                    operand,
                    address
                );
            }
            Statement::Output { expression } => {
                let operand = self.operand(expression);
                let _ = write!(
                    self.output,
                    "\n# print({})\n    mov esi, {}\n    mov edi, OFFSET FLAT:.LC0\n    mov eax, 0\n    call    printf",
                    expression.source(),
                    operand
                );
            }
        }
    }

    fn allocate(&mut self, identifier: &str) -> usize {
        if let Some(address) = self.addresses.get(identifier) {
            return *address;
        }
        let address = SLOT_SIZE * (self.addresses.len() + 1);
        self.addresses.insert(identifier.to_string(), address);
        address
    }

    fn operand(&self, expr: &Expression) -> String {
        match expr {
            Expression::Identifier(name) => match self.addresses.get(name) {
                Some(address) => format!("DWORD PTR [rbp-{}]", address),
                None => "0".to_string(),
            },
            Expression::Number(text) => number_operand(text),
        }
    }
}

/// Literal text as written, unless the assembler would read it differently
/// from the interpreter (leading zeros are octal to `as`, and out-of-range
/// values are rejected); then the wrapped decimal value.
fn number_operand(text: &str) -> String {
    let value = parse_number(text);
    if value.to_string() == text {
        text.to_string()
    } else {
        value.to_string()
    }
}

impl Backend for X86CodeGen {
    fn run(&mut self, program: &Program) -> String {
        self.generate(program)
    }

    fn name(&self) -> &str {
        "x86_64"
    }
}
