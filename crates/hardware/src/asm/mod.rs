//! Two-pass RV64I assembler.
//!
//! This module turns assembly source into a loadable [`Program`]. It performs:
//! 1. **Layout (pass 1):** Section handling, label resolution and the data image (`labels`, `data`).
//! 2. **Encoding (pass 2):** Per-format translation of each instruction line (`encoder`, `operands`).
//!
//! Both passes classify lines with the same `lexer`, so label addresses and
//! instruction slots always agree. Any error aborts the whole assembly.
//!
//! # Examples
//!
//! ```
//! use rvlab_core::asm::assemble;
//!
//! let program = assemble("addi x5, x0, 10\nadd x1, x2, x3\n").unwrap();
//! assert_eq!(program.hex_listing(), "00a00293\n003100b3\n");
//! ```

/// `.data` directive handling.
pub mod data;
/// Mnemonic table and bit packing.
pub mod encoder;
/// First pass.
pub mod labels;
/// Line classification and tokenization.
pub mod lexer;
/// Register, immediate and memory operand parsing.
pub mod operands;

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::common::constants::{INSTRUCTION_SIZE, TEXT_START};
use crate::common::error::{AssembleError, AssembleWarning};

/// Label name to resolved byte address.
pub type SymbolTable = HashMap<String, u64>;

/// An assembled program ready to be loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Encoded instructions in program order, starting at `TEXT_START`.
    pub words: Vec<u32>,
    /// 1-based source line of each instruction.
    pub lines: Vec<usize>,
    /// Source text of each instruction (label and comment removed).
    pub text: Vec<String>,
    /// Initial data image, placed at `DATA_START`.
    pub data: Vec<u8>,
    /// Resolved labels.
    pub labels: SymbolTable,
    /// Non-fatal diagnostics.
    pub warnings: Vec<AssembleWarning>,
}

impl Program {
    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Address one past the last instruction.
    pub fn text_end(&self) -> u64 {
        TEXT_START + self.words.len() as u64 * INSTRUCTION_SIZE
    }

    /// Index of the instruction at `pc`, if `pc` addresses one.
    pub fn index_of_pc(&self, pc: u64) -> Option<usize> {
        let offset = pc.checked_sub(TEXT_START)?;
        if offset % INSTRUCTION_SIZE != 0 {
            return None;
        }
        let idx = (offset / INSTRUCTION_SIZE) as usize;
        (idx < self.words.len()).then_some(idx)
    }

    /// Source line of the instruction at `pc`.
    pub fn line_at(&self, pc: u64) -> Option<usize> {
        self.index_of_pc(pc).map(|idx| self.lines[idx])
    }

    /// Whether `line` holds an instruction.
    pub fn has_instruction_on(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    /// A text label bound to `address`, if any. Ties resolve alphabetically.
    pub fn label_at(&self, address: u64) -> Option<&str> {
        self.labels
            .iter()
            .filter(|&(_, &addr)| addr == address)
            .map(|(name, _)| name.as_str())
            .min()
    }

    /// Lowercase 8-digit hex words, one per line.
    pub fn hex_listing(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 9);
        for word in &self.words {
            let _ = writeln!(out, "{word:08x}");
        }
        out
    }
}

/// Assembles `source` into a [`Program`].
///
/// # Errors
///
/// Returns the first [`AssembleError`], tagged with its 1-based line. No partial
/// program is produced.
pub fn assemble(source: &str) -> Result<Program, AssembleError> {
    let layout = labels::layout(source)?;
    let mut program = Program {
        data: layout.data,
        ..Program::default()
    };

    for (idx, pending) in layout.instructions.iter().enumerate() {
        let pc = TEXT_START + idx as u64 * INSTRUCTION_SIZE;
        let (mnemonic, ops) = lexer::tokenize(pending.text);
        let encoded = encoder::encode(mnemonic, &ops, pc, &layout.labels)
            .map_err(|kind| AssembleError::new(pending.line, kind))?;

        if encoded.consumed < ops.len() {
            let message = format!(
                "excess tokens ignored: {}",
                ops[encoded.consumed..].join(" ")
            );
            tracing::warn!(line = pending.line, "{message}");
            program.warnings.push(AssembleWarning {
                line: pending.line,
                message,
            });
        }

        program.words.push(encoded.word);
        program.lines.push(pending.line);
        program.text.push(pending.text.to_string());
    }

    program.labels = layout.labels;
    tracing::debug!(
        instructions = program.words.len(),
        data_bytes = program.data.len(),
        labels = program.labels.len(),
        "assembled program"
    );
    Ok(program)
}
