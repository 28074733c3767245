//! First pass: section layout and label resolution.
//!
//! Walks the source once, assigning every label its byte address, collecting
//! the instruction lines for the encoder, and building the initial data image.
//! Only lines that carry an instruction advance the text address.

use crate::common::constants::{
    DATA_START, INSTRUCTION_SIZE, MAX_INSTRUCTIONS, MAX_LABELS, TEXT_START,
};
use crate::common::error::{AsmErrorKind, AssembleError};

use super::SymbolTable;
use super::data;
use super::lexer::{Line, classify};

/// An instruction line waiting for the second pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingInstruction<'a> {
    /// 1-based source line.
    pub line: usize,
    /// Instruction text without label or comment.
    pub text: &'a str,
}

/// Result of the first pass.
#[derive(Debug, Default)]
pub struct Layout<'a> {
    /// Label name to byte address.
    pub labels: SymbolTable,
    /// Instructions in program order.
    pub instructions: Vec<PendingInstruction<'a>>,
    /// Initial contents of the data region.
    pub data: Vec<u8>,
}

#[derive(Clone, Copy, Debug)]
enum Body<'a> {
    Directive(&'a str),
    Instruction(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Implicit,
    Data,
    Text,
}

/// Runs the first pass over `source`.
///
/// # Errors
///
/// Returns the first `AssembleError` found: invalid or duplicate labels,
/// misplaced section directives, bad data directives, or exceeded capacities.
pub fn layout(source: &str) -> Result<Layout<'_>, AssembleError> {
    let mut out = Layout::default();
    let mut section = Section::Implicit;
    let mut saw_text = false;
    let mut data_line = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let fail = |kind| AssembleError::new(line_no, kind);

        let (label, body) = match classify(raw).map_err(fail)? {
            Line::Blank => continue,
            Line::Label(name) => (Some(name), None),
            Line::Directive { label, text } => (label, Some(Body::Directive(text))),
            Line::Instruction { label, text } => (label, Some(Body::Instruction(text))),
        };

        if let Some(name) = label {
            let address = match section {
                Section::Data => DATA_START + out.data.len() as u64,
                Section::Implicit | Section::Text => {
                    TEXT_START + out.instructions.len() as u64 * INSTRUCTION_SIZE
                }
            };
            define(&mut out.labels, name, address).map_err(fail)?;
        }

        match body {
            None => {}
            Some(Body::Directive(directive)) => {
                let name = directive.split_whitespace().next().unwrap_or(directive);
                match name {
                    ".data" => {
                        if saw_text {
                            return Err(fail(AsmErrorKind::InvalidDirective(
                                ".data must precede .text".to_string(),
                            )));
                        }
                        if data_line != 0 {
                            return Err(fail(AsmErrorKind::InvalidDirective(
                                "duplicate .data section".to_string(),
                            )));
                        }
                        data_line = line_no;
                        section = Section::Data;
                    }
                    ".text" => {
                        saw_text = true;
                        section = Section::Text;
                    }
                    _ if section == Section::Data => {
                        data::emit(directive, &mut out.data).map_err(fail)?
                    }
                    _ => tracing::debug!(line = line_no, directive = name, "ignoring directive"),
                }
            }
            Some(Body::Instruction(text)) => {
                if section == Section::Data {
                    return Err(fail(AsmErrorKind::InvalidDirective(
                        "instructions must follow .text".to_string(),
                    )));
                }
                if out.instructions.len() >= MAX_INSTRUCTIONS {
                    return Err(fail(AsmErrorKind::CapacityExceeded {
                        what: "instructions",
                        limit: MAX_INSTRUCTIONS,
                    }));
                }
                out.instructions.push(PendingInstruction {
                    line: line_no,
                    text,
                });
            }
        }
    }

    if data_line != 0 && !saw_text {
        return Err(AssembleError::new(
            data_line,
            AsmErrorKind::InvalidDirective(".data section without a .text section".to_string()),
        ));
    }

    Ok(out)
}

fn define(labels: &mut SymbolTable, name: &str, address: u64) -> Result<(), AsmErrorKind> {
    if labels.contains_key(name) {
        return Err(AsmErrorKind::InvalidLabel {
            label: name.to_string(),
            reason: "label is already defined",
        });
    }
    if labels.len() >= MAX_LABELS {
        return Err(AsmErrorKind::CapacityExceeded {
            what: "labels",
            limit: MAX_LABELS,
        });
    }
    let _ = labels.insert(name.to_string(), address);
    Ok(())
}
