//! Debugger call stack.
//!
//! `CallStack` follows the call structure of the running program from the
//! engine's observer events. Frames are named after the label at the call
//! target and remember the source line most recently executed in them.

use std::collections::HashMap;
use std::fmt;

use crate::asm::Program;
use crate::common::constants::{INSTRUCTION_SIZE, MAX_CALL_DEPTH, TEXT_START};
use crate::core::observer::ExecutionObserver;

/// Name of the bottom frame.
pub const ENTRY_FRAME: &str = "main";

/// One activation record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Label of the called address, or the address in hex when unlabeled.
    pub label: String,
    /// Source line most recently executed in this frame.
    pub line: usize,
}

/// Call stack tracked from `jal`/`jalr` events.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
    lines: Vec<usize>,
    names: HashMap<u64, String>,
    /// Calls dropped because the stack was full, matched by later returns.
    overflow: usize,
}

impl CallStack {
    /// Creates an empty stack with no program attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `program`, with only the entry frame on the stack.
    pub fn reset(&mut self, program: &Program) {
        self.lines = program.lines.clone();
        self.names = program
            .labels
            .iter()
            // Shared addresses keep the alphabetically smallest name.
            .filter(|&(name, &addr)| program.label_at(addr) == Some(name.as_str()))
            .map(|(name, &addr)| (addr, name.clone()))
            .collect();
        self.overflow = 0;
        self.frames.clear();
        self.frames.push(Frame {
            label: ENTRY_FRAME.to_string(),
            line: self.lines.first().copied().unwrap_or(0),
        });
    }

    /// Empties the stack and detaches the program.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.lines.clear();
        self.names.clear();
        self.overflow = 0;
    }

    /// Pops every frame. Called once the program has run to completion.
    pub fn finish(&mut self) {
        self.frames.clear();
        self.overflow = 0;
    }

    /// Frames from the entry frame (first) to the innermost call (last).
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frames are on the stack.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn line_of(&self, pc: u64) -> Option<usize> {
        let idx = pc.checked_sub(TEXT_START)? / INSTRUCTION_SIZE;
        self.lines.get(idx as usize).copied()
    }
}

impl ExecutionObserver for CallStack {
    fn on_retire(&mut self, pc: u64, _word: u32) {
        let line = self.line_of(pc);
        if let (Some(line), Some(top)) = (line, self.frames.last_mut()) {
            top.line = line;
        }
    }

    fn on_call(&mut self, _call_pc: u64, target_pc: u64) {
        if self.frames.len() >= MAX_CALL_DEPTH {
            self.overflow += 1;
            tracing::warn!(
                depth = self.frames.len(),
                "call stack overflow; frame not recorded"
            );
            return;
        }
        let label = self
            .names
            .get(&target_pc)
            .cloned()
            .unwrap_or_else(|| format!("{target_pc:#x}"));
        let line = self.line_of(target_pc).unwrap_or(0);
        self.frames.push(Frame { label, line });
    }

    fn on_return(&mut self, _target_pc: u64) {
        if self.overflow > 0 {
            self.overflow -= 1;
        } else if self.frames.len() > 1 {
            let _ = self.frames.pop();
        }
    }
}

impl fmt::Display for CallStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Call Stack:")?;
        if self.frames.is_empty() {
            return writeln!(f, "Empty Call Stack: Execution complete");
        }
        for frame in &self.frames {
            writeln!(f, "{}:{}", frame.label, frame.line)?;
        }
        Ok(())
    }
}
