//! Global Memory-Map and Capacity Constants.
//!
//! This module defines the fixed layout of the simulated address space and the
//! capacity limits of the assembler and debugger tables. It includes:
//! 1. **Memory Map:** Text, data and stack base addresses.
//! 2. **Instruction Constants:** Instruction width and word alignment.
//! 3. **Capacity Limits:** Upper bounds for labels, instructions and call depth.

/// Base address of the text (instruction) region.
pub const TEXT_START: u64 = 0x0;

/// Base address of the data region.
///
/// The text region occupies `TEXT_START..DATA_START`.
pub const DATA_START: u64 = 0x1_0000;

/// Initial stack pointer and upper bound (exclusive) of the data region.
///
/// The stack grows downward into the top of the data region.
pub const STACK_START: u64 = 0x5_0000;

/// Size of the data region in bytes.
pub const DATA_SIZE: usize = (STACK_START - DATA_START) as usize;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Maximum number of instructions that fit in the text region.
pub const MAX_INSTRUCTIONS: usize = (DATA_START / INSTRUCTION_SIZE) as usize;

/// Maximum number of labels in one program.
pub const MAX_LABELS: usize = 1024;

/// Maximum depth of the debugger call stack.
pub const MAX_CALL_DEPTH: usize = 1024;
