//! RV64I assembler and instruction-set simulator library.
//!
//! This crate implements a small RISC-V toolchain with the following:
//! 1. **Assembler:** Two-pass translation of mnemonic source (with `.data`/`.text` sections) to 32-bit words.
//! 2. **Core:** Fetch/decode/execute of the RV64I base subset over a register file and data region.
//! 3. **Cache:** A configurable set-associative data cache (LRU/FIFO/LFU/RANDOM, write-back or write-through).
//! 4. **ISA:** Opcodes, field extraction, immediate decoding, ABI names and a disassembler.
//! 5. **Simulation:** A `Simulator` facade with breakpoints, a call stack and statistics.
//!
//! # Examples
//!
//! ```
//! use rvlab_core::{RunOutcome, Simulator};
//!
//! let mut sim = Simulator::new();
//! let count = sim.load(".data\n.word 5\n.text\nlui x2, 16\nlw x1, 0(x2)\n").unwrap();
//! assert_eq!(count, 2);
//! assert_eq!(sim.run(None).unwrap(), RunOutcome::Finished);
//! assert_eq!(sim.read_registers()[1], 5);
//! ```

/// Two-pass assembler (layout, encoding, data directives).
pub mod asm;
/// Common types and constants (memory map, access widths, errors, registers).
pub mod common;
/// Cache configuration (defaults, policies, parsing, validation).
pub mod config;
/// CPU core (state, execution, ALU, data cache, observer hooks).
pub mod core;
/// Instruction set (opcodes, decode, ABI, disassembly).
pub mod isa;
/// Simulator facade, call stack and file helpers.
pub mod sim;
/// Data region storage.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Assembles source text into a loadable program.
pub use crate::asm::{Program, assemble};
/// Cache configuration; use `CacheConfig::default()` or parse it from text/JSON.
pub use crate::config::CacheConfig;
/// Main CPU type; holds registers, data memory, the optional cache and stats.
pub use crate::core::Cpu;
/// Top-level simulator and the result of `run`.
pub use crate::sim::{RunOutcome, Simulator};
