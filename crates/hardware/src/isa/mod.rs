//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcodes, function codes, field extraction and decoding logic for
//! the RV64I base integer subset understood by the assembler and the core.
//!
//! # Modules
//!
//! * `rv64i`: Base integer opcodes and function codes.
//! * `instruction`: Field extraction from raw 32-bit words.
//! * `decode`: Immediate reconstruction for every format.
//! * `abi`: Register aliases.
//! * `disasm`: Canonical text rendering of encoded words.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for all RV64I instruction formats.
pub mod decode;

/// Instruction disassembler for trace output and round-trip checks.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (64-bit RISC-V core instructions).
pub mod rv64i;
