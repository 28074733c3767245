//! Assembler, Cache Configuration and Execution Errors.
//!
//! This module defines the error taxonomy of the toolchain. It provides:
//! 1. **Assembly Errors:** `AssembleError`, a 1-based source line plus an `AsmErrorKind`.
//! 2. **Configuration Errors:** `CacheConfigError` for malformed or inconsistent cache geometry.
//! 3. **Execution Errors:** `SimError` for bounds, alignment and decode failures at run time.
//!
//! All types derive `thiserror::Error` so they compose with `?` and `Box<dyn Error>`.

use thiserror::Error;

use super::data::AccessType;

/// Category of an assembly failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmErrorKind {
    /// A label declaration is empty, contains a forbidden character, or is declared twice.
    #[error("invalid label '{label}': {reason}")]
    InvalidLabel {
        /// Label text as written in the source.
        label: String,
        /// Why the label was rejected.
        reason: &'static str,
    },

    /// The mnemonic is not in the instruction table.
    #[error("unknown instruction '{0}'")]
    UnknownMnemonic(String),

    /// A register operand is neither `x0`..`x31` nor an ABI alias.
    #[error("unknown register '{0}'")]
    UnknownRegister(String),

    /// The instruction has fewer operands than its format requires.
    #[error("missing operand(s) for '{mnemonic}': expected {expected}, found {found}")]
    MissingOperand {
        /// Mnemonic being encoded.
        mnemonic: String,
        /// Operand count required by the format.
        expected: usize,
        /// Operand count present on the line.
        found: usize,
    },

    /// An immediate or branch/jump distance does not fit its field.
    #[error("immediate {value} {detail}")]
    ImmediateRange {
        /// The offending value (bytes for B/J distances).
        value: i64,
        /// Description of the violated constraint.
        detail: String,
    },

    /// A token in immediate position is not a decimal or `0x` hexadecimal number.
    #[error("invalid immediate '{0}'")]
    InvalidImmediate(String),

    /// A branch or jump target names a label that was never declared.
    #[error("label '{0}' not found")]
    UnresolvedLabel(String),

    /// A memory operand is neither `offset(reg)` nor `reg offset reg`.
    #[error("malformed memory operand '{0}': expected 'offset(register)' or 'register offset register'")]
    MalformedMemoryOperand(String),

    /// A directive is unknown, misplaced, or the `.data`/`.text` ordering is wrong.
    #[error("invalid directive: {0}")]
    InvalidDirective(String),

    /// Initialized data does not fit between the data base and the stack top.
    #[error("data segment overflow at {address:#x}")]
    MemoryBounds {
        /// First address that would have been written past the region.
        address: u64,
    },

    /// A growable table reached its hard limit.
    #[error("too many {what} (limit {limit})")]
    CapacityExceeded {
        /// Name of the exhausted table.
        what: &'static str,
        /// The configured limit.
        limit: usize,
    },
}

/// An assembly failure tied to its 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("error at line {line}: {kind}")]
pub struct AssembleError {
    /// 1-based source line number.
    pub line: usize,
    /// What went wrong.
    pub kind: AsmErrorKind,
}

impl AssembleError {
    /// Creates an error for `line`.
    pub const fn new(line: usize, kind: AsmErrorKind) -> Self {
        Self { line, kind }
    }
}

/// A non-fatal assembler diagnostic (e.g. excess trailing tokens).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembleWarning {
    /// 1-based source line number.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

/// Cache configuration parsing and validation failures.
#[derive(Debug, Error)]
pub enum CacheConfigError {
    /// The configuration file could not be read.
    #[error("cannot read cache configuration: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration did not deserialize.
    #[error("malformed JSON cache configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A required line of the five-line format is absent.
    #[error("missing '{0}' in cache configuration")]
    MissingField(&'static str),

    /// A numeric field did not parse.
    #[error("invalid {field} '{value}'")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Raw text.
        value: String,
    },

    /// A size parameter is zero or not a power of two.
    #[error("{field} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: u64,
    },

    /// `cache_size` is not a whole number of `block_size * associativity` sets.
    #[error(
        "cache_size {cache_size} is not divisible into sets of {associativity} x {block_size}-byte blocks"
    )]
    Geometry {
        /// Total capacity in bytes.
        cache_size: u64,
        /// Block size in bytes.
        block_size: u64,
        /// Ways per set.
        associativity: u64,
    },

    /// Block-aligned windows would straddle the data region boundaries.
    #[error("block_size {0} does not divide the data region bounds")]
    BlockTooLarge(u64),

    /// Unrecognized replacement policy token.
    #[error("unknown replacement policy '{0}' (expected LRU, FIFO, LFU or RANDOM)")]
    UnknownReplacementPolicy(String),

    /// Unrecognized write policy token.
    #[error("unknown write policy '{0}' (expected WB or WT)")]
    UnknownWritePolicy(String),
}

/// Execution-time failures reported by `run`, `step` and memory inspection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// A data access falls outside the data region.
    #[error("{access} of {width} byte(s) at {address:#x} is outside the data region")]
    MemoryBounds {
        /// Effective address of the access.
        address: u64,
        /// Access width in bytes.
        width: usize,
        /// Whether the access was a read or a write.
        access: AccessType,
    },

    /// The program counter is not word aligned.
    #[error("instruction address {0:#x} is not word aligned")]
    MisalignedFetch(u64),

    /// The fetched word does not decode to a supported instruction.
    #[error("illegal instruction {word:#010x} at pc {pc:#x}")]
    IllegalInstruction {
        /// Address of the instruction.
        pc: u64,
        /// Raw encoding.
        word: u32,
    },

    /// No program has been loaded.
    #[error("no program loaded")]
    NoProgram,
}
