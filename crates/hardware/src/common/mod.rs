//! Common types and constants shared by the assembler, the core and the cache model.
//!
//! It includes:
//! 1. **Constants:** Memory map and capacity limits.
//! 2. **Memory Access:** Access kinds and load/store widths.
//! 3. **Error Handling:** Assembly, configuration and execution error types.
//! 4. **Register Management:** The integer register file.

/// Memory map and capacity constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::{AccessType, MemWidth};
pub use error::{AsmErrorKind, AssembleError, AssembleWarning, CacheConfigError, SimError};
pub use reg::RegisterFile;
