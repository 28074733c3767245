//! # Unit Components
//!
//! Tests organized after the library's module tree.

/// Assembler: encoding, layout, data directives and diagnostics.
pub mod asm;






/// Data region storage.
pub mod soc;
