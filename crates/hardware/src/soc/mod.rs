//! Memory side of the simulated machine.
//!
//! The text region is owned by the loaded program; this module holds the
//! mutable, byte-addressable data region that loads and stores reach either
//! directly or through the data cache.

/// Data region storage and bounds checks.
pub mod memory;

pub use memory::DataMemory;
