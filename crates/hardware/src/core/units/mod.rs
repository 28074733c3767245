//! Execution units and functional components.
//!
//! This module contains the integer ALU and the data cache model that sits
//! between load/store instructions and the data region.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Set-associative data cache with replacement policies.
pub mod cache;
