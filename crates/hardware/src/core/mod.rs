//! Core processor implementation.
//!
//! This module contains the CPU state, the single-instruction execution
//! primitive, the execution units it relies on, and the observer hooks used
//! by debugger bookkeeping.

/// CPU core implementation and execution.
pub mod cpu;

/// Retirement, call and return notifications.
pub mod observer;

/// Execution units (ALU, data cache).
pub mod units;

pub use self::cpu::Cpu;
pub use self::observer::{ExecutionObserver, NoopObserver};
