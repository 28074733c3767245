//! Simulation facade and debugger support.
//!
//! Provides the `Simulator` aggregate that owns the CPU and the loaded
//! program, the call stack it maintains as an execution observer, and the
//! file helpers used by front ends.

/// Call stack observer.
pub mod callstack;
/// Source and listing file helpers.
pub mod loader;
/// Simulator facade.
pub mod simulator;

pub use self::callstack::{CallStack, Frame};
pub use self::simulator::{RunOutcome, Simulator};
