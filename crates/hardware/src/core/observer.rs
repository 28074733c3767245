//! Execution observer hooks.
//!
//! The engine reports every retired instruction, and classifies control
//! transfers so that tools can follow the call structure of a program:
//! `jal`/`jalr` writing a link register (`rd != x0`) is a call, and `jalr`
//! with `rd == x0` is a return.

/// Receives notifications from the execution engine. All hooks default to no-ops.
pub trait ExecutionObserver {
    /// An instruction at `pc` with encoding `word` has retired.
    fn on_retire(&mut self, pc: u64, word: u32) {
        let _ = (pc, word);
    }

    /// A call from `call_pc` to `target_pc` has retired.
    fn on_call(&mut self, call_pc: u64, target_pc: u64) {
        let _ = (call_pc, target_pc);
    }

    /// A return to `target_pc` has retired.
    fn on_return(&mut self, target_pc: u64) {
        let _ = target_pc;
    }
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ExecutionObserver for NoopObserver {}
