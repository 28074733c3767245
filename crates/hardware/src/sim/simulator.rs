//! Simulator: owns the CPU, the loaded program and the debugger state side-by-side.
//!
//! Keeping the call stack next to the CPU, rather than inside it, lets the
//! engine borrow it as its observer while the CPU itself is borrowed mutably.

use std::collections::BTreeSet;

use crate::asm::{self, Program};
use crate::common::constants::{DATA_SIZE, DATA_START, NUM_REGS};
use crate::common::error::{AsmErrorKind, AssembleError, CacheConfigError, SimError};
use crate::config::CacheConfig;
use crate::core::Cpu;
use crate::core::cpu::Retired;
use crate::core::units::cache::LineSnapshot;
use crate::sim::callstack::CallStack;
use crate::stats::{CacheStats, SimStats};

/// Why `run` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program counter left the loaded program.
    Finished,
    /// A breakpoint is set on the line about to execute.
    Breakpoint {
        /// 1-based source line of the breakpoint.
        line: usize,
    },
    /// The step limit was reached.
    StepLimit,
}

/// Top-level simulator: CPU state, program and debugger bookkeeping.
#[derive(Debug, Default)]
pub struct Simulator {
    cpu: Cpu,
    program: Option<Program>,
    breakpoints: BTreeSet<usize>,
    call_stack: CallStack,
    /// Breakpoint address that `run` stopped at and should step over when resumed.
    resume_pc: Option<u64>,
}

impl Simulator {
    /// Creates a simulator with no program loaded and the cache disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles `source` and installs it, resetting registers, memory,
    /// statistics, breakpoints and the call stack.
    ///
    /// Returns the number of instructions loaded. An enabled cache stays
    /// enabled with the same configuration but starts empty.
    ///
    /// # Errors
    ///
    /// Returns the first assembly error. The simulator is then left reset
    /// with no program loaded.
    pub fn load(&mut self, source: &str) -> Result<usize, AssembleError> {
        self.breakpoints.clear();
        self.resume_pc = None;
        let program = match asm::assemble(source) {
            Ok(program) => program,
            Err(err) => {
                self.unload();
                return Err(err);
            }
        };

        if let Err(err) = self.cpu.load_program(&program.words, &program.data) {
            // Unreachable in practice: layout caps the image at the region size.
            tracing::warn!(%err, "program image rejected by memory");
            self.unload();
            return Err(AssembleError::new(
                0,
                AsmErrorKind::MemoryBounds {
                    address: DATA_START + DATA_SIZE as u64,
                },
            ));
        }

        self.call_stack.reset(&program);
        let count = program.len();
        tracing::debug!(instructions = count, "program loaded");
        self.program = Some(program);
        Ok(count)
    }

    fn unload(&mut self) {
        self.program = None;
        self.call_stack.clear();
        let _ = self.cpu.load_program(&[], &[]);
    }

    /// Runs until the program finishes, a breakpoint is hit, or `step_limit`
    /// instructions have executed.
    ///
    /// When resumed after a breakpoint stop, the instruction under that
    /// breakpoint executes instead of stopping again.
    ///
    /// # Errors
    ///
    /// `SimError::NoProgram` if nothing is loaded, or the execution error of
    /// the failing instruction (state is left as it was before it).
    pub fn run(&mut self, step_limit: Option<u64>) -> Result<RunOutcome, SimError> {
        let program = self.program.as_ref().ok_or(SimError::NoProgram)?;
        let mut executed: u64 = 0;

        loop {
            let pc = self.cpu.pc;
            let Some(line) = program.line_at(pc) else {
                self.call_stack.finish();
                tracing::debug!(executed, "run finished");
                return Ok(RunOutcome::Finished);
            };

            if self.breakpoints.contains(&line) && self.resume_pc != Some(pc) {
                self.resume_pc = Some(pc);
                tracing::debug!(line, "breakpoint hit");
                return Ok(RunOutcome::Breakpoint { line });
            }
            if step_limit.is_some_and(|limit| executed >= limit) {
                return Ok(RunOutcome::StepLimit);
            }

            self.resume_pc = None;
            if self.cpu.step(&mut self.call_stack)?.is_none() {
                self.call_stack.finish();
                return Ok(RunOutcome::Finished);
            }
            executed += 1;
        }
    }

    /// Executes exactly one instruction.
    ///
    /// Returns `Ok(None)` when the pc does not address a loaded instruction
    /// (nothing to step).
    ///
    /// # Errors
    ///
    /// `SimError::NoProgram` if nothing is loaded, or the execution error of the instruction.
    pub fn step(&mut self) -> Result<Option<Retired>, SimError> {
        let program = self.program.as_ref().ok_or(SimError::NoProgram)?;
        if program.index_of_pc(self.cpu.pc).is_none() {
            return Ok(None);
        }
        self.resume_pc = None;
        let retired = self.cpu.step(&mut self.call_stack)?;
        if program.index_of_pc(self.cpu.pc).is_none() {
            self.call_stack.finish();
        }
        Ok(retired)
    }

    /// All registers as signed values, `x0` first.
    pub fn read_registers(&self) -> [i64; NUM_REGS] {
        self.cpu.regs.snapshot()
    }

    /// Reads `count` bytes starting at `address`, as the program currently sees them.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryBounds` if the range leaves the data region.
    pub fn read_memory(&self, address: u64, count: usize) -> Result<Vec<u8>, SimError> {
        self.cpu.inspect(address, count)
    }

    /// Sets a breakpoint on a 1-based source line.
    ///
    /// Returns false (and sets nothing) if the line holds no instruction.
    pub fn set_breakpoint(&mut self, line: usize) -> bool {
        let valid = self
            .program
            .as_ref()
            .is_some_and(|p| p.has_instruction_on(line));
        if valid {
            let _ = self.breakpoints.insert(line);
        }
        valid
    }

    /// Removes a breakpoint. Returns false if none was set on `line`.
    pub fn clear_breakpoint(&mut self, line: usize) -> bool {
        self.breakpoints.remove(&line)
    }

    /// Lines with a breakpoint, ascending.
    pub fn breakpoints(&self) -> impl Iterator<Item = usize> + '_ {
        self.breakpoints.iter().copied()
    }

    /// Enables the data cache, replacing any cache already enabled.
    ///
    /// # Errors
    ///
    /// `CacheConfigError` if the configuration is invalid.
    pub fn enable_cache(&mut self, config: &CacheConfig) -> Result<(), CacheConfigError> {
        self.cpu.enable_cache(config)
    }

    /// Flushes dirty lines to memory and disables the cache.
    ///
    /// Returns the final counters of the removed cache, if one was enabled.
    pub fn disable_cache(&mut self) -> Option<CacheStats> {
        self.cpu.disable_cache().map(|cache| *cache.stats())
    }

    /// Whether the data cache is enabled.
    pub fn cache_enabled(&self) -> bool {
        self.cpu.cache.is_some()
    }

    /// `(accesses, hits, misses)`, or zeros while the cache is disabled.
    pub fn cache_stats(&self) -> (u64, u64, u64) {
        self.cpu.cache.as_ref().map_or((0, 0, 0), |c| {
            let s = c.stats();
            (s.accesses, s.hits, s.misses)
        })
    }

    /// Full cache counters, if the cache is enabled.
    pub fn cache_counters(&self) -> Option<CacheStats> {
        self.cpu.cache.as_ref().map(|c| *c.stats())
    }

    /// Active cache configuration, if the cache is enabled.
    pub fn cache_config(&self) -> Option<CacheConfig> {
        self.cpu.cache.as_ref().map(|c| *c.config())
    }

    /// Snapshots of every valid cache line; empty while the cache is disabled.
    pub fn cache_dump(&self) -> Vec<LineSnapshot> {
        match &self.cpu.cache {
            Some(cache) => cache.dump(),
            None => Vec::new(),
        }
    }

    /// Writes back dirty lines and invalidates the cache. No-op while disabled.
    ///
    /// # Errors
    ///
    /// Propagates memory errors from the writebacks.
    pub fn invalidate_cache(&mut self) -> Result<(), SimError> {
        self.cpu.invalidate_cache()
    }

    /// Current program counter.
    pub fn pc(&self) -> u64 {
        self.cpu.pc
    }

    /// Debugger call stack.
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Retired-instruction statistics since the last load.
    pub fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// The loaded program, if any.
    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }
}
