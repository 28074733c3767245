use rvlab_core::config::CacheConfig;
use rvlab_core::sim::{RunOutcome, Simulator};

use super::init_tracing;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            sim: Simulator::new(),
        }
    }

    /// Enables the data cache before the program is loaded.
    pub fn with_cache(mut self, config: &CacheConfig) -> Self {
        self.sim.enable_cache(config).unwrap();
        self
    }

    /// Assembles and loads `source`, panicking on assembly errors.
    pub fn load(mut self, source: &str) -> Self {
        let _ = self.sim.load(source).unwrap();
        self
    }

    /// Runs to completion and asserts the program finished.
    pub fn run(mut self) -> Self {
        let outcome = self.sim.run(Some(100_000)).unwrap();
        assert_eq!(outcome, RunOutcome::Finished);
        self
    }

    /// Read a general-purpose register value.
    pub fn reg(&self, idx: usize) -> i64 {
        self.sim.read_registers()[idx]
    }

    /// Reads `len` bytes of data memory as the program sees them.
    pub fn mem(&self, addr: u64, len: usize) -> Vec<u8> {
        self.sim.read_memory(addr, len).unwrap()
    }
}
