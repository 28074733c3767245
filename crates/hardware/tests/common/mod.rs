//! Shared helpers for the test suite.

/// Simulator harness.
pub mod harness;

use rvlab_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};

/// Builds an unvalidated cache configuration.
pub fn cache_config(
    cache_size: u64,
    block_size: u64,
    associativity: u64,
    replacement_policy: ReplacementPolicy,
    write_policy: WritePolicy,
) -> CacheConfig {
    CacheConfig {
        cache_size,
        block_size,
        associativity,
        replacement_policy,
        write_policy,
    }
}

/// Installs a test-friendly tracing subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("rvlab_core=debug")
        .try_init();
}
