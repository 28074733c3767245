//! Simulation statistics collection and reporting.
//!
//! This module tracks what the simulator observed. It provides:
//! 1. **Instruction mix:** Retired instructions by category (ALU, load, store, branch, jump).
//! 2. **Data cache:** Accesses, hits, misses, evictions and memory traffic.
//!
//! Both structures serialize to JSON for machine-readable reports.

use serde::Serialize;

/// Retired-instruction counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Number of instructions retired.
    pub instructions_retired: u64,
    /// Register-register and register-immediate ALU instructions (including `lui`).
    pub inst_alu: u64,
    /// Loads.
    pub inst_load: u64,
    /// Stores.
    pub inst_store: u64,
    /// Conditional branches.
    pub inst_branch: u64,
    /// Conditional branches that were taken.
    pub branches_taken: u64,
    /// `jal` and `jalr`.
    pub inst_jump: u64,
}

/// Data cache counters.
///
/// Every per-block lookup increments `accesses` and exactly one of `hits` or
/// `misses`, so `accesses == hits + misses` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Per-block lookups.
    pub accesses: u64,
    /// Lookups that found the block resident.
    pub hits: u64,
    /// Lookups that had to fill the block.
    pub misses: u64,
    /// Valid lines replaced by a fill.
    pub evictions: u64,
    /// Dirty blocks written back to memory.
    pub writebacks: u64,
    /// Write-through segment writes to memory.
    pub write_throughs: u64,
}

impl CacheStats {
    /// Hit ratio in `0.0..=1.0`, or `0.0` before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["instruction_mix", "cache"];

impl SimStats {
    /// Prints the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"instruction_mix"` or
    /// `"cache"`. The cache section is skipped when `cache` is `None`.
    pub fn print_sections(&self, cache: Option<&CacheStats>, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / instr) * 100.0;

        println!("\n==========================================================");
        println!("RV64I SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_insts                {}", self.instructions_retired);

        if want("instruction_mix") {
            println!("----------------------------------------------------------");
            println!("INSTRUCTION MIX");
            let mix = |label: &str, n: u64| println!("  {label:<23}{n} ({:.2}%)", pct(n));
            mix("op.alu", self.inst_alu);
            mix("op.load", self.inst_load);
            mix("op.store", self.inst_store);
            println!(
                "  op.branch              {} ({:.2}%, {} taken)",
                self.inst_branch,
                pct(self.inst_branch),
                self.branches_taken
            );
            mix("op.jump", self.inst_jump);
        }

        if want("cache")
            && let Some(c) = cache
        {
            println!("----------------------------------------------------------");
            println!("DATA CACHE");
            println!("  accesses               {}", c.accesses);
            println!("  hits                   {}", c.hits);
            println!("  misses                 {}", c.misses);
            println!("  hit_rate               {:.2}%", c.hit_rate() * 100.0);
            println!("  evictions              {}", c.evictions);
            println!("  writebacks             {}", c.writebacks);
            println!("  write_throughs         {}", c.write_throughs);
        }
        println!("==========================================================");
    }
}
