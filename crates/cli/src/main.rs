//! RV64I assembler and simulator CLI.
//!
//! This binary provides a single entry point for all modes. It performs:
//! 1. **Assemble:** Translate a source file to a hex listing (one word per line).
//! 2. **Run:** Assemble, optionally enable the data cache, execute to completion and report.
//! 3. **REPL:** Interactive debugger with breakpoints, stepping, memory/register inspection and cache control.

use std::fs;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rvlab_core::asm;
use rvlab_core::common::constants::NUM_REGS;
use rvlab_core::config::CacheConfig;
use rvlab_core::sim::{RunOutcome, Simulator, loader};
use rvlab_core::stats::{CacheStats, SimStats};

#[derive(Parser, Debug)]
#[command(
    name = "rvlab",
    author,
    version,
    about = "RV64I assembler, simulator and data-cache model",
    long_about = "Assemble RV64I source, run it, or debug it interactively.\n\nExamples:\n  rvlab assemble prog.s\n  rvlab run prog.s --cache cache.config --json\n  rvlab repl"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a source file into a hex listing.
    Assemble {
        /// Assembly source file.
        input: PathBuf,

        /// Output listing (defaults to the input with a `.hex` extension).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble and run a program to completion.
    Run {
        /// Assembly source file.
        input: PathBuf,

        /// Cache configuration file (five-line or JSON); enables the data cache.
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Stop after this many instructions.
        #[arg(long)]
        max_steps: Option<u64>,

        /// Print the final state as JSON.
        #[arg(long)]
        json: bool,

        /// Statistics sections to print (instruction_mix, cache); all when omitted.
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// Interactive debugger (default when no subcommand is given).
    Repl,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "starting");

    let result = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Assemble { input, output } => cmd_assemble(&input, output),
        Commands::Run {
            input,
            cache,
            max_steps,
            json,
            stats,
        } => cmd_run(&input, cache.as_deref(), max_steps, json, &stats),
        Commands::Repl => cmd_repl(),
    };

    if let Err(msg) = result {
        eprintln!("[!] {msg}");
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_assemble(input: &Path, output: Option<PathBuf>) -> Result<(), String> {
    let source = loader::read_source(input)
        .map_err(|e| format!("cannot open file '{}': {e}", input.display()))?;
    let program = asm::assemble(&source).map_err(|e| e.to_string())?;
    for warning in &program.warnings {
        eprintln!("warning at line {}: {}", warning.line, warning.message);
    }

    let output = output.unwrap_or_else(|| loader::listing_path(input));
    loader::write_listing(&program, &output)
        .map_err(|e| format!("cannot write '{}': {e}", output.display()))?;
    println!(
        "Assembled {} instructions into {}",
        program.len(),
        output.display()
    );
    Ok(())
}

#[derive(Serialize)]
struct RunReport<'a> {
    outcome: String,
    pc: u64,
    registers: [i64; NUM_REGS],
    stats: &'a SimStats,
    cache: Option<CacheStats>,
}

fn cmd_run(
    input: &Path,
    cache: Option<&Path>,
    max_steps: Option<u64>,
    json: bool,
    sections: &[String],
) -> Result<(), String> {
    let mut sim = Simulator::new();
    let _ = loader::load_file(&mut sim, input)?;

    if let Some(path) = cache {
        let config = CacheConfig::from_file(path).map_err(|e| e.to_string())?;
        sim.enable_cache(&config).map_err(|e| e.to_string())?;
    }

    let outcome = sim
        .run(max_steps)
        .map_err(|e| format!("execution failed at pc {:#x}: {e}", sim.pc()))?;

    if json {
        let report = RunReport {
            outcome: match outcome {
                RunOutcome::Finished => "finished".to_string(),
                RunOutcome::Breakpoint { line } => format!("breakpoint at line {line}"),
                RunOutcome::StepLimit => "step limit".to_string(),
            },
            pc: sim.pc(),
            registers: sim.read_registers(),
            stats: sim.stats(),
            cache: sim.cache_counters(),
        };
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if outcome == RunOutcome::StepLimit {
        println!(
            "Stopped after {} instructions (step limit)",
            sim.stats().instructions_retired
        );
    }
    print_registers(&sim);
    let counters = sim.cache_counters();
    sim.stats().print_sections(counters.as_ref(), sections);
    Ok(())
}

fn cmd_repl() -> Result<(), String> {
    let mut sim = Simulator::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("RISC-V Simulator");
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.map_err(|e| format!("cannot read input: {e}"))?;
        if handle_command(&mut sim, line.trim()).is_break() {
            return Ok(());
        }
    }
}

fn handle_command(sim: &mut Simulator, command: &str) -> ControlFlow<()> {
    let args: Vec<&str> = command
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    let Some((&cmd, rest)) = args.split_first() else {
        return ControlFlow::Continue(());
    };

    match cmd {
        "load" => match rest.first() {
            Some(path) => cmd_load(sim, path),
            None => println!("Usage: load <file>"),
        },
        "run" => cmd_repl_run(sim),
        "step" => cmd_step(sim),
        "regs" => print_registers(sim),
        "mem" => match rest {
            [addr, count, ..] => cmd_mem(sim, addr, count),
            _ => println!("Missing arguments"),
        },
        "break" => match rest.first().map(|s| s.parse::<usize>()) {
            Some(Ok(line)) => {
                if sim.set_breakpoint(line) {
                    println!("Breakpoint set at line {line}");
                } else {
                    println!("Error: line {line} holds no instruction");
                }
            }
            Some(Err(_)) => println!("Error: invalid line number"),
            None => println!("Missing arguments"),
        },
        "del" | "delete" => match rest {
            ["break", line, ..] => match line.parse::<usize>() {
                Ok(line) if sim.clear_breakpoint(line) => {
                    println!("Breakpoint removed from line {line}");
                }
                Ok(line) => println!("No breakpoint found at line {line}"),
                Err(_) => println!("Error: invalid line number"),
            },
            _ => println!("Missing arguments"),
        },
        "show-stack" => print!("{}", sim.call_stack()),
        "stats" => {
            let counters = sim.cache_counters();
            sim.stats().print_sections(counters.as_ref(), &[]);
        }
        "cache_sim" => cmd_cache(sim, rest),
        "exit" => {
            println!("Exiting simulator.");
            return ControlFlow::Break(());
        }
        _ => println!("Unknown command: {command}"),
    }
    ControlFlow::Continue(())
}

fn cmd_load(sim: &mut Simulator, path: &str) {
    match loader::load_file(sim, path) {
        Ok(count) => {
            if let Some(program) = sim.program() {
                for warning in &program.warnings {
                    println!("Warning at line {}: {}", warning.line, warning.message);
                }
            }
            println!("Loaded {count} instructions from {path}.");
        }
        Err(msg) => println!("Error: {msg}"),
    }
}

fn cmd_repl_run(sim: &mut Simulator) {
    println!("Running program...");
    match sim.run(None) {
        Ok(RunOutcome::Finished) => {
            println!("Execution complete");
            if let Some(stats) = sim.cache_counters() {
                print_cache_counters(&stats);
            }
        }
        Ok(RunOutcome::Breakpoint { line }) => {
            println!("Execution stopped at breakpoint on line {line}");
        }
        Ok(RunOutcome::StepLimit) => println!("Execution stopped at step limit"),
        Err(e) => println!("Error at pc {:#x}: {e}", sim.pc()),
    }
}

fn cmd_step(sim: &mut Simulator) {
    match sim.step() {
        Ok(Some(retired)) => {
            let text = sim
                .program()
                .and_then(|p| p.index_of_pc(retired.pc).map(|idx| p.text[idx].clone()))
                .unwrap_or_default();
            println!("Executed instruction: {text} PC = 0x{:016x}", retired.pc);
        }
        Ok(None) => println!("Nothing to step."),
        Err(e) => println!("Error at pc {:#x}: {e}", sim.pc()),
    }
}

fn cmd_mem(sim: &Simulator, addr: &str, count: &str) {
    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let (Ok(address), Ok(count)) = (u64::from_str_radix(digits, 16), count.parse::<usize>()) else {
        println!("Error: usage 'mem <hex address> <count>'");
        return;
    };

    match sim.read_memory(address, count) {
        Ok(bytes) => {
            println!("Memory content from address 0x{address:08x}:");
            for byte in bytes {
                println!("0x{byte:02x}");
            }
        }
        Err(e) => println!("Error: {e}"),
    }
}

fn cmd_cache(sim: &mut Simulator, args: &[&str]) {
    match args {
        ["enable", path, ..] => {
            let result = CacheConfig::from_file(path).and_then(|c| sim.enable_cache(&c));
            match result {
                Ok(()) => println!("Cache simulation enabled."),
                Err(e) => println!("Error: {e}"),
            }
        }
        ["enable"] => println!("Usage: cache_sim enable <file_name>"),
        ["disable", ..] => {
            if let Some(stats) = sim.disable_cache() {
                print_cache_counters(&stats);
            }
            println!("Cache simulation disabled.");
        }
        ["status", ..] => match sim.cache_config() {
            Some(config) => {
                println!("Cache Status: Enabled");
                println!("Cache Size: {} bytes", config.cache_size);
                println!("Block Size: {} bytes", config.block_size);
                println!("Associativity: {}-way", config.associativity);
                println!("Replacement Policy: {}", config.replacement_policy);
                println!("Write-Back Policy: {}", config.write_policy);
            }
            None => println!("Cache Status: Disabled"),
        },
        ["stats", ..] => match sim.cache_counters() {
            Some(stats) => print_cache_counters(&stats),
            None => println!("Cache Status: Disabled"),
        },
        ["invalidate", ..] => match sim.invalidate_cache() {
            Ok(()) => println!("Cache invalidated."),
            Err(e) => println!("Error: {e}"),
        },
        ["dump", rest @ ..] => cmd_cache_dump(sim, rest.first().copied()),
        _ => println!("Usage: cache_sim <enable|disable|status|stats|invalidate|dump> [file_name]"),
    }
}

fn cmd_cache_dump(sim: &Simulator, path: Option<&str>) {
    if !sim.cache_enabled() {
        println!("Cache Status: Disabled");
        return;
    }
    let mut out = String::new();
    for line in sim.cache_dump() {
        let bytes: Vec<String> = line.data.iter().map(|b| format!("{b:02x}")).collect();
        out.push_str(&format!(
            "Set: 0x{:x}, Tag: 0x{:x}, {}, Address: 0x{:x}, Data: {}\n",
            line.set,
            line.tag,
            if line.dirty { "Dirty" } else { "Clean" },
            line.address,
            bytes.join(" ")
        ));
    }
    match path {
        Some(path) => match fs::write(path, &out) {
            Ok(()) => println!("Cache contents written to {path}"),
            Err(e) => println!("Error: cannot write '{path}': {e}"),
        },
        None => print!("{out}"),
    }
}

fn print_registers(sim: &Simulator) {
    println!("Register values:");
    for (i, val) in sim.read_registers().iter().enumerate() {
        println!("x{i}: 0x{:016x}", *val as u64);
    }
}

fn print_cache_counters(stats: &CacheStats) {
    println!(
        "D-cache statistics: Accesses={}, Hit={}, Miss={}, Hit Rate={:.2}",
        stats.accesses,
        stats.hits,
        stats.misses,
        stats.hit_rate()
    );
}
