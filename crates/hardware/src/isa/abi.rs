//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Defines the standard ABI aliases for `x0`-`x31` and the register-operand
//! parser shared by the assembler and the CLI.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;

/// ABI names for x0-x31.
pub const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

static ALIASES: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    let mut map: HashMap<&'static str, usize> = REG_NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| (name, i))
        .collect();
    // s0 doubles as the frame pointer.
    let _ = map.insert("fp", 8);
    map
});

/// Resolves a register operand to its index.
///
/// Accepts `x0`..`x31` and every ABI alias (including `fp`). Returns `None`
/// for anything else.
pub fn parse_register(token: &str) -> Option<usize> {
    if let Some(num) = token.strip_prefix('x')
        && !num.is_empty()
        && num.bytes().all(|b| b.is_ascii_digit())
    {
        return num.parse::<usize>().ok().filter(|&idx| idx < 32);
    }
    ALIASES.get(token).copied()
}
