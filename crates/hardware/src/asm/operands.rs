//! Operand parsing for the assembler.
//!
//! Registers, numeric immediates with range checks, and the two memory-operand
//! spellings (`offset(reg)` and `offset reg`) used by loads, stores and `jalr`.

use crate::common::error::AsmErrorKind;
use crate::isa::abi::parse_register;

/// Resolves a register token.
pub fn reg(token: &str) -> Result<u32, AsmErrorKind> {
    parse_register(token)
        .map(|idx| idx as u32)
        .ok_or_else(|| AsmErrorKind::UnknownRegister(token.to_string()))
}

/// Splits a literal into its sign and unsigned magnitude.
///
/// Accepts decimal or `0x` hexadecimal digits after an optional leading sign.
/// A sign after the `0x` prefix is rejected.
fn parse_magnitude(token: &str) -> Option<(bool, u64)> {
    let t = token.trim();
    let (neg, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let (digits, radix) = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (body, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    Some((neg, magnitude))
}

/// Parses a decimal or `0x` hexadecimal literal, optionally negative.
pub fn parse_number(token: &str) -> Option<i64> {
    let (neg, magnitude) = parse_magnitude(token)?;
    if neg {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Parses a data directive value as a 64-bit pattern.
///
/// Non-negative literals cover the whole `u64` range; negative literals down
/// to `i64::MIN` are stored in two's complement.
pub fn parse_data_value(token: &str) -> Option<u64> {
    let (neg, magnitude) = parse_magnitude(token)?;
    if !neg {
        return Some(magnitude);
    }
    (magnitude <= 1u64 << 63).then(|| magnitude.wrapping_neg())
}

/// Parses an immediate token.
pub fn imm(token: &str) -> Result<i64, AsmErrorKind> {
    parse_number(token).ok_or_else(|| AsmErrorKind::InvalidImmediate(token.to_string()))
}

/// Checks that `value` lies in `min..=max`.
pub fn check_range(value: i64, min: i64, max: i64) -> Result<i64, AsmErrorKind> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AsmErrorKind::ImmediateRange {
            value,
            detail: format!("is outside {min}..={max}"),
        })
    }
}

/// Checks that `value` fits a signed field of `bits` bits.
pub fn check_signed(value: i64, bits: u32) -> Result<i64, AsmErrorKind> {
    let max = (1i64 << (bits - 1)) - 1;
    let min = -(1i64 << (bits - 1));
    check_range(value, min, max)
}

/// Checks a branch or jump distance: even and within a signed `bits`-bit field.
pub fn check_offset(value: i64, bits: u32) -> Result<i64, AsmErrorKind> {
    if value % 2 != 0 {
        return Err(AsmErrorKind::ImmediateRange {
            value,
            detail: "is not a multiple of 2".to_string(),
        });
    }
    check_signed(value, bits)
}

/// Splits `offset(reg)` into its parts. An empty offset means zero.
///
/// Returns `None` when the token has no parenthesized base.
pub fn split_mem_operand(token: &str) -> Option<(&str, &str)> {
    let open = token.find('(')?;
    let inner = token[open + 1..].strip_suffix(')')?;
    Some((token[..open].trim(), inner.trim()))
}

/// Resolved base register and offset of a memory operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemOperand {
    /// Base register index.
    pub base: u32,
    /// Signed 12-bit byte offset.
    pub offset: i64,
    /// Number of operand tokens consumed.
    pub consumed: usize,
}

/// Parses the operands that follow the data register of a load, store or `jalr`.
///
/// Accepted spellings of `ops`:
/// * `["8(x2)"]` or `["(x2)"]`: offset and base in one token;
/// * `["x2"]`: a bare base (from an unwrapped `(x2)`), offset zero;
/// * `["8", "x2"]`: offset followed by base;
/// * `["x2", "8"]`: base followed by offset, only when `base_first` is allowed (`jalr`).
pub fn mem_operand(ops: &[&str], base_first: bool) -> Result<MemOperand, AsmErrorKind> {
    let Some(&first) = ops.first() else {
        return Err(AsmErrorKind::MalformedMemoryOperand(String::new()));
    };

    if first.contains('(') {
        let (off, base) = split_mem_operand(first)
            .ok_or_else(|| AsmErrorKind::MalformedMemoryOperand(first.to_string()))?;
        let offset = if off.is_empty() { 0 } else { imm(off)? };
        return Ok(MemOperand {
            base: reg(base)?,
            offset: check_signed(offset, 12)?,
            consumed: 1,
        });
    }

    match ops.get(1) {
        Some(&second) if parse_number(first).is_some() => Ok(MemOperand {
            base: reg(second)?,
            offset: check_signed(imm(first)?, 12)?,
            consumed: 2,
        }),
        Some(&second) if base_first && parse_register(first).is_some() => Ok(MemOperand {
            base: reg(first)?,
            offset: check_signed(imm(second)?, 12)?,
            consumed: 2,
        }),
        // `lw x1, x2, 8` would otherwise drop the offset.
        Some(&second) if parse_number(second).is_some() => {
            Err(AsmErrorKind::MalformedMemoryOperand(ops.join(" ")))
        }
        _ if parse_register(first).is_some() => Ok(MemOperand {
            base: reg(first)?,
            offset: 0,
            consumed: 1,
        }),
        _ => Err(AsmErrorKind::MalformedMemoryOperand(ops.join(" "))),
    }
}
