//! `.data` section directives.
//!
//! Builds the initial data image laid out contiguously from `DATA_START`.
//! Values are stored little-endian and truncated to the directive width.

use crate::common::constants::{DATA_SIZE, DATA_START};
use crate::common::error::AsmErrorKind;

use super::operands::parse_data_value;

/// Width of a data directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataDirective {
    /// `.byte`: 1 byte per value.
    Byte,
    /// `.half`: 2 bytes per value.
    Half,
    /// `.word`: 4 bytes per value.
    Word,
    /// `.dword`: 8 bytes per value.
    Dword,
}

impl DataDirective {
    /// Looks up a directive by name (including the leading dot).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ".byte" => Some(Self::Byte),
            ".half" => Some(Self::Half),
            ".word" => Some(Self::Word),
            ".dword" => Some(Self::Dword),
            _ => None,
        }
    }

    /// Bytes emitted per value.
    pub const fn width(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Dword => 8,
        }
    }
}

/// Appends the values of one data directive line to `image`.
///
/// `text` is the directive with its name, e.g. `.word 5, 0x10`.
///
/// # Errors
///
/// * `InvalidDirective` for an unknown directive or a directive without values.
/// * `InvalidImmediate` for a malformed value.
/// * `MemoryBounds` when the image would grow past the data region.
pub fn emit(text: &str, image: &mut Vec<u8>) -> Result<(), AsmErrorKind> {
    let (name, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let directive = DataDirective::from_name(name).ok_or_else(|| {
        AsmErrorKind::InvalidDirective(format!("'{name}' is not allowed in .data"))
    })?;

    let mut count = 0usize;
    for token in rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let value = parse_data_value(token)
            .ok_or_else(|| AsmErrorKind::InvalidImmediate(token.to_string()))?;
        let width = directive.width();
        if image.len() + width > DATA_SIZE {
            return Err(AsmErrorKind::MemoryBounds {
                address: DATA_START + image.len() as u64,
            });
        }
        image.extend_from_slice(&value.to_le_bytes()[..width]);
        count += 1;
    }

    if count == 0 {
        return Err(AsmErrorKind::InvalidDirective(format!(
            "'{name}' needs at least one value"
        )));
    }
    Ok(())
}
