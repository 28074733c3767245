//! Cache configuration for the simulator.
//!
//! This module defines the configuration of the data-cache model. It provides:
//! 1. **Defaults:** Baseline cache geometry used by the CLI when no file is given.
//! 2. **Structures:** `CacheConfig`, the immutable geometry and policy selection.
//! 3. **Enums:** Replacement and write policies.
//! 4. **Parsing:** The five-line text format and an equivalent JSON form.
//!
//! A configuration is validated once, when it is parsed or when the cache is
//! enabled; a validated configuration never changes while the cache is live.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::{DATA_START, STACK_START};
use crate::common::error::CacheConfigError;

/// Default configuration constants for the data cache.
mod defaults {
    /// Default cache size in bytes.
    pub const CACHE_SIZE: u64 = 1024;

    /// Default block size in bytes.
    pub const BLOCK_SIZE: u64 = 16;

    /// Default associativity (ways per set).
    pub const ASSOCIATIVITY: u64 = 2;
}

/// Cache replacement policy algorithms.
///
/// Every policy first fills an invalid way if the set has one; the policy
/// only decides among fully occupied sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Evicts the line with the oldest last-access timestamp.
    #[default]
    #[serde(alias = "lru", alias = "Lru")]
    Lru,
    /// Evicts the line that was filled first.
    #[serde(alias = "fifo", alias = "Fifo")]
    Fifo,
    /// Evicts the least frequently used line; ties go to the older last access.
    #[serde(alias = "lfu", alias = "Lfu")]
    Lfu,
    /// Evicts a pseudo-randomly chosen way.
    #[serde(alias = "random", alias = "Random")]
    Random,
}

impl FromStr for ReplacementPolicy {
    type Err = CacheConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_uppercase().as_str() {
            "LRU" => Ok(Self::Lru),
            "FIFO" => Ok(Self::Fifo),
            "LFU" => Ok(Self::Lfu),
            "RANDOM" => Ok(Self::Random),
            _ => Err(CacheConfigError::UnknownReplacementPolicy(name.to_string())),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lru => "LRU",
            Self::Fifo => "FIFO",
            Self::Lfu => "LFU",
            Self::Random => "RANDOM",
        };
        f.write_str(name)
    }
}

/// Cache write policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WritePolicy {
    /// Write-back: writes mark the line dirty; memory is updated on eviction.
    #[default]
    #[serde(alias = "wb", alias = "Wb")]
    Wb,
    /// Write-through: every write is mirrored to memory immediately.
    #[serde(alias = "wt", alias = "Wt")]
    Wt,
}

impl FromStr for WritePolicy {
    type Err = CacheConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_uppercase().as_str() {
            "WB" => Ok(Self::Wb),
            "WT" => Ok(Self::Wt),
            _ => Err(CacheConfigError::UnknownWritePolicy(name.to_string())),
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wb => "WB",
            Self::Wt => "WT",
        })
    }
}

/// Data-cache geometry and policy selection.
///
/// # Examples
///
/// Parsing the five-line format:
///
/// ```
/// use rvlab_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};
///
/// let cfg = CacheConfig::from_lines("64\n16\n2\nlru\nWB\n").unwrap();
/// assert_eq!(cfg.num_sets(), 2);
/// assert_eq!(cfg.replacement_policy, ReplacementPolicy::Lru);
/// assert_eq!(cfg.write_policy, WritePolicy::Wb);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use rvlab_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{
///     "cache_size": 256,
///     "block_size": 32,
///     "associativity": 4,
///     "replacement_policy": "LFU",
///     "write_policy": "WT"
/// }"#;
/// let cfg = CacheConfig::from_json(json).unwrap();
/// assert_eq!(cfg.num_sets(), 2);
/// assert_eq!(cfg.replacement_policy, ReplacementPolicy::Lfu);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    pub cache_size: u64,
    /// Bytes per block (line).
    pub block_size: u64,
    /// Ways per set.
    pub associativity: u64,
    /// Victim selection algorithm.
    #[serde(default)]
    pub replacement_policy: ReplacementPolicy,
    /// Write handling.
    #[serde(default)]
    pub write_policy: WritePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_size: defaults::CACHE_SIZE,
            block_size: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
            replacement_policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
        }
    }
}

impl CacheConfig {
    /// Number of sets: `cache_size / (block_size * associativity)`.
    pub const fn num_sets(&self) -> u64 {
        let per_set = self.block_size.saturating_mul(self.associativity);
        if per_set == 0 {
            0
        } else {
            self.cache_size / per_set
        }
    }

    /// Checks the geometry invariants.
    ///
    /// # Errors
    ///
    /// * `NotPowerOfTwo` if `block_size` or the derived set count is zero or not a power of two.
    /// * `Geometry` if `associativity` is zero or `cache_size` is not a whole number of sets.
    /// * `BlockTooLarge` if block-aligned windows would cross the data region boundaries.
    pub fn validate(&self) -> Result<(), CacheConfigError> {
        if !self.block_size.is_power_of_two() {
            return Err(CacheConfigError::NotPowerOfTwo {
                field: "block_size",
                value: self.block_size,
            });
        }
        if DATA_START % self.block_size != 0 || STACK_START % self.block_size != 0 {
            return Err(CacheConfigError::BlockTooLarge(self.block_size));
        }
        let per_set = self.block_size.saturating_mul(self.associativity);
        if self.associativity == 0 || self.cache_size == 0 || self.cache_size % per_set != 0 {
            return Err(CacheConfigError::Geometry {
                cache_size: self.cache_size,
                block_size: self.block_size,
                associativity: self.associativity,
            });
        }
        let sets = self.num_sets();
        if !sets.is_power_of_two() {
            return Err(CacheConfigError::NotPowerOfTwo {
                field: "num_sets",
                value: sets,
            });
        }
        Ok(())
    }

    /// Parses the five-line format.
    ///
    /// Lines are, in order: `cache_size`, `block_size`, `associativity`,
    /// `replacement_policy`, `write_policy`. Blank lines are skipped and policy
    /// tokens are case-insensitive. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns `CacheConfigError` for missing or malformed fields, or invalid geometry.
    pub fn from_lines(text: &str) -> Result<Self, CacheConfigError> {
        let mut fields = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let cache_size = parse_number(fields.next(), "cache_size")?;
        let block_size = parse_number(fields.next(), "block_size")?;
        let associativity = parse_number(fields.next(), "associativity")?;
        let replacement_policy = fields
            .next()
            .ok_or(CacheConfigError::MissingField("replacement_policy"))?
            .parse()?;
        let write_policy = fields
            .next()
            .ok_or(CacheConfigError::MissingField("write_policy"))?
            .parse()?;

        let cfg = Self {
            cache_size,
            block_size,
            associativity,
            replacement_policy,
            write_policy,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses the JSON form and validates it.
    ///
    /// # Errors
    ///
    /// Returns `CacheConfigError::Json` for malformed JSON, or a geometry error.
    pub fn from_json(text: &str) -> Result<Self, CacheConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses either format, choosing JSON when the text starts with `{`.
    ///
    /// # Errors
    ///
    /// See [`CacheConfig::from_lines`] and [`CacheConfig::from_json`].
    pub fn parse(text: &str) -> Result<Self, CacheConfigError> {
        if text.trim_start().starts_with('{') {
            Self::from_json(text)
        } else {
            Self::from_lines(text)
        }
    }

    /// Reads and parses a configuration file in either format.
    ///
    /// # Errors
    ///
    /// Returns `CacheConfigError::Io` if the file cannot be read, otherwise see [`CacheConfig::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CacheConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes, {}-byte blocks, {}-way, {} sets, {}, {}",
            self.cache_size,
            self.block_size,
            self.associativity,
            self.num_sets(),
            self.replacement_policy,
            self.write_policy
        )
    }
}

fn parse_number(field: Option<&str>, name: &'static str) -> Result<u64, CacheConfigError> {
    let raw = field.ok_or(CacheConfigError::MissingField(name))?;
    raw.parse().map_err(|_| CacheConfigError::InvalidNumber {
        field: name,
        value: raw.to_string(),
    })
}
