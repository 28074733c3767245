/// Data region storage and bounds checks.
pub mod memory;
