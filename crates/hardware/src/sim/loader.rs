//! Source and Listing File I/O.
//!
//! This module provides the file-facing helpers around the simulator. It performs:
//! 1. **Source loading:** Reads an assembly file and installs it into a `Simulator`.
//! 2. **Listing output:** Writes the assembled hex listing next to the source (`.hex`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::asm::Program;
use crate::sim::simulator::Simulator;

/// Reads an assembly source file.
///
/// # Errors
///
/// Any I/O error from reading `path`.
pub fn read_source(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Reads `path` and loads it into `sim`.
///
/// Returns the number of instructions loaded, or a printable message
/// describing the I/O or assembly failure.
///
/// # Errors
///
/// A message naming the file for I/O errors, or the assembler's error text.
pub fn load_file(sim: &mut Simulator, path: impl AsRef<Path>) -> Result<usize, String> {
    let path = path.as_ref();
    let source = read_source(path)
        .map_err(|e| format!("cannot open file '{}': {e}", path.display()))?;
    sim.load(&source).map_err(|e| e.to_string())
}

/// Path of the listing written for `source`: same stem, `.hex` extension.
pub fn listing_path(source: impl AsRef<Path>) -> PathBuf {
    source.as_ref().with_extension("hex")
}

/// Writes the lowercase hex listing of `program` to `path`.
///
/// # Errors
///
/// Any I/O error from creating or writing `path`.
pub fn write_listing(program: &Program, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, program.hex_listing())
}
