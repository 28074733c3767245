/// `.data` section handling.
pub mod data_directives;
/// Error taxonomy and line attribution.
pub mod diagnostics;
