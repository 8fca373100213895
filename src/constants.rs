//! Common constants used throughout emporte-piece.

/// Permissions requested for generated directories (before umask)
pub const DIR_MODE: u32 = 0o777;

/// Permissions requested for generated files (before umask)
pub const FILE_MODE: u32 = 0o666;

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = ".";
