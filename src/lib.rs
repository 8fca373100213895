//! Emporte-pièce expands a template directory into a concrete file tree.
//! File and directory names embed `{{path}}` expressions selecting values out
//! of structured context data; expressions traversing a sequence produce one
//! output entry per element. File bodies are rendered with MiniJinja.

/// Command-line interface module for the emporte-piece application
pub mod cli;

/// Runtime configuration built from command-line arguments
pub mod config;

/// Common constants
pub mod constants;

/// Context document decoding (YAML, JSON, JSON Lines)
pub mod context;

/// Error types and handling
pub mod error;

/// Recursive expansion of a template tree
pub mod expander;

/// Filesystem contract and its implementations
pub mod fs;

/// Extraction and substitution of `{{path}}` expressions in names
pub mod interpolate;

/// Logger setup
pub mod logger;

/// Path expressions and their resolution against a context stack
pub mod path;

/// File body rendering
pub mod renderer;

/// The context stack
pub mod stack;

/// Context values
pub mod value;
