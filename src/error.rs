//! Error handling for emporte-piece.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an expansion.
///
/// Resolution misses are not errors: a path expression that does not match
/// the shape of the data simply produces no output.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Malformed YAML context document
    #[error("YAML context error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Malformed JSON context document
    #[error("JSON context error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Malformed line in a JSON Lines context stream
    #[error("JSON Lines context error at line {line}: {source}.")]
    JsonLineError {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A context document decoded to something other than a mapping
    #[error("Context document {index} must be a mapping, found {found}.")]
    ContextNotMappingError { index: usize, found: &'static str },

    /// Represents errors that occur while rendering a file body
    #[error("Template error in '{path}': {source}.")]
    RenderError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Template path '{template_dir}' is not a directory.")]
    TemplateNotDirectoryError { template_dir: String },

    /// Directory entry whose name is not valid UTF-8
    #[error("Invalid file name under '{}'.", parent.display())]
    InvalidFileNameError { parent: PathBuf },

    #[error("Template tree is deeper than the configured maximum of {max_depth} at '{}'.", path.display())]
    DepthLimitError { path: PathBuf, max_depth: usize },

    #[error("Entry '{name}' expands to {count} outputs, more than the configured maximum of {max_fan_out}.")]
    FanOutLimitError { name: String, count: usize, max_fan_out: usize },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
