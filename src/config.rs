//! Runtime configuration assembled from the command line.

use log::debug;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use crate::cli::Args;
use crate::context::ContextFormat;
use crate::error::{Error, Result};
use crate::expander::ExpandOptions;

/// Everything one run needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: ContextFormat,
    /// Context file; stdin when `None`
    pub input: Option<PathBuf>,
    pub options: ExpandOptions,
}

impl Config {
    /// Builds the configuration from parsed arguments.
    ///
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if the template directory is missing
    /// * `Error::TemplateNotDirectoryError` if it is not a directory
    pub fn from_args(args: &Args) -> Result<Self> {
        let template_dir = args.template_dir.clone();
        if !template_dir.exists() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: template_dir.display().to_string(),
            });
        }
        if !template_dir.is_dir() {
            return Err(Error::TemplateNotDirectoryError {
                template_dir: template_dir.display().to_string(),
            });
        }

        let config = Self {
            template_dir,
            output_dir: args.output.clone(),
            format: args.format,
            input: args.input.clone(),
            options: ExpandOptions { max_depth: args.max_depth, max_fan_out: args.max_fan_out },
        };
        debug!("{config:?}");
        Ok(config)
    }

    /// Opens the context source.
    pub fn open_input(&self) -> Result<Box<dyn Read>> {
        match &self.input {
            Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}
