//! Command-line interface implementation for emporte-piece.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::context::ContextFormat;

/// Log verbosity, by name or by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    #[value(alias = "0")]
    None,
    #[value(alias = "1")]
    Error,
    #[value(alias = "2")]
    Warn,
    #[value(alias = "3")]
    Info,
    #[value(alias = "4")]
    Debug,
    #[value(alias = "5")]
    Trace,
}

/// Whether log output is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when writing to a terminal
    Auto,
    #[value(aliases = ["true", "1", "on", "enable"])]
    Yes,
    #[value(aliases = ["false", "0", "off", "disable"])]
    No,
}

/// Command-line arguments structure for emporte-piece.
#[derive(Parser, Debug)]
#[command(
    name = "ep",
    author,
    version,
    about = "Emporte-pièce: bootstrap a project tree from a template directory and structured data",
    long_about = None
)]
pub struct Args {
    /// Template directory; entry names may embed {{path}} expressions
    #[arg(value_name = "TEMPLATE_DIR")]
    pub template_dir: PathBuf,

    /// Directory where the tree is generated
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Format of the context data
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = ContextFormat::Yaml)]
    pub format: ContextFormat,

    /// Read the context from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Level of log verbosity
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Verbosity::Info)]
    pub verbosity: Verbosity,

    /// Use colors in log output
    #[arg(long, value_enum, ignore_case = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Write logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Add the source location of every log record
    #[arg(long)]
    pub debug: bool,

    /// Fail when the template tree is nested deeper than this
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Fail when a single entry name expands to more outputs than this
    #[arg(long, value_name = "N")]
    pub max_fan_out: Option<usize>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
