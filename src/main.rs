//! emporte-piece's main application entry point and orchestration logic.
//! Reads context documents and expands the template tree once per document.

use emporte_piece::{
    cli::{get_args, Args},
    config::Config,
    constants::DIR_MODE,
    context::read_contexts,
    error::{default_error_handler, Result},
    expander::Expander,
    fs::{FileSystem, LocalFileSystem},
    logger::init_logger,
    renderer::MiniJinjaRenderer,
    stack::Stack,
};
use log::info;

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbosity, args.color, args.log_json, args.debug);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Validates the configuration
/// 2. Ensures the output directory exists
/// 3. Expands the template tree for every context document, in input order
fn run(args: Args) -> Result<()> {
    let config = Config::from_args(&args)?;
    info!(
        "start: template '{}', output '{}', format {}",
        config.template_dir.display(),
        config.output_dir.display(),
        config.format
    );

    let fs = LocalFileSystem::new();
    let renderer = MiniJinjaRenderer::new();
    let expander = Expander::new(&fs, &renderer).with_options(config.options);

    fs.create_dir_all(&config.output_dir, DIR_MODE)?;

    let mut generations = 0;
    for context in read_contexts(config.format, config.open_input()?) {
        let stack = Stack::new(context?);
        expander.expand(&config.template_dir, &config.output_dir, &stack)?;
        generations += 1;
    }

    info!("end: {generations} context document(s) expanded");
    Ok(())
}
