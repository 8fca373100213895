use env_logger::WriteStyle;
use log::{LevelFilter, Record};
use std::io::Write;

use crate::cli::{ColorMode, Verbosity};

impl From<Verbosity> for LevelFilter {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::None => LevelFilter::Off,
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Warn => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

impl From<ColorMode> for WriteStyle {
    fn from(color: ColorMode) -> Self {
        match color {
            ColorMode::Auto => WriteStyle::Auto,
            ColorMode::Yes => WriteStyle::Always,
            ColorMode::No => WriteStyle::Never,
        }
    }
}

/// Installs the global logger.
///
/// # Arguments
/// * `verbosity` - Most detailed level written
/// * `color` - Coloring of the text output
/// * `json` - Write one JSON object per record instead of text
/// * `with_caller` - Add the source file and line of every record
pub fn init_logger(verbosity: Verbosity, color: ColorMode, json: bool, with_caller: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(verbosity.into()).write_style(color.into());

    if json {
        builder.format(move |buf, record| {
            let mut line = json_record(record, with_caller);
            line["time"] = buf.timestamp().to_string().into();
            writeln!(buf, "{line}")
        });
    } else if with_caller {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {} {}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                caller(record).unwrap_or_default(),
                record.args()
            )
        });
    }

    builder.init();
}

fn caller(record: &Record<'_>) -> Option<String> {
    let file = record.file()?;
    Some(match record.line() {
        Some(line) => format!("{file}:{line}"),
        None => file.to_string(),
    })
}

fn json_record(record: &Record<'_>, with_caller: bool) -> serde_json::Value {
    let mut line = serde_json::json!({
        "level": record.level().as_str().to_lowercase(),
        "target": record.target(),
        "message": record.args().to_string(),
    });
    if with_caller {
        if let Some(caller) = caller(record) {
            line["caller"] = caller.into();
        }
    }
    line
}
