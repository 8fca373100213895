//! Decoding of context documents.
//! An input stream may hold several documents; each one drives its own
//! expansion of the template tree.

use clap::ValueEnum;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::io::{BufRead, BufReader, Read};

use crate::error::{Error, Result};
use crate::value::Value;

/// Supported context encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContextFormat {
    /// YAML, possibly several `---` separated documents
    #[default]
    #[value(alias = "yml")]
    Yaml,
    /// JSON, one document or several concatenated ones
    Json,
    /// JSON Lines, one document per line
    Jsonl,
}

impl fmt::Display for ContextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextFormat::Yaml => f.write_str("yaml"),
            ContextFormat::Json => f.write_str("json"),
            ContextFormat::Jsonl => f.write_str("jsonl"),
        }
    }
}

/// Iterates over the context documents of `reader`.
///
/// Documents are decoded one at a time, so a malformed document only surfaces
/// once the preceding ones have been consumed.
///
/// # Errors
/// * Decoding errors of the chosen format
/// * `Error::ContextNotMappingError` if a document is not a mapping; empty
///   documents are read as empty mappings
pub fn read_contexts<'r, R: Read + 'r>(
    format: ContextFormat,
    reader: R,
) -> Box<dyn Iterator<Item = Result<Value>> + 'r> {
    debug!("Reading {format} context documents");

    let documents: Box<dyn Iterator<Item = Result<Value>> + 'r> = match format {
        ContextFormat::Yaml => Box::new(
            serde_yaml::Deserializer::from_reader(reader)
                .map(|document| Value::deserialize(document).map_err(Error::YamlError)),
        ),
        ContextFormat::Json => Box::new(
            serde_json::Deserializer::from_reader(reader)
                .into_iter::<Value>()
                .map(|document| document.map_err(Error::JsonError)),
        ),
        ContextFormat::Jsonl => {
            Box::new(BufReader::new(reader).lines().enumerate().filter_map(|(index, line)| {
                match line {
                    Err(e) => Some(Err(Error::IoError(e))),
                    Ok(line) if line.trim().is_empty() => None,
                    Ok(line) => Some(
                        serde_json::from_str(&line)
                            .map_err(|source| Error::JsonLineError { line: index + 1, source }),
                    ),
                }
            }))
        }
    };

    Box::new(
        documents
            .enumerate()
            .map(|(index, document)| document.and_then(|document| into_root(index, document))),
    )
}

fn into_root(index: usize, document: Value) -> Result<Value> {
    match document {
        Value::Null => Ok(Value::Mapping(IndexMap::new())),
        Value::Mapping(_) => Ok(document),
        other => Err(Error::ContextNotMappingError { index, found: other.kind() }),
    }
}
