use clap::ValueEnum;
use emporte_piece::context::{read_contexts, ContextFormat};
use emporte_piece::error::{Error, Result};
use emporte_piece::value::Value;

fn read(format: ContextFormat, input: &str) -> Result<Vec<Value>> {
    read_contexts(format, input.as_bytes()).collect()
}

#[test]
fn test_yaml_documents() {
    let documents = read(ContextFormat::Yaml, "name: a\n---\nname: b\n").unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1].get("name"), Some(&Value::from("b")));
}

#[test]
fn test_yaml_null_document_is_empty_mapping() {
    let documents = read(ContextFormat::Yaml, "~\n").unwrap();
    assert_eq!(documents, vec![Value::Mapping(Default::default())]);
}

#[test]
fn test_json_single_and_concatenated() {
    assert_eq!(read(ContextFormat::Json, r#"{"a": 1}"#).unwrap().len(), 1);
    let documents = read(ContextFormat::Json, "{\"a\": 1}\n{\"a\": 2}").unwrap();
    assert_eq!(documents[1].get("a"), Some(&Value::Integer(2)));
}

#[test]
fn test_jsonl_skips_blank_lines() {
    let documents = read(ContextFormat::Jsonl, "{\"a\": 1}\n\n{\"a\": 2}\n").unwrap();
    assert_eq!(documents.len(), 2);
}

#[test]
fn test_jsonl_reports_line_number() {
    let result = read(ContextFormat::Jsonl, "{\"a\": 1}\n{oops\n");
    assert!(matches!(result, Err(Error::JsonLineError { line: 2, .. })));
}

#[test]
fn test_documents_before_an_error_are_still_read() {
    let mut documents = read_contexts(ContextFormat::Jsonl, "{\"a\": 1}\nnot json\n".as_bytes());
    assert!(documents.next().unwrap().is_ok());
    assert!(documents.next().unwrap().is_err());
}

#[test]
fn test_non_mapping_document_is_rejected() {
    let result = read(ContextFormat::Json, "[1, 2]");
    assert!(matches!(
        result,
        Err(Error::ContextNotMappingError { index: 0, found: "sequence" })
    ));
}

#[test]
fn test_malformed_yaml() {
    assert!(matches!(read(ContextFormat::Yaml, "a: [1, 2\n"), Err(Error::YamlError(_))));
}

#[test]
fn test_format_names() {
    assert_eq!(ContextFormat::from_str("yml", true).unwrap(), ContextFormat::Yaml);
    assert_eq!(ContextFormat::from_str("YAML", true).unwrap(), ContextFormat::Yaml);
    assert_eq!(ContextFormat::from_str("jsonl", true).unwrap(), ContextFormat::Jsonl);
    assert!(ContextFormat::from_str("toml", true).is_err());
    assert_eq!(ContextFormat::Json.to_string(), "json");
}
