use std::fs;
use std::path::Path;

use emporte_piece::context::{read_contexts, ContextFormat};
use emporte_piece::expander::Expander;
use emporte_piece::fs::LocalFileSystem;
use emporte_piece::renderer::MiniJinjaRenderer;
use emporte_piece::stack::Stack;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const CONTEXT: &str = r#"
project: Demo
tables:
  - name: users
    columns:
      - name: id
      - name: email
  - name: orders
    columns:
      - name: id
"#;

#[test_log::test]
fn test_expand_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    let expected = temp_dir.path().join("expected");

    write(&template.join("README.md"), "# {{ project | ToUpper }}\n");
    write(
        &template.join("{{tables.[].name}}").join("{{$[-2].columns.[].name}}.sql"),
        "ALTER TABLE {{ Stack(-4).name }} ADD {{ Stack(-1) }};\n",
    );
    fs::create_dir_all(&output).unwrap();

    write(&expected.join("README.md"), "# DEMO\n");
    write(&expected.join("users/id.sql"), "ALTER TABLE users ADD id;\n");
    write(&expected.join("users/email.sql"), "ALTER TABLE users ADD email;\n");
    write(&expected.join("orders/id.sql"), "ALTER TABLE orders ADD id;\n");

    let fs = LocalFileSystem::new();
    let renderer = MiniJinjaRenderer::new();
    let expander = Expander::new(&fs, &renderer);
    for context in read_contexts(ContextFormat::Yaml, CONTEXT.as_bytes()) {
        expander.expand(&template, &output, &Stack::new(context.unwrap())).unwrap();
    }

    assert!(!dir_diff::is_different(&output, &expected).unwrap());
}

#[test_log::test]
fn test_every_document_expands_into_the_same_output() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");

    write(&template.join("{{name}}.txt"), "{{ name }}");
    fs::create_dir_all(&output).unwrap();

    let fs = LocalFileSystem::new();
    let renderer = MiniJinjaRenderer::new();
    let expander = Expander::new(&fs, &renderer);
    let input = "{\"name\": \"first\"}\n{\"name\": \"second\"}\n";
    for context in read_contexts(ContextFormat::Jsonl, input.as_bytes()) {
        expander.expand(&template, &output, &Stack::new(context.unwrap())).unwrap();
    }

    assert_eq!(fs::read_to_string(output.join("first.txt")).unwrap(), "first");
    assert_eq!(fs::read_to_string(output.join("second.txt")).unwrap(), "second");
}

#[test]
fn test_missing_parent_directory_fails_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    write(&template.join("file.txt"), "content");

    let fs = LocalFileSystem::new();
    let renderer = MiniJinjaRenderer::new();
    let result = Expander::new(&fs, &renderer).expand(
        &template,
        &temp_dir.path().join("absent/output"),
        &Stack::new(serde_yaml::from_str("{}").unwrap()),
    );

    assert!(result.is_err());
}
