//! Substitution of `{{path}}` expressions embedded in file and directory names.

use log::trace;
use std::ops::Range;

use crate::path::PathExpr;
use crate::stack::Stack;

/// An expression found in a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Text between the braces.
    pub path: String,
    /// Byte range of the whole `{{...}}` region.
    pub span: Range<usize>,
}

/// One output string with the stack that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolated {
    pub text: String,
    pub stack: Stack,
}

#[derive(Clone, Copy)]
enum ScanState {
    Outside,
    OpenBrace,
    Inside,
    CloseBrace,
}

/// Finds the first `{{...}}` region of `template`.
///
/// A single `}` inside the braces belongs to the expression, two in a row
/// close it. Unterminated regions and empty expressions yield `None`.
pub fn extract_expression(template: &str) -> Option<Expression> {
    let mut state = ScanState::Outside;
    let mut begin = 0;
    let mut path = String::new();

    for (index, c) in template.char_indices() {
        state = match (state, c) {
            (ScanState::Outside, '{') => {
                begin = index;
                ScanState::OpenBrace
            }
            (ScanState::Outside, _) => ScanState::Outside,
            (ScanState::OpenBrace, '{') => ScanState::Inside,
            (ScanState::OpenBrace, _) => ScanState::Outside,
            (ScanState::Inside, '}') => ScanState::CloseBrace,
            (ScanState::Inside, c) => {
                path.push(c);
                ScanState::Inside
            }
            (ScanState::CloseBrace, '}') => {
                if path.is_empty() {
                    return None;
                }
                return Some(Expression { path, span: begin..index + 1 });
            }
            (ScanState::CloseBrace, c) => {
                path.push('}');
                path.push(c);
                ScanState::Inside
            }
        };
    }

    None
}

/// Replaces the first expression of `template` by every value it selects.
///
/// Returns one result per match, in resolution order. A template without an
/// expression comes back unchanged with the stack it was given.
pub fn interpolate(template: &str, stack: &Stack) -> Vec<Interpolated> {
    let Some(expression) = extract_expression(template) else {
        return vec![Interpolated { text: template.to_string(), stack: stack.clone() }];
    };

    let prefix = &template[..expression.span.start];
    let suffix = &template[expression.span.end..];

    let results: Vec<Interpolated> = PathExpr::parse(&expression.path)
        .resolve(stack)
        .into_iter()
        .map(|resolved| Interpolated {
            text: format!("{prefix}{}{suffix}", resolved.value),
            stack: resolved.stack,
        })
        .collect();

    trace!("'{template}' expands to {} name(s)", results.len());
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_expression() {
        let expression = extract_expression("hello {{persons.[].name}} !").unwrap();
        assert_eq!(expression.path, "persons.[].name");
        assert_eq!(expression.span, 6..25);
    }

    #[test]
    fn test_extract_first_expression_only() {
        let expression = extract_expression("{{a}}-{{b}}").unwrap();
        assert_eq!(expression.path, "a");
        assert_eq!(expression.span, 0..5);
    }

    #[test]
    fn test_single_closing_brace_belongs_to_expression() {
        let expression = extract_expression("x{{a}b}}y").unwrap();
        assert_eq!(expression.path, "a}b");
        assert_eq!(expression.span, 1..8);
    }

    #[test]
    fn test_single_open_brace_is_literal() {
        let expression = extract_expression("{a} {{b}}").unwrap();
        assert_eq!(expression.path, "b");
        assert_eq!(expression.span, 4..9);
    }

    #[test]
    fn test_malformed_expressions_are_ignored() {
        assert_eq!(extract_expression("plain.txt"), None);
        assert_eq!(extract_expression("{{unterminated"), None);
        assert_eq!(extract_expression("{{half}"), None);
        assert_eq!(extract_expression("{{}}"), None);
    }

    #[test]
    fn test_multibyte_prefix() {
        let expression = extract_expression("été-{{nom}}").unwrap();
        assert_eq!(&"été-{{nom}}"[expression.span], "{{nom}}");
    }
}
