//! File body rendering with MiniJinja.
//!
//! Bodies are rendered with the document root as context. The stack that led
//! to the file is reachable through the `Stack(index)` function, using the
//! same signed indexing as `$[k]` anchors in path expressions.
//!
//! Frames are handed to MiniJinja as objects over the shared context values,
//! so nothing is copied or serialized per rendered file.
use crate::error::{Error, Result};
use crate::stack::Stack;
use crate::value::Value as ContextValue;
use cruet::Inflector;
use minijinja::value::{DynObject, Enumerator, Object, ObjectRepr};
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use std::cmp::Ordering;
use std::sync::Arc;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Trait for file body rendering engines.
pub trait BodyRenderer {
    /// Renders a file body against the stack reached for that file.
    ///
    /// # Arguments
    /// * `name` - Source path of the body, used in error messages
    /// * `body` - Template text
    /// * `stack` - Context stack of the output file
    ///
    /// # Returns
    /// * `Result<String>` - Rendered body
    fn render(&self, name: &str, body: &str, stack: &Stack) -> Result<String>;
}

/// MiniJinja-based body rendering engine.
pub struct MiniJinjaRenderer {
    /// Environment holding the helpers shared by every render
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer with the text helpers registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // generated files are never HTML or JSON escaped, whatever their extension
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_function("ToUpper", to_upper);
        env.add_function("ToLower", to_lower);
        env.add_function("NoAccent", |value: String| no_accent(&value));
        env.add_filter("ToUpper", to_upper);
        env.add_filter("ToLower", to_lower);
        env.add_filter("NoAccent", |value: String| no_accent(&value));
        env.add_filter("snakecase", |value: String| value.to_snake_case());
        env.add_filter("camelcase", |value: String| value.to_camel_case());
        env.add_filter("kebabcase", |value: String| value.to_kebab_case());

        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl BodyRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::RenderError` if the body does not parse, or rendering fails
    ///   (including a `Stack` index outside the stack)
    fn render(&self, name: &str, body: &str, stack: &Stack) -> Result<String> {
        let frames: Vec<Value> = stack.frames().iter().map(template_value).collect();
        let root = frames.first().cloned().unwrap_or_default();

        let mut env = self.env.clone();
        env.add_function("Stack", move |index: i64| stack_frame(&frames, index));

        env.render_named_str(name, body, root)
            .map_err(|source| Error::RenderError { path: name.to_string(), source })
    }
}

/// A sequence or mapping of the context, seen from templates.
#[derive(Debug)]
struct Frame(Arc<ContextValue>);

fn template_value(value: &Arc<ContextValue>) -> Value {
    match value.as_ref() {
        ContextValue::Null => Value::from(()),
        ContextValue::Bool(b) => Value::from(*b),
        ContextValue::Integer(i) => Value::from(*i),
        ContextValue::Float(x) => Value::from(*x),
        ContextValue::String(s) => Value::from(s.clone()),
        ContextValue::Sequence(_) | ContextValue::Mapping(_) => {
            Value::from_object(Frame(value.clone()))
        }
    }
}

impl Object for Frame {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        match self.0.as_ref() {
            ContextValue::Sequence(_) => ObjectRepr::Seq,
            _ => ObjectRepr::Map,
        }
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match self.0.as_ref() {
            ContextValue::Sequence(items) => items.get(key.as_usize()?).map(template_value),
            ContextValue::Mapping(map) => map.get(key.as_str()?).map(template_value),
            _ => None,
        }
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        match self.0.as_ref() {
            ContextValue::Sequence(items) => Enumerator::Seq(items.len()),
            ContextValue::Mapping(map) => {
                Enumerator::Values(map.keys().map(|key| Value::from(key.clone())).collect())
            }
            _ => Enumerator::Empty,
        }
    }

    // same context value: equal without walking it
    fn custom_cmp(self: &Arc<Self>, other: &DynObject) -> Option<Ordering> {
        let other = other.downcast_ref::<Self>()?;
        Arc::ptr_eq(&self.0, &other.0).then_some(Ordering::Equal)
    }
}

fn stack_frame(frames: &[Value], index: i64) -> std::result::Result<Value, minijinja::Error> {
    let len = i64::try_from(frames.len()).unwrap_or(i64::MAX);
    let absolute = if index < 0 { len + index } else { index };

    usize::try_from(absolute)
        .ok()
        .and_then(|i| frames.get(i))
        .cloned()
        .ok_or_else(|| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("Stack({index}) is outside a stack of {len} frames"),
            )
        })
}

fn to_upper(value: String) -> String {
    value.to_uppercase()
}

fn to_lower(value: String) -> String {
    value.to_lowercase()
}

/// Strips diacritics: "Léon" becomes "Leon".
pub fn no_accent(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
