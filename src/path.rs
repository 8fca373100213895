//! Path expressions selecting values out of a context stack.
//!
//! A path is a list of dot separated segments. A segment is either a mapping
//! key or `[]` (also written `*`), which fans out over every element of a
//! sequence. The first segment may be an anchor, `$` or `$[k]`, which starts
//! navigation from a stack frame instead of the root and rewinds the stack
//! to that frame.
//!
//! ```text
//! persons.[].name            every person's name, from the root
//! $[-2].columns.[].name      columns of the frame below the innermost one
//! ```

use log::trace;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::stack::Stack;
use crate::value::Value;

static STACK_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\[(-?\d+)\]$").expect("valid anchor pattern"));

/// Where navigation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `$`: the innermost frame.
    Top,
    /// `$[k]`: the frame at signed index `k`.
    Index(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    /// `[]` or `*`
    Each,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub anchor: Option<Anchor>,
    pub segments: Vec<Segment>,
}

/// A value selected by a path, with the stack that led to it.
///
/// `stack` always ends with `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: Arc<Value>,
    pub stack: Stack,
}

impl PathExpr {
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split('.').peekable();

        let anchor = match parts.peek().copied() {
            Some("$") => Some(Anchor::Top),
            Some(first) => STACK_ANCHOR
                .captures(first)
                .and_then(|caps| caps[1].parse().ok())
                .map(Anchor::Index),
            None => None,
        };
        if anchor.is_some() {
            parts.next();
        }

        let segments = parts
            .map(|part| match part {
                "[]" | "*" => Segment::Each,
                key => Segment::Key(key.to_string()),
            })
            .collect();

        Self { anchor, segments }
    }

    /// Evaluates the expression against `stack`.
    ///
    /// Results follow the order of the sequences traversed. A step that does
    /// not fit the data (missing key, indexing a scalar, anchor out of range)
    /// prunes that branch silently.
    pub fn resolve(&self, stack: &Stack) -> Vec<Resolved> {
        let mut results = Vec::new();

        let Some((base, rewound)) = self.rewind(stack) else {
            trace!("anchor of '{self}' is outside a stack of {} frames", stack.len());
            return results;
        };

        if self.segments.is_empty() {
            // a bare anchor selects its own frame
            if self.anchor.is_some() {
                let stack = match self.anchor {
                    Some(Anchor::Index(k)) if k < 0 => rewound,
                    _ => rewound.pushed(base.clone()),
                };
                results.push(Resolved { value: base, stack });
            }
            return results;
        }

        navigate(&base, &self.segments, &rewound, &mut results);
        results
    }

    /// Picks the frame navigation starts from and the stack it continues on.
    fn rewind(&self, stack: &Stack) -> Option<(Arc<Value>, Stack)> {
        match self.anchor {
            None => stack.root().map(|root| (root.clone(), stack.clone())),
            Some(Anchor::Top) => {
                let index = stack.len().checked_sub(1)?;
                Some((stack.top()?.clone(), stack.truncated(index)))
            }
            Some(Anchor::Index(k)) => {
                let index = stack.absolute_index(k)?;
                let frame = stack.get(k)?.clone();
                let keep = if k < 0 { index + 1 } else { index };
                Some((frame, stack.truncated(keep)))
            }
        }
    }
}

fn navigate(current: &Value, segments: &[Segment], stack: &Stack, results: &mut Vec<Resolved>) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };

    let mut step = |child: &Arc<Value>| {
        let stack = stack.pushed(child.clone());
        if rest.is_empty() {
            results.push(Resolved { value: child.clone(), stack });
        } else {
            navigate(child, rest, &stack, results);
        }
    };

    match segment {
        Segment::Each => {
            if let Some(items) = current.as_sequence() {
                items.iter().for_each(&mut step);
            }
        }
        Segment::Key(key) => {
            if let Some(child) = current.child(key) {
                step(child);
            }
        }
    }
}

/// Resolves `path` against `stack`, see [`PathExpr::resolve`].
pub fn resolve(path: &str, stack: &Stack) -> Vec<Resolved> {
    PathExpr::parse(path).resolve(stack)
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut needs_dot = match self.anchor {
            Some(Anchor::Top) => {
                f.write_str("$")?;
                true
            }
            Some(Anchor::Index(k)) => {
                write!(f, "$[{k}]")?;
                true
            }
            None => false,
        };
        for segment in &self.segments {
            if needs_dot {
                f.write_str(".")?;
            }
            needs_dot = true;
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Each => f.write_str("[]")?,
            }
        }
        Ok(())
    }
}
