//! The context stack: the chain of values that led from the document root to
//! the value currently in scope.

use std::sync::Arc;

use crate::value::Value;

/// Ordered frames, index 0 being the document root and the last index the
/// innermost value.
///
/// Frames are shared, so cloning a stack to hand it to a sibling branch only
/// copies pointers. A stack is never modified in place: [`Stack::pushed`] and
/// [`Stack::truncated`] return new stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    frames: Vec<Arc<Value>>,
}

impl Stack {
    /// Creates a stack holding a single root frame.
    pub fn new(root: Value) -> Self {
        Self { frames: vec![Arc::new(root)] }
    }

    pub fn from_frames<I: IntoIterator<Item = Value>>(frames: I) -> Self {
        Self { frames: frames.into_iter().map(Arc::new).collect() }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The first frame, if any.
    pub fn root(&self) -> Option<&Arc<Value>> {
        self.frames.first()
    }

    /// The innermost frame, if any.
    pub fn top(&self) -> Option<&Arc<Value>> {
        self.frames.last()
    }

    /// Resolves a signed stack index to an absolute one.
    ///
    /// Non-negative indexes count from the root, negative ones from the end
    /// (`-1` is the innermost frame).
    pub fn absolute_index(&self, index: i64) -> Option<usize> {
        let len = i64::try_from(self.frames.len()).ok()?;
        let absolute = if index < 0 { len + index } else { index };
        if (0..len).contains(&absolute) {
            usize::try_from(absolute).ok()
        } else {
            None
        }
    }

    /// Returns the frame at a signed index, see [`Stack::absolute_index`].
    pub fn get(&self, index: i64) -> Option<&Arc<Value>> {
        self.absolute_index(index).map(|i| &self.frames[i])
    }

    /// Returns a copy of this stack with `frame` appended.
    pub fn pushed(&self, frame: Arc<Value>) -> Self {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        frames.extend(self.frames.iter().cloned());
        frames.push(frame);
        Self { frames }
    }

    /// Returns a copy holding only the first `len` frames.
    pub fn truncated(&self, len: usize) -> Self {
        Self { frames: self.frames[..len.min(self.frames.len())].to_vec() }
    }

    /// The frames themselves, root first.
    pub fn frames(&self) -> &[Arc<Value>] {
        &self.frames
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.frames.iter().map(|frame| frame.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stack {
        Stack::from_frames(["root", "middle", "inner"].map(Value::from))
    }

    #[test]
    fn test_signed_indexing() {
        let stack = sample();
        assert_eq!(stack.get(0).map(|v| v.to_string()), Some("root".to_string()));
        assert_eq!(stack.get(-1).map(|v| v.to_string()), Some("inner".to_string()));
        assert_eq!(stack.get(-3), stack.get(0));
        assert_eq!(stack.get(3), None);
        assert_eq!(stack.get(-4), None);
    }

    #[test]
    fn test_minus_one_is_last_index() {
        let stack = sample();
        let last = i64::try_from(stack.len()).unwrap() - 1;
        assert_eq!(stack.get(-1), stack.get(last));
    }

    #[test]
    fn test_pushed_leaves_original_untouched() {
        let stack = sample();
        let grown = stack.pushed(Arc::new(Value::from("extra")));
        assert_eq!(stack.len(), 3);
        assert_eq!(grown.len(), 4);
        assert_eq!(grown.truncated(3), stack);
    }
}
