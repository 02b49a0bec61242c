//! Immutable captures of a context stack.

use std::sync::Arc;

use super::frame::ContextFrame;

/// Ordered frames captured from a stack at a single instant, outermost first.
///
/// A snapshot owns its own copy of the frame list; nothing that happens to
/// the stack afterwards is visible through it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSnapshot {
    frames: Arc<[ContextFrame]>,
}

impl ContextSnapshot {
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[ContextFrame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContextFrame> {
        self.frames.iter()
    }

    /// Innermost frame, i.e. the one pushed last at capture time.
    pub fn innermost(&self) -> Option<&ContextFrame> {
        self.frames.last()
    }
}

impl Default for ContextSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<ContextFrame>> for ContextSnapshot {
    fn from(frames: Vec<ContextFrame>) -> Self {
        Self {
            frames: Arc::from(frames),
        }
    }
}

impl From<&[ContextFrame]> for ContextSnapshot {
    fn from(frames: &[ContextFrame]) -> Self {
        Self {
            frames: Arc::from(frames),
        }
    }
}

impl FromIterator<ContextFrame> for ContextSnapshot {
    fn from_iter<I: IntoIterator<Item = ContextFrame>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a ContextSnapshot {
    type Item = &'a ContextFrame;
    type IntoIter = std::slice::Iter<'a, ContextFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl PartialEq<[ContextFrame]> for ContextSnapshot {
    fn eq(&self, other: &[ContextFrame]) -> bool {
        self.frames() == other
    }
}
