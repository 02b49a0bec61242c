//! Context Stack
//!
//! The ordered frames describing what one thread is currently executing for
//! one named context. This type is plain data: thread scoping lives in
//! [`Context`](super::Context), which owns one instance per thread.

use crate::error::BlameError;

use super::frame::ContextFrame;
use super::snapshot::ContextSnapshot;

#[derive(Debug)]
pub struct ContextStack {
    name: &'static str,
    frames: Vec<ContextFrame>,
}

impl ContextStack {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            frames: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot::from(self.frames.as_slice())
    }

    /// Live view of the frames, outermost first.
    pub fn current(&self) -> &[ContextFrame] {
        &self.frames
    }

    pub fn push(&mut self, frame: ContextFrame) {
        self.frames.push(frame);
    }

    /// Append every frame of `frames`, keeping their relative order.
    pub fn push_all(&mut self, frames: &ContextSnapshot) {
        self.frames.extend(frames.iter().cloned());
    }

    /// Remove exactly the last `n` frames.
    ///
    /// Fails without touching the stack when `n` exceeds the depth.
    pub fn pop_count(&mut self, n: usize) -> Result<(), BlameError> {
        let depth = self.frames.len();
        if n > depth {
            return Err(BlameError::InvariantViolation {
                context: self.name,
                requested: n,
                depth,
            });
        }
        self.frames.truncate(depth - n);
        Ok(())
    }

    pub(crate) fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }
}
