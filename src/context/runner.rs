//! Context replay: run work with a captured snapshot installed.
//!
//! [`ContextScope`] is the acquire/release pair behind every replay. It pushes
//! a snapshot when opened and pops exactly those frames when closed or
//! dropped, so the stack is restored on normal return, on `Err`, and while
//! unwinding from a panic.

use std::marker::PhantomData;
use std::thread;

use tracing::{error, trace};

use crate::error::BlameError;

use super::frame::ContextFrame;
use super::snapshot::ContextSnapshot;
use super::Context;

/// Frames installed on the current thread until this guard goes away.
#[must_use = "dropping a scope immediately removes the frames it pushed"]
#[derive(Debug)]
pub struct ContextScope {
    context: Context,
    base_depth: usize,
    pushed: usize,
    closed: bool,
    // Must be released on the thread whose stack it pushed onto.
    _not_send: PhantomData<*const ()>,
}

impl ContextScope {
    fn open(context: Context, snapshot: &ContextSnapshot) -> Self {
        let base_depth = context.depth();
        context.push_all(snapshot);
        trace!(
            context = context.name(),
            frames = snapshot.len(),
            base_depth,
            "Context scope opened"
        );
        Self {
            context,
            base_depth,
            pushed: snapshot.len(),
            closed: false,
            _not_send: PhantomData,
        }
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// Depth of the stack before this scope pushed.
    pub fn base_depth(&self) -> usize {
        self.base_depth
    }

    pub fn pushed(&self) -> usize {
        self.pushed
    }

    /// Pop this scope's frames, reporting a mismatched stack instead of
    /// panicking.
    pub fn close(mut self) -> Result<(), BlameError> {
        self.closed = true;
        self.release()
    }

    fn release(&self) -> Result<(), BlameError> {
        let expected = self.base_depth + self.pushed;
        let result = self.context.with_stack(|stack| {
            let actual = stack.depth();
            if actual != expected {
                // Put back what we can so the outer caller sees its own frames.
                if actual > self.base_depth {
                    stack.truncate(self.base_depth);
                }
                return Err(BlameError::ScopeImbalance {
                    context: self.context.name(),
                    expected,
                    actual,
                });
            }
            stack.pop_count(self.pushed)
        });
        trace!(
            context = self.context.name(),
            frames = self.pushed,
            ok = result.is_ok(),
            "Context scope closed"
        );
        result
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.release() {
            if thread::panicking() {
                error!(error = %err, "Context scope released during unwind with a mismatched stack");
            } else {
                panic!("{err}");
            }
        }
    }
}

impl Context {
    /// Push `snapshot` and return the guard that removes it again.
    pub fn scope(self, snapshot: &ContextSnapshot) -> ContextScope {
        ContextScope::open(self, snapshot)
    }

    /// Run `action` with `snapshot` pushed onto this thread's stack.
    ///
    /// The pushed frames are removed however `action` finishes. Its result,
    /// `Err` or otherwise, is returned unchanged and a panic keeps unwinding.
    ///
    /// # Panics
    ///
    /// Panics if `action` left the stack at a different depth than it found
    /// it; that is a push/pop mismatch in the calling code.
    pub fn run_with_context<R>(self, snapshot: &ContextSnapshot, action: impl FnOnce() -> R) -> R {
        match self.try_run_with_context(snapshot, action) {
            Ok(result) => result,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`run_with_context`](Self::run_with_context), but a push/pop
    /// mismatch found on the normal return path comes back as an error.
    pub fn try_run_with_context<R>(
        self,
        snapshot: &ContextSnapshot,
        action: impl FnOnce() -> R,
    ) -> Result<R, BlameError> {
        let scope = self.scope(snapshot);
        let result = action();
        scope.close()?;
        Ok(result)
    }

    /// Run `action` with one additional frame.
    pub fn act<R>(self, frame: impl Into<ContextFrame>, action: impl FnOnce() -> R) -> R {
        self.run_with_context(&ContextSnapshot::from(vec![frame.into()]), action)
    }
}
