//! Context domain: frames, snapshots, thread-scoped stacks, and replay.
//!
//! Each [`Context`] names a family of stacks, one per thread. Stacks are
//! created lazily on first use and dropped with their thread; a thread only
//! ever sees its own frames.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::error::BlameError;

pub mod carrier;
pub mod frame;
pub mod runner;
pub mod settings;
pub mod snapshot;
pub mod stack;

pub use carrier::{ContextCarrier, ContextSlot, Deferred};
pub use frame::{ContextFrame, FrameValue};
pub use runner::ContextScope;
pub use settings::ContextSettings;
pub use snapshot::ContextSnapshot;
pub use stack::ContextStack;

thread_local! {
    static STACKS: RefCell<HashMap<&'static str, ContextStack>> = RefCell::new(HashMap::new());
}

/// Handle to a named, thread-scoped context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context {
    name: &'static str,
}

impl Context {
    /// Causal chain used for blame attribution.
    pub const BLAME: Context = Context::named("blame");

    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(self) -> &'static str {
        self.name
    }

    /// Capture the calling thread's frames.
    pub fn snapshot(self) -> ContextSnapshot {
        self.with_stack_ref(|stack| stack.map(ContextStack::snapshot).unwrap_or_default())
    }

    /// The calling thread's frames as of this call.
    ///
    /// Intended for diagnostics that run in the middle of an action, such as
    /// crash reporting.
    pub fn current(self) -> ContextSnapshot {
        self.snapshot()
    }

    /// Borrowed view of the live frames.
    ///
    /// `f` may read any context but must not push or pop; doing so panics.
    pub fn with_current<R>(self, f: impl FnOnce(&[ContextFrame]) -> R) -> R {
        self.with_stack_ref(|stack| f(stack.map(ContextStack::current).unwrap_or(&[])))
    }

    pub fn depth(self) -> usize {
        self.with_stack_ref(|stack| stack.map_or(0, ContextStack::depth))
    }

    pub fn push_all(self, frames: &ContextSnapshot) {
        let (before, after) = self.with_stack(|stack| {
            let before = stack.depth();
            stack.push_all(frames);
            (before, stack.depth())
        });
        self.note_depth(before, after);
    }

    pub fn pop_count(self, n: usize) -> Result<(), BlameError> {
        self.with_stack(|stack| stack.pop_count(n))
    }

    /// Store the calling thread's frames on `carrier`.
    pub fn capture_into<C: ContextCarrier + ?Sized>(self, carrier: &mut C) {
        carrier.set_context(self.snapshot());
    }

    /// Run `body` with the frames captured on `carrier` installed.
    pub fn run_carried<C, R>(self, carrier: &C, body: impl FnOnce() -> R) -> R
    where
        C: ContextCarrier + ?Sized,
    {
        self.run_with_context(&carrier.captured_context(), body)
    }

    fn note_depth(self, before: usize, after: usize) {
        let threshold = ContextSettings::active_depth_warning();
        if before < threshold && after >= threshold {
            warn!(
                context = self.name,
                depth = after,
                threshold,
                "Context stack depth crossed warning threshold"
            );
        }
    }

    pub(crate) fn with_stack<R>(self, f: impl FnOnce(&mut ContextStack) -> R) -> R {
        STACKS.with(|stacks| {
            let mut stacks = stacks.borrow_mut();
            let stack = stacks
                .entry(self.name)
                .or_insert_with(|| ContextStack::new(self.name));
            f(stack)
        })
    }

    fn with_stack_ref<R>(self, f: impl FnOnce(Option<&ContextStack>) -> R) -> R {
        STACKS.with(|stacks| f(stacks.borrow().get(self.name)))
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
