//! Carrying captured context from schedule time to execute time.

use std::fmt;

use tracing::{debug, warn};

use super::settings::ContextSettings;
use super::snapshot::ContextSnapshot;
use super::Context;

/// Capability of a deferred-action record to hold one captured snapshot.
///
/// The first capture, taken when the action was scheduled, is the accurate
/// one. Setting again overwrites it.
pub trait ContextCarrier {
    /// The captured snapshot, if one was ever set.
    fn context(&self) -> Option<&ContextSnapshot>;

    fn set_context(&mut self, snapshot: ContextSnapshot);

    /// The captured snapshot, or the empty snapshot if nothing was captured.
    fn captured_context(&self) -> ContextSnapshot {
        match self.context() {
            Some(snapshot) => snapshot.clone(),
            None => {
                debug!("No context captured for deferred action; replaying empty snapshot");
                ContextSnapshot::empty()
            }
        }
    }
}

/// Snapshot storage for record types that implement [`ContextCarrier`] by
/// delegation.
#[derive(Debug, Clone, Default)]
pub struct ContextSlot {
    captured: Option<ContextSnapshot>,
}

impl ContextSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.captured.is_some()
    }
}

impl ContextCarrier for ContextSlot {
    fn context(&self) -> Option<&ContextSnapshot> {
        self.captured.as_ref()
    }

    fn set_context(&mut self, snapshot: ContextSnapshot) {
        if let Some(previous) = &self.captured {
            if ContextSettings::active_warn_on_overwrite() {
                warn!(
                    previous_frames = previous.len(),
                    new_frames = snapshot.len(),
                    "Overwriting captured context; the original capture is lost"
                );
            }
        }
        self.captured = Some(snapshot);
    }
}

/// A closure scheduled for later, together with the context it was
/// scheduled under.
pub struct Deferred<F> {
    action: F,
    context: Context,
    slot: ContextSlot,
}

impl<F> Deferred<F> {
    /// Wrap `action` without capturing anything.
    pub fn new(action: F) -> Self {
        Self {
            action,
            context: Context::BLAME,
            slot: ContextSlot::new(),
        }
    }

    /// Wrap `action`, capturing the calling thread's blame context.
    pub fn capture(action: F) -> Self {
        Self::capture_in(Context::BLAME, action)
    }

    pub fn capture_in(context: Context, action: F) -> Self {
        let mut deferred = Self {
            action,
            context,
            slot: ContextSlot::new(),
        };
        context.capture_into(&mut deferred);
        deferred
    }

    pub fn target(&self) -> Context {
        self.context
    }

    /// Run the action with its captured context replayed.
    pub fn run<R>(self) -> R
    where
        F: FnOnce() -> R,
    {
        let snapshot = self.slot.captured_context();
        self.context.run_with_context(&snapshot, self.action)
    }
}

impl<F> ContextCarrier for Deferred<F> {
    fn context(&self) -> Option<&ContextSnapshot> {
        self.slot.context()
    }

    fn set_context(&mut self, snapshot: ContextSnapshot) {
        self.slot.set_context(snapshot);
    }
}

impl<F> fmt::Debug for Deferred<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("context", &self.context)
            .field("captured", &self.slot.context())
            .finish_non_exhaustive()
    }
}
