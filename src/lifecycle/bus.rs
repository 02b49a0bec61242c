//! In-process synchronous bus for lifecycle events.
//!
//! Listeners run on the notifying thread, in subscription order. The first
//! listener that returns an error stops the dispatch and its error is handed
//! back to the caller of [`LifecycleBus::notify`]; a panicking listener
//! unwinds through `notify` the same way.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{trace, warn};

use crate::error::BlameError;

use super::events::LifecycleEvent;

/// Error type listeners report faults with.
pub type ListenerFault = Box<dyn std::error::Error + Send + Sync + 'static>;

type Listener<E> = Arc<dyn Fn(&E) -> Result<(), ListenerFault> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

pub struct LifecycleBus<E = LifecycleEvent> {
    listeners: RwLock<Vec<(ListenerId, Listener<E>)>>,
    next_id: AtomicU64,
}

impl<E> LifecycleBus<E> {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&E) -> Result<(), ListenerFault> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `event` to every listener subscribed when the call starts.
    ///
    /// Listeners may subscribe or unsubscribe while being notified; the
    /// change applies from the next notification on.
    pub fn notify(&self, event: &E) -> Result<(), BlameError> {
        let listeners: Vec<(ListenerId, Listener<E>)> = self.listeners.read().clone();
        trace!(listeners = listeners.len(), "Dispatching lifecycle event");

        for (id, listener) in listeners {
            if let Err(source) = listener(event) {
                warn!(listener = %id, error = %source, "Lifecycle listener failed; aborting dispatch");
                return Err(BlameError::ListenerFailed {
                    listener: id,
                    source,
                });
            }
        }
        Ok(())
    }
}

impl LifecycleBus<LifecycleEvent> {
    /// Announce that the host finished tick `tick`.
    pub fn tick_completed(&self, tick: u64) -> Result<(), BlameError> {
        self.notify(&LifecycleEvent::TickCompleted { tick })
    }
}

impl<E> Default for LifecycleBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for LifecycleBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
