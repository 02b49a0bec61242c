//! Lifecycle domain: coarse simulation milestones and their synchronous bus.

pub mod bus;
pub mod events;

pub use bus::{LifecycleBus, ListenerFault, ListenerId};
pub use events::LifecycleEvent;
