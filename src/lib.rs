//! Blame Context: causal context propagation for deferred actions
//!
//! A simulation that schedules work for later loses track of *why* that work
//! exists. This crate keeps a thread-scoped stack of context frames, lets
//! deferred-action records carry a snapshot of it from schedule time, and
//! replays that snapshot around the action when it finally runs, so code
//! inside the action can read its causal chain.
//!
//! ```rust
//! use blame_context::{hooks, Context, ContextSlot, ContextFrame};
//!
//! let mut tick = ContextSlot::new();
//! Context::BLAME.act("redstone pulse", || hooks::on_schedule(&mut tick));
//!
//! let chain = hooks::on_execute(&tick, hooks::blame);
//! assert_eq!(chain.frames(), &[ContextFrame::from("redstone pulse")]);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod logging;


pub use context::{
    Context, ContextCarrier, ContextFrame, ContextScope, ContextSettings, ContextSlot,
    ContextSnapshot, ContextStack, Deferred,
};
pub use error::BlameError;
pub use lifecycle::{LifecycleBus, LifecycleEvent, ListenerId};
