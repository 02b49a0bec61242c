//! Host hook points
//!
//! A host loop adopts blame propagation by calling [`on_schedule`] wherever it
//! creates a deferred-action record and [`on_execute`] around the body when the
//! record comes due. Both operate on [`Context::BLAME`]; use
//! [`Context::capture_into`] and [`Context::run_carried`] for other contexts.

use crate::context::{Context, ContextCarrier, ContextSnapshot};

/// Schedule-time hook: capture the scheduling thread's blame chain.
pub fn on_schedule<C: ContextCarrier + ?Sized>(carrier: &mut C) {
    Context::BLAME.capture_into(carrier);
}

/// Execute-time hook: run `body` under the chain captured on `carrier`.
pub fn on_execute<C, R>(carrier: &C, body: impl FnOnce() -> R) -> R
where
    C: ContextCarrier + ?Sized,
{
    Context::BLAME.run_carried(carrier, body)
}

/// The calling thread's blame chain, outermost first.
pub fn blame() -> ContextSnapshot {
    Context::BLAME.current()
}
