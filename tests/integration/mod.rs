//! Integration tests for blame propagation through deferred actions

mod scheduled_ticks;
mod thread_isolation;
