//! Event schema for lifecycle notifications.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The host finished simulation tick `tick`.
    TickCompleted { tick: u64 },
}

impl LifecycleEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleEvent::TickCompleted { .. } => "tick_completed",
        }
    }
}
