//! Process-wide tuning for context stacks.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

// Read on every push without locking.
static DEPTH_WARNING: AtomicUsize = AtomicUsize::new(ContextSettings::DEFAULT.depth_warning);
static WARN_ON_OVERWRITE: AtomicBool = AtomicBool::new(ContextSettings::DEFAULT.warn_on_overwrite);

/// Context stack settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSettings {
    /// Stack depth at which a warning is logged (runaway rescheduling)
    #[serde(default = "default_depth_warning")]
    pub depth_warning: usize,

    /// Log a warning when a carrier's captured snapshot is overwritten
    #[serde(default = "default_true")]
    pub warn_on_overwrite: bool,
}

fn default_depth_warning() -> usize {
    ContextSettings::DEFAULT.depth_warning
}

fn default_true() -> bool {
    true
}

impl ContextSettings {
    pub const DEFAULT: ContextSettings = ContextSettings {
        depth_warning: 1024,
        warn_on_overwrite: true,
    };

    pub fn validate(&self) -> Result<(), String> {
        if self.depth_warning == 0 {
            return Err("depth_warning must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Make these settings visible to every thread.
    ///
    /// The two fields are stored independently, so a reader racing with
    /// `install` may briefly see one old and one new value.
    pub fn install(self) {
        DEPTH_WARNING.store(self.depth_warning, Ordering::Relaxed);
        WARN_ON_OVERWRITE.store(self.warn_on_overwrite, Ordering::Relaxed);
    }

    /// Settings currently in effect.
    pub fn active() -> ContextSettings {
        ContextSettings {
            depth_warning: Self::active_depth_warning(),
            warn_on_overwrite: Self::active_warn_on_overwrite(),
        }
    }

    pub fn active_depth_warning() -> usize {
        DEPTH_WARNING.load(Ordering::Relaxed)
    }

    pub fn active_warn_on_overwrite() -> bool {
        WARN_ON_OVERWRITE.load(Ordering::Relaxed)
    }
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
