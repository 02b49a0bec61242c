//! Context frames: opaque markers for "what is currently happening".

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Values that can be carried as a context frame.
///
/// Implemented for every `'static + Debug + PartialEq + Send + Sync` type, so
/// callers never implement it by hand.
pub trait FrameValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn FrameValue) -> bool;
}

impl<T> FrameValue for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn FrameValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }
}

/// One causal layer on a context stack.
///
/// The payload is immutable and shared, so cloning a frame is a reference
/// count bump. Two frames are equal when they hold the same concrete type
/// and that type's `PartialEq` agrees.
#[derive(Clone)]
pub struct ContextFrame {
    value: Arc<dyn FrameValue>,
}

impl ContextFrame {
    pub fn new<T: FrameValue>(value: T) -> Self {
        Self {
            value: Arc::new(value),
        }
    }

    /// Borrow the payload as `T`, if that is what this frame carries.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        (*self.value).as_any().is::<T>()
    }

    /// Identity comparison: both frames share the same payload allocation.
    pub fn ptr_eq(&self, other: &ContextFrame) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl PartialEq for ContextFrame {
    fn eq(&self, other: &Self) -> bool {
        (*self.value).dyn_eq(&*other.value)
    }
}

impl fmt::Debug for ContextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.value, f)
    }
}

impl From<&'static str> for ContextFrame {
    fn from(label: &'static str) -> Self {
        ContextFrame::new(label)
    }
}

impl From<String> for ContextFrame {
    fn from(label: String) -> Self {
        ContextFrame::new(label)
    }
}
