//! Opaque hardware handle with checked type narrowing.
//!
//! The host owns one polymorphic handle per hardware interface it exposes and
//! passes it untyped into `init_request()`. A controller never assumes the
//! concrete type behind the handle: it asks, via [`HardwareHandle::narrow`],
//! whether the handle can be viewed as the interface it requires. Narrowing is
//! a total capability query — on a mismatch it returns `None`, never an
//! invalid reference.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// Marker trait for concrete hardware interface types.
///
/// A hardware interface is the typed view of a set of hardware resources that
/// controllers read and command during `update()`. The handle is shared
/// between the host and every controller bound to it, and the periodic path
/// must stay lock-free, so implementors expose cyclic data through interior
/// mutability (atomics, pre-allocated cells) rather than `&mut` access.
pub trait HardwareInterface: Send + Sync + 'static {}

/// Untyped, shared handle to one hardware interface.
///
/// Cloning is cheap (reference count bump); all clones refer to the same
/// underlying interface instance.
#[derive(Clone)]
pub struct HardwareHandle {
    hw: Arc<dyn Any + Send + Sync>,
    /// Concrete type name, kept for diagnostics only.
    type_name: &'static str,
}

impl HardwareHandle {
    /// Wrap a hardware interface into an untyped handle.
    pub fn new<T: HardwareInterface>(hw: T) -> Self {
        Self::from_arc(Arc::new(hw))
    }

    /// Wrap an already shared hardware interface into an untyped handle.
    pub fn from_arc<T: HardwareInterface>(hw: Arc<T>) -> Self {
        Self {
            hw,
            type_name: type_name::<T>(),
        }
    }

    /// Attempt to view this handle as the concrete interface `T`.
    ///
    /// Returns `None` if the handle was not constructed from a `T`. This is
    /// the only way to recover a typed reference from a handle; there is no
    /// unchecked variant.
    pub fn narrow<T: HardwareInterface>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.hw).downcast::<T>().ok()
    }

    /// Whether [`narrow`](Self::narrow) to `T` would succeed.
    pub fn provides<T: HardwareInterface>(&self) -> bool {
        self.hw.is::<T>()
    }

    /// Name of the concrete interface type behind this handle.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for HardwareHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HardwareHandle")
            .field("type_name", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct ServoBus {
        command: AtomicU64,
    }

    impl HardwareInterface for ServoBus {}

    struct GpioBank;

    impl HardwareInterface for GpioBank {}

    #[test]
    fn narrow_to_matching_type() {
        let handle = HardwareHandle::new(ServoBus {
            command: AtomicU64::new(7),
        });

        let servo = handle.narrow::<ServoBus>().expect("should narrow");
        assert_eq!(servo.command.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn narrow_to_wrong_type_fails() {
        let handle = HardwareHandle::new(GpioBank);
        assert!(handle.narrow::<ServoBus>().is_none());
        assert!(handle.provides::<GpioBank>());
        assert!(!handle.provides::<ServoBus>());
    }

    #[test]
    fn narrowed_reference_is_the_shared_instance() {
        let bus = Arc::new(ServoBus {
            command: AtomicU64::new(0),
        });
        let handle = HardwareHandle::from_arc(Arc::clone(&bus));

        let view = handle.narrow::<ServoBus>().expect("should narrow");
        view.command.store(42, Ordering::Relaxed);
        assert_eq!(bus.command.load(Ordering::Relaxed), 42);
    }

    #[test]
    fn clones_share_the_instance() {
        let handle = HardwareHandle::new(ServoBus {
            command: AtomicU64::new(0),
        });
        let clone = handle.clone();

        let a = handle.narrow::<ServoBus>().expect("should narrow");
        let b = clone.narrow::<ServoBus>().expect("should narrow");
        a.command.store(9, Ordering::Relaxed);
        assert_eq!(b.command.load(Ordering::Relaxed), 9);
    }

    #[test]
    fn type_name_names_the_concrete_type() {
        let handle = HardwareHandle::new(GpioBank);
        assert!(handle.type_name().contains("GpioBank"));
    }
}
