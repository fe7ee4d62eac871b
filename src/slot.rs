//! Generic binding layer and lifecycle state machine.
//!
//! [`ControllerSlot`] wraps one concrete [`Controller`] and implements
//! [`ControllerBase`] for it, so the host can hold it type-erased. The slot
//! owns the lifecycle: the hardware reference exists only in the `Bound`
//! variant, so an `update()` with no hardware attached is unrepresentable —
//! the invariant lives in the data, not in a flag the hooks would have to
//! re-check against documentation.

use crate::config::ConfigScope;
use crate::controller::{Controller, ControllerBase, ControllerState, InitError};
use crate::hardware::HardwareHandle;
use crate::time::CycleTime;
use std::any::type_name;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Lifecycle state fused with the data it guards.
enum Binding<T> {
    /// Constructed: no hardware reference exists yet.
    Unbound,
    /// Initialized: the narrowed reference, set exactly once.
    Bound(Arc<T>),
}

/// One controller plus its binding state.
///
/// Created in `Constructed` state via [`ControllerSlot::new`], typically
/// boxed straight into the host's collection with
/// [`ControllerSlot::into_base`]. All slot state is private; the host drives
/// it exclusively through [`ControllerBase`].
pub struct ControllerSlot<C: Controller> {
    controller: C,
    binding: Binding<C::Hardware>,
}

impl<C: Controller> ControllerSlot<C> {
    /// Wrap a controller, in `Constructed` state.
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            binding: Binding::Unbound,
        }
    }

    /// Box into the type-erased interface the host loop holds.
    pub fn into_base(self) -> Box<dyn ControllerBase>
    where
        C: 'static,
    {
        Box::new(self)
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// The bound hardware reference, if initialized.
    pub fn hardware(&self) -> Option<&Arc<C::Hardware>> {
        match &self.binding {
            Binding::Bound(hw) => Some(hw),
            Binding::Unbound => None,
        }
    }
}

impl<C: Controller> ControllerBase for ControllerSlot<C> {
    fn name(&self) -> &'static str {
        self.controller.name()
    }

    fn state(&self) -> ControllerState {
        match self.binding {
            Binding::Unbound => ControllerState::Constructed,
            Binding::Bound(_) => ControllerState::Initialized,
        }
    }

    fn init_request(
        &mut self,
        hw: &HardwareHandle,
        scope: &ConfigScope,
    ) -> Result<(), InitError> {
        if let Binding::Bound(_) = self.binding {
            warn!(
                controller = self.controller.name(),
                "init_request on an already initialized controller"
            );
            return Err(InitError::AlreadyInitialized);
        }

        let Some(typed) = hw.narrow::<C::Hardware>() else {
            warn!(
                controller = self.controller.name(),
                provided = hw.type_name(),
                required = type_name::<C::Hardware>(),
                "hardware handle does not provide the required interface"
            );
            return Err(InitError::UnsupportedHardwareInterface {
                provided: hw.type_name(),
                required: type_name::<C::Hardware>(),
            });
        };

        if let Err(e) = self.controller.init(&typed, scope) {
            warn!(
                controller = self.controller.name(),
                reason = %e,
                "controller rejected initialization"
            );
            return Err(InitError::from(e));
        }

        // Single point where the binding is established; never reassigned.
        self.binding = Binding::Bound(typed);
        info!(
            controller = self.controller.name(),
            hardware = hw.type_name(),
            "controller initialized"
        );
        Ok(())
    }

    #[inline]
    fn starting(&mut self, time: CycleTime) {
        match &self.binding {
            Binding::Bound(hw) => self.controller.starting(hw, time),
            Binding::Unbound => hook_before_init(self.controller.name(), "starting"),
        }
    }

    #[inline]
    fn update(&mut self, time: CycleTime) {
        match &self.binding {
            Binding::Bound(hw) => self.controller.update(hw, time),
            Binding::Unbound => hook_before_init(self.controller.name(), "update"),
        }
    }

    #[inline]
    fn stopping(&mut self, time: CycleTime) {
        match &self.binding {
            Binding::Bound(hw) => self.controller.stopping(hw, time),
            Binding::Unbound => hook_before_init(self.controller.name(), "stopping"),
        }
    }
}

/// Host contract violation: an execution hook ran before `init_request()`
/// succeeded. Panics in debug builds; logs and skips the hook in release,
/// where the periodic path must not unwind.
#[cold]
fn hook_before_init(controller: &'static str, hook: &'static str) {
    error!(controller, hook, "execution hook invoked before initialization");
    debug_assert!(
        false,
        "execution hook `{hook}` invoked on controller `{controller}` before initialization"
    );
}
