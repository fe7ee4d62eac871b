//! Controller lifecycle contract.
//!
//! This module defines:
//! - `Controller` trait - Typed interface a concrete controller implements
//! - `ControllerBase` trait - Type-erased interface the host loop holds
//! - `ControllerState` enum - The two-state lifecycle
//! - `InitError` / `SetupError` - Initialization error types
//!
//! Concrete controllers implement [`Controller`] against the one hardware
//! interface type they require. The host never sees that type: it holds
//! [`ControllerBase`] trait objects (see [`crate::slot::ControllerSlot`] for
//! the layer that connects the two).

use crate::config::ConfigScope;
use crate::hardware::{HardwareHandle, HardwareInterface};
use crate::time::CycleTime;
use std::sync::Arc;
use thiserror::Error;

/// Reason a concrete controller rejected its own initialization.
///
/// Returned by [`Controller::init`] for domain-level failures: bad
/// configuration, a resource conflict, a hardware self-check that did not
/// pass. Distinct from a hardware type mismatch, which the binding layer
/// detects before `init` is ever called.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct SetupError(String);

impl SetupError {
    /// Create a setup error from a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Error type for `init_request()`.
///
/// The three causes stay distinguishable so the host can tell "wrong
/// hardware, try another handle" from "right hardware, controller refused"
/// from "caller bug".
#[derive(Debug, Clone, Error)]
pub enum InitError {
    /// `init_request()` called on a controller that is already initialized.
    /// No state was touched; the first binding stands.
    #[error("controller is already initialized")]
    AlreadyInitialized,

    /// The supplied handle does not provide the hardware interface the
    /// controller requires. Nothing was initialized; retrying with a
    /// different handle is permitted.
    #[error("hardware handle provides `{provided}` but controller requires `{required}`")]
    UnsupportedHardwareInterface {
        /// Concrete type behind the supplied handle.
        provided: &'static str,
        /// Interface type the controller declares.
        required: &'static str,
    },

    /// The hardware type matched but the controller's typed initializer
    /// reported failure. Nothing was retained; retrying (typically with
    /// corrected configuration) is permitted.
    #[error("controller rejected initialization: {0}")]
    RejectedByController(#[from] SetupError),
}

/// Lifecycle state of a controller.
///
/// The transition `Constructed → Initialized` happens exactly once, on the
/// first successful `init_request()`, and never reverts. Stop/restart
/// semantics beyond this are owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Created, not yet bound to hardware. Execution hooks must not run.
    Constructed,
    /// Bound to its hardware interface and eligible for execution.
    Initialized,
}

/// Typed interface a concrete controller implements.
///
/// # Lifecycle
///
/// 1. `init()` - Called once from a non-deadline context, after the binding
///    layer has narrowed the host's handle to [`Self::Hardware`]
/// 2. `starting()` - Called just before the first `update()` of an active phase
/// 3. `update()` - Called once per control cycle while active
/// 4. `stopping()` - Called just after the last `update()` of an active phase
///
/// # Timing Contracts
///
/// | Operation | Context | Constraint |
/// |------------|----------------------|------------------------------------|
/// | `init()` | non-deadline | may block and allocate |
/// | `starting()` | periodic (deadline) | no blocking, no allocation |
/// | `update()` | periodic (deadline) | no blocking, no allocation, **HARD** budget |
/// | `stopping()` | periodic (deadline) | no blocking, no allocation |
pub trait Controller: Send {
    /// The one hardware interface type this controller requires.
    type Hardware: HardwareInterface;

    /// Stable controller identifier, used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Fallible typed setup.
    ///
    /// Receives the narrowed hardware reference and the controller's own
    /// configuration scope. The reference is the same instance the hooks
    /// will later observe; a controller that needs it during `update()` does
    /// not retain it here — the binding layer does, and hands it back on
    /// every hook call.
    ///
    /// # Errors
    /// Return [`SetupError`] to refuse initialization; nothing is retained
    /// and the host may retry.
    fn init(&mut self, hw: &Arc<Self::Hardware>, scope: &ConfigScope) -> Result<(), SetupError>;

    /// Hook run just before the first `update()` of an active phase.
    fn starting(&mut self, _hw: &Self::Hardware, _time: CycleTime) {}

    /// Hook run once per control cycle.
    fn update(&mut self, hw: &Self::Hardware, time: CycleTime);

    /// Hook run just after the last `update()` of an active phase.
    fn stopping(&mut self, _hw: &Self::Hardware, _time: CycleTime) {}
}

/// Type-erased lifecycle interface the host loop holds.
///
/// One `Vec<Box<dyn ControllerBase>>` can mix controllers bound to unrelated
/// hardware types; the typed binding happens behind `init_request()`.
///
/// # Contract
///
/// - `init_request()` is called from a non-deadline context, once per
///   intended binding, never concurrently with the hooks.
/// - The hooks are called serially from the periodic context, only after a
///   successful `init_request()`, in `starting` / `update`* / `stopping`
///   order. Calling a hook on a `Constructed` controller is a host bug; the
///   implementation fails loudly in debug builds.
pub trait ControllerBase: Send {
    /// Stable controller identifier, used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Current lifecycle state.
    fn state(&self) -> ControllerState;

    /// Bind to the supplied hardware handle and initialize.
    ///
    /// On success the controller transitions `Constructed → Initialized` and
    /// becomes eligible for the execution hooks. On any failure the state is
    /// unchanged and nothing is retained.
    ///
    /// # Errors
    /// See [`InitError`] for the three causes and their retry semantics.
    fn init_request(&mut self, hw: &HardwareHandle, scope: &ConfigScope)
    -> Result<(), InitError>;

    /// Forward `starting` to the bound controller.
    fn starting(&mut self, time: CycleTime);

    /// Forward `update` to the bound controller.
    fn update(&mut self, time: CycleTime);

    /// Forward `stopping` to the bound controller.
    fn stopping(&mut self, time: CycleTime);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_display_keeps_causes_distinguishable() {
        let a = InitError::AlreadyInitialized;
        let b = InitError::UnsupportedHardwareInterface {
            provided: "GpioBank",
            required: "ServoBus",
        };
        let c = InitError::from(SetupError::new("gain out of range"));

        assert!(a.to_string().contains("already initialized"));
        assert!(b.to_string().contains("GpioBank"));
        assert!(b.to_string().contains("ServoBus"));
        assert!(c.to_string().contains("gain out of range"));
    }

    #[test]
    fn setup_error_converts_into_init_error() {
        fn fails() -> Result<(), SetupError> {
            Err(SetupError::new("no axis configured"))
        }

        fn forwards() -> Result<(), InitError> {
            fails()?;
            Ok(())
        }

        assert!(matches!(
            forwards(),
            Err(InitError::RejectedByController(_))
        ));
    }
}
