//! # Controller Core Library
//!
//! Lifecycle and typed hardware-binding contract between a periodically-driven
//! control loop host and pluggable controllers.
//!
//! The host holds controllers through the type-erased [`ControllerBase`]
//! interface, so one collection can mix controllers bound to unrelated
//! hardware types. The one place where type safety matters — attaching a
//! controller to the concrete hardware interface it declares — is pushed into
//! the generic [`ControllerSlot`] layer, which performs a checked narrowing of
//! the opaque [`HardwareHandle`] and refuses to initialize on a mismatch.
//!
//! # Module Structure
//!
//! - [`hardware`] - Opaque hardware handle with checked type narrowing
//! - [`config`] - Namespaced TOML configuration scopes
//! - [`time`] - Cycle timestamps supplied by the host scheduler
//! - [`controller`] - `Controller` / `ControllerBase` traits and error types
//! - [`slot`] - Generic binding layer and lifecycle state machine
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         host loop                              │
//! │   Vec<Box<dyn ControllerBase>>        (one erased interface)   │
//! └───────────────┬────────────────────────────────────────────────┘
//!                 │ init_request / starting / update / stopping
//!                 ▼
//! ┌────────────────────────────────────────────────────────────────┐
//! │  ControllerSlot<C>                   (typed binding layer)     │
//! │    Unbound ──checked narrow + init──► Bound(Arc<C::Hardware>)  │
//! └───────────────┬────────────────────────────────────────────────┘
//!                 │ typed hooks
//!                 ▼
//! ┌────────────────────────────────────────────────────────────────┐
//! │  impl Controller                     (concrete algorithm)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. `init_request()` - Called once from a non-deadline context; may block
//!    and allocate. Performs the checked narrowing and the controller's own
//!    fallible setup. Only a success advances `Constructed → Initialized`.
//! 2. `starting()` - Called from the periodic context just before the first
//!    `update()` of an active phase.
//! 3. `update()` - Called once per control cycle; no allocation, no locking,
//!    no re-validation on this path.
//! 4. `stopping()` - Called just after the last `update()` of an active phase.
//!
//! # Example
//!
//! ```rust,no_run
//! use controller_core::{
//!     ConfigScope, Controller, ControllerBase, ControllerSlot, CycleTime,
//!     HardwareHandle, HardwareInterface, SetupError,
//! };
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! struct ServoBus {
//!     command: AtomicU64,
//! }
//!
//! impl HardwareInterface for ServoBus {}
//!
//! struct HoldPosition {
//!     target: u64,
//! }
//!
//! impl Controller for HoldPosition {
//!     type Hardware = ServoBus;
//!
//!     fn name(&self) -> &'static str {
//!         "hold_position"
//!     }
//!
//!     fn init(&mut self, _hw: &Arc<ServoBus>, scope: &ConfigScope) -> Result<(), SetupError> {
//!         self.target = scope
//!             .get("target")
//!             .map_err(|e| SetupError::new(e.to_string()))?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, hw: &ServoBus, _time: CycleTime) {
//!         hw.command.store(self.target, Ordering::Relaxed);
//!     }
//! }
//!
//! let hw = HardwareHandle::new(ServoBus { command: AtomicU64::new(0) });
//! let scope = ConfigScope::load(std::path::Path::new("controllers.toml")).unwrap();
//! let mut slot = ControllerSlot::new(HoldPosition { target: 0 });
//! slot.init_request(&hw, &scope.scoped("hold_position")).unwrap();
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod controller;
pub mod hardware;
pub mod slot;
pub mod time;

// Re-export key types for convenience
pub use crate::config::{ConfigError, ConfigScope};
pub use crate::controller::{Controller, ControllerBase, ControllerState, InitError, SetupError};
pub use crate::hardware::{HardwareHandle, HardwareInterface};
pub use crate::slot::ControllerSlot;
pub use crate::time::CycleTime;
