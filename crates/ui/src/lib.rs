//! `stagedesk-ui` — permission-gated interactive controls.
//!
//! Headless widget contracts: a control is a value describing what it needs
//! and how to present denial, and resolution against the session yields the
//! render state the view layer applies. Call sites never re-implement
//! authorization logic, and gating adds no IO of its own.

pub mod button;
pub mod guard;

pub use button::{ControlState, GatedButton};
pub use guard::{GuardDecision, PermissionGuard};
