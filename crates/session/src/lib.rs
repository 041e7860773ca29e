//! `stagedesk-session` — session-scoped authorization context.
//!
//! This crate owns the lifecycle around the pure [`stagedesk_authz`] engine:
//! loading the user's grants and the catalog on login, swapping snapshots on
//! refresh, and tearing everything down on logout. It is the sole sanctioned
//! way for the rest of the UI to ask "can the current user do X".
//!
//! The session is constructed explicitly (per app, per test) rather than
//! living in module-level globals, so every test gets a fresh lifecycle.

pub mod error;
pub mod session;
pub mod state;

pub use error::{SessionError, SessionResult};
pub use session::AuthSession;
pub use state::{AuthenticatedUser, SessionPhase};
