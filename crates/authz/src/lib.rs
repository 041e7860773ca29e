//! `stagedesk-authz` — pure authorization queries over a permission snapshot.
//!
//! This crate is intentionally decoupled from transport and state ownership:
//! the session layer owns the snapshot lifecycle, this crate only answers
//! boolean questions about it. Every query is total and fails closed.

pub mod engine;
pub mod permission;
pub mod requirement;
pub mod subject;

pub use engine::AuthzEngine;
pub use permission::{CatalogStats, CategoryCount, Permission, PermissionCategory};
pub use requirement::PermissionRequirement;
pub use subject::{ADMIN_ROLE, AuthorizationSubject};
