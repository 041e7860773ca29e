//! `stagedesk-catalog` — permission catalog client abstraction.
//!
//! The catalog is the read-only directory of every permission the platform
//! knows about, plus the per-user grant lists. This crate defines the client
//! trait the session layer consumes and an in-memory implementation for
//! tests and development. The real HTTP-backed client lives with the rest of
//! the transport code, outside this core.

pub mod client;
pub mod in_memory;

pub use client::{CatalogError, CatalogResult, PermissionCatalog, PermissionPage, PermissionQuery};
pub use in_memory::InMemoryCatalog;
