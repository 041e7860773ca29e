//! `stagedesk-core` — shared authorization primitives.
//!
//! This crate contains the permission-name codec and the value types every
//! other stagedesk crate builds on. It is a pure leaf: no IO, no state.

pub mod name;

pub use name::{CrudAction, PermissionName, build_permission_name, category_of};
