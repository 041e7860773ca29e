//! Permission-name codec.
//!
//! Permission identifiers have the form `<category>_<action>` (e.g.
//! `department_edit`). This module is the **only** place that assembles or
//! splits that string, so category/action queries and exact-name queries stay
//! provably equivalent.
//!
//! Categories and actions must not themselves contain underscores; that is a
//! naming convention owned by the permission service, not validated here.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Modeled as an opaque string of the form `<category>_<action>`. Membership
/// in a granted set is the only operation authorization ever performs on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionName(Cow<'static, str>);

impl PermissionName {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The substring before the first underscore.
    ///
    /// Used for catalog grouping and search only. Authorization decisions go
    /// through [`build_permission_name`] or an exact name, never through this
    /// split, since multi-word actions make it lossy.
    pub fn category(&self) -> &str {
        category_of(self.as_str())
    }
}

impl core::fmt::Display for PermissionName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionName {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl From<String> for PermissionName {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

/// Compose a permission name from a `(category, action)` pair.
pub fn build_permission_name(category: &str, action: &str) -> PermissionName {
    PermissionName(Cow::Owned(format!("{category}_{action}")))
}

/// Extract the category prefix of a permission name.
///
/// Returns the substring before the first underscore, or the whole string if
/// no underscore is present.
pub fn category_of(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

/// The four CRUD actions every resource category exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudAction {
    View,
    Create,
    Edit,
    Delete,
}

impl CrudAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrudAction::View => "view",
            CrudAction::Create => "create",
            CrudAction::Edit => "edit",
            CrudAction::Delete => "delete",
        }
    }

    /// Permission name for this action on `category`.
    pub fn on(&self, category: &str) -> PermissionName {
        build_permission_name(category, self.as_str())
    }
}

impl core::fmt::Display for CrudAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
