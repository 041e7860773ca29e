//! Catalog client trait and its wire-shaped value types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use stagedesk_authz::{CatalogStats, Permission, PermissionCategory};
use stagedesk_core::PermissionName;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The permission service could not be reached.
    #[error("permission service unavailable: {0}")]
    Unavailable(String),

    /// The permission service answered but rejected the request.
    #[error("permission service rejected request: {0}")]
    Rejected(String),
}

/// Filter and paging for administrative permission listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionQuery {
    /// Restrict to one category (exact match on the name prefix grouping).
    pub category: Option<String>,
    /// Case-insensitive substring match on name, label, or description.
    pub search: Option<String>,
    pub offset: usize,
    /// Zero means "no limit".
    pub limit: usize,
}

impl PermissionQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn in_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// One page of an administrative listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPage {
    pub permissions: Vec<Permission>,
    /// Total matches before paging, for pager widgets.
    pub total: usize,
}

/// Read-only client for the permission service.
///
/// Implementations must be shareable across the UI: calls may race with each
/// other and with session teardown, so no call may assume it is still wanted
/// by the time it completes. The session layer discards stale results.
#[async_trait]
pub trait PermissionCatalog: Send + Sync {
    /// List permissions matching `query`, in catalog order.
    async fn list_permissions(&self, query: &PermissionQuery) -> CatalogResult<PermissionPage>;

    /// All categories with their permissions, for grouped listings.
    async fn list_categories(&self) -> CatalogResult<Vec<PermissionCategory>>;

    /// The permission names granted to `user_id`.
    async fn granted_for(&self, user_id: Uuid) -> CatalogResult<Vec<PermissionName>>;

    /// Whether `name` exists in the catalog at all.
    async fn permission_exists(&self, name: &PermissionName) -> CatalogResult<bool>;

    /// Per-category totals.
    async fn stats(&self) -> CatalogResult<CatalogStats>;
}
