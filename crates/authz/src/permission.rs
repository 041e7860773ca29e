//! Catalog-facing permission value types.
//!
//! These mirror what the permission service returns. The client only ever
//! reads them; mutation happens server-side.

use serde::{Deserialize, Serialize};

use stagedesk_core::PermissionName;

/// A permission record as issued by the permission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub name: PermissionName,
    /// Human-readable label shown in admin listings.
    pub label: String,
    /// Owning category; always equal to the prefix of `name`.
    pub category: String,
    pub description: String,
}

/// A named grouping of permissions around one resource type.
///
/// Categories exist for listing and search UX only. Authorization never
/// consults them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCategory {
    pub name: String,
    pub permissions: Vec<Permission>,
}

/// Per-category totals for the admin listing page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_permissions: usize,
    pub total_categories: usize,
    pub by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}
