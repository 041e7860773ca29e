//! In-memory permission catalog.
//!
//! Intended for tests/dev. Mirrors the shaping the real service performs:
//! category grouping, substring search, paging, per-category totals. Failure
//! injection lets session tests exercise the fail-closed paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use stagedesk_authz::{CatalogStats, CategoryCount, Permission, PermissionCategory};
use stagedesk_core::PermissionName;

use crate::client::{
    CatalogError, CatalogResult, PermissionCatalog, PermissionPage, PermissionQuery,
};

#[derive(Debug, Default)]
struct Inner {
    permissions: Vec<Permission>,
    grants: HashMap<Uuid, Vec<PermissionName>>,
    /// When set, every call fails with this error until cleared.
    failure: Option<CatalogError>,
}

/// RwLock-backed catalog for tests and development.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<Inner>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed catalog records. `category` and `label`/`description` are derived
    /// from the name, which is all the tests need.
    pub fn with_permissions(names: impl IntoIterator<Item = PermissionName>) -> Self {
        let catalog = Self::new();
        {
            let mut inner = catalog.inner.write().unwrap_or_else(|e| e.into_inner());
            inner.permissions = names
                .into_iter()
                .map(|name| {
                    let category = name.category().to_string();
                    Permission {
                        label: name.as_str().replace('_', " "),
                        description: format!("Allows {}", name.as_str().replace('_', " ")),
                        category,
                        name,
                    }
                })
                .collect();
        }
        catalog
    }

    /// Record the grant list returned for `user_id`.
    pub fn grant(&self, user_id: Uuid, names: impl IntoIterator<Item = PermissionName>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner
            .grants
            .entry(user_id)
            .or_default()
            .extend(names);
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: CatalogError) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.failure = Some(error);
    }

    /// Clear injected failure; calls succeed again.
    pub fn recover(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.failure = None;
    }

    fn checked<T>(&self, f: impl FnOnce(&Inner) -> T) -> CatalogResult<T> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        if let Some(err) = &inner.failure {
            return Err(err.clone());
        }
        Ok(f(&inner))
    }
}

fn matches(perm: &Permission, query: &PermissionQuery) -> bool {
    if let Some(category) = &query.category {
        if perm.category != *category {
            return false;
        }
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        let hit = perm.name.as_str().to_lowercase().contains(&needle)
            || perm.label.to_lowercase().contains(&needle)
            || perm.description.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    true
}

#[async_trait]
impl PermissionCatalog for InMemoryCatalog {
    async fn list_permissions(&self, query: &PermissionQuery) -> CatalogResult<PermissionPage> {
        self.checked(|inner| {
            let filtered: Vec<Permission> = inner
                .permissions
                .iter()
                .filter(|p| matches(p, query))
                .cloned()
                .collect();
            let total = filtered.len();

            let page: Vec<Permission> = if query.limit == 0 {
                filtered.into_iter().skip(query.offset).collect()
            } else {
                filtered
                    .into_iter()
                    .skip(query.offset)
                    .take(query.limit)
                    .collect()
            };

            PermissionPage {
                permissions: page,
                total,
            }
        })
    }

    async fn list_categories(&self) -> CatalogResult<Vec<PermissionCategory>> {
        self.checked(|inner| {
            // BTreeMap keeps category listing order stable.
            let mut grouped: BTreeMap<String, Vec<Permission>> = BTreeMap::new();
            for perm in &inner.permissions {
                grouped
                    .entry(perm.category.clone())
                    .or_default()
                    .push(perm.clone());
            }
            grouped
                .into_iter()
                .map(|(name, permissions)| PermissionCategory { name, permissions })
                .collect()
        })
    }

    async fn granted_for(&self, user_id: Uuid) -> CatalogResult<Vec<PermissionName>> {
        self.checked(|inner| inner.grants.get(&user_id).cloned().unwrap_or_default())
    }

    async fn permission_exists(&self, name: &PermissionName) -> CatalogResult<bool> {
        self.checked(|inner| inner.permissions.iter().any(|p| p.name == *name))
    }

    async fn stats(&self) -> CatalogResult<CatalogStats> {
        self.checked(|inner| {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for perm in &inner.permissions {
                *counts.entry(perm.category.clone()).or_default() += 1;
            }
            CatalogStats {
                total_permissions: inner.permissions.len(),
                total_categories: counts.len(),
                by_category: counts
                    .into_iter()
                    .map(|(category, count)| CategoryCount { category, count })
                    .collect(),
            }
        })
    }
}
