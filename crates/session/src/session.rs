//! The authorization session: snapshot owner and query surface.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use stagedesk_authz::{
    AuthorizationSubject, AuthzEngine, CatalogStats, Permission, PermissionCategory,
    PermissionRequirement,
};
use stagedesk_catalog::{PermissionCatalog, PermissionPage, PermissionQuery};
use stagedesk_core::PermissionName;

use crate::error::{SessionError, SessionResult};
use crate::state::{AuthenticatedUser, SessionPhase, SessionState};

/// Session-scoped authorization context.
///
/// One instance per authenticated session, shared across the UI tree
/// (`Arc<AuthSession>`). All boolean queries are synchronous reads of the
/// committed snapshot; only `login`/`refresh` and the catalog delegations
/// are async.
///
/// Concurrency contract: a `refresh` does not block queries, which keep
/// observing the last committed snapshot until the new one lands. A fetch
/// result that arrives after a logout or a superseding refresh is discarded
/// (epoch check), never committed.
pub struct AuthSession {
    catalog: Arc<dyn PermissionCatalog>,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new(catalog: Arc<dyn PermissionCatalog>) -> Self {
        Self {
            catalog,
            state: RwLock::new(SessionState::unauthenticated()),
        }
    }

    // A poisoned lock means a panic mid-write elsewhere; authorization
    // continues against whatever state is there, which can only be as
    // permissive as the last committed snapshot.
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Begin a session for `user`: fetch their grants and the category
    /// catalog concurrently, then commit the snapshot.
    ///
    /// On any fetch failure the session enters the error phase with an empty
    /// grant set; every query then fails closed until a successful
    /// [`Self::refresh`].
    pub async fn login(&self, user: AuthenticatedUser) -> SessionResult<()> {
        let epoch = {
            let mut state = self.write();
            let epoch = state.epoch + 1;
            *state = SessionState::unauthenticated();
            state.epoch = epoch;
            state.phase = SessionPhase::Loading;
            state.user = Some(user.clone());
            epoch
        };

        tracing::info!(user_id = %user.id, role = %user.role, "loading permission snapshot");
        self.load(user, epoch).await
    }

    /// Clear every trace of the session. No stale grants survive.
    pub fn logout(&self) {
        let mut state = self.write();
        let epoch = state.epoch + 1;
        *state = SessionState::unauthenticated();
        state.epoch = epoch;
        tracing::info!("session cleared");
    }

    /// Re-fetch grants and catalog for the current user.
    ///
    /// Queries issued while the refresh is in flight observe the previous
    /// snapshot; the swap is atomic from their perspective.
    pub async fn refresh(&self) -> SessionResult<()> {
        let (user, epoch) = {
            let mut state = self.write();
            let Some(user) = state.user.clone() else {
                return Err(SessionError::NotAuthenticated);
            };
            state.epoch += 1;
            state.phase = SessionPhase::Loading;
            (user, state.epoch)
        };

        tracing::info!(user_id = %user.id, "refreshing permission snapshot");
        self.load(user, epoch).await
    }

    async fn load(&self, user: AuthenticatedUser, epoch: u64) -> SessionResult<()> {
        let (grants, categories, stats) = tokio::join!(
            self.catalog.granted_for(user.id),
            self.catalog.list_categories(),
            self.catalog.stats(),
        );

        match (|| Ok::<_, SessionError>((grants?, categories?, stats?)))() {
            Ok((grants, categories, stats)) => {
                let subject = AuthorizationSubject::from_role(&user.role);
                let engine = AuthzEngine::new(grants, subject);

                let mut state = self.write();
                if state.epoch != epoch {
                    tracing::debug!(user_id = %user.id, "discarding superseded permission load");
                    return Ok(());
                }
                tracing::info!(
                    granted = engine.granted_names().len(),
                    admin = engine.is_admin(),
                    categories = categories.len(),
                    "permission snapshot ready"
                );
                state.engine = engine;
                state.categories = categories;
                state.stats = stats;
                state.error = None;
                state.loaded_at = Some(Utc::now());
                state.phase = SessionPhase::Ready;
                Ok(())
            }
            Err(err) => {
                let mut state = self.write();
                if state.epoch != epoch {
                    tracing::debug!(user_id = %user.id, "discarding superseded failed load");
                    return Ok(());
                }
                tracing::warn!(user_id = %user.id, error = %err, "permission load failed, session fails closed");
                state.engine = AuthzEngine::denying();
                state.categories.clear();
                state.stats = CatalogStats::default();
                state.error = Some(err.to_string());
                state.loaded_at = None;
                state.phase = SessionPhase::Error;
                Err(err)
            }
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.read().phase
    }

    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.read().user.clone()
    }

    /// The stored load-failure message, if the session is in the error phase.
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn categories(&self) -> Vec<PermissionCategory> {
        self.read().categories.clone()
    }

    pub fn stats(&self) -> CatalogStats {
        self.read().stats.clone()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.read().loaded_at
    }

    /// The granted permission names, sorted. Empty unless `Ready`.
    pub fn user_permissions(&self) -> Vec<String> {
        self.read()
            .engine
            .granted_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // ── Boolean queries (total, fail-closed) ─────────────────────────────

    pub fn is_admin(&self) -> bool {
        self.read().engine.is_admin()
    }

    pub fn has_permission(&self, name: &PermissionName) -> bool {
        self.read().engine.has_permission(name)
    }

    pub fn has_any_permission(&self, names: &[PermissionName]) -> bool {
        self.read().engine.has_any_permission(names)
    }

    pub fn has_all_permissions(&self, names: &[PermissionName]) -> bool {
        self.read().engine.has_all_permissions(names)
    }

    pub fn can_perform(&self, category: &str, action: &str) -> bool {
        self.read().engine.can_perform(category, action)
    }

    pub fn can_view(&self, category: &str) -> bool {
        self.read().engine.can_view(category)
    }

    pub fn can_create(&self, category: &str) -> bool {
        self.read().engine.can_create(category)
    }

    pub fn can_edit(&self, category: &str) -> bool {
        self.read().engine.can_edit(category)
    }

    pub fn can_delete(&self, category: &str) -> bool {
        self.read().engine.can_delete(category)
    }

    pub fn satisfies(&self, requirement: &PermissionRequirement) -> bool {
        self.read().engine.satisfies(requirement)
    }

    // ── Catalog delegations (admin listing/search, not snapshotted) ──────

    /// Search the catalog by name/label/description substring.
    pub async fn search_permissions(&self, text: &str) -> SessionResult<Vec<Permission>> {
        let page = self
            .catalog
            .list_permissions(&PermissionQuery::search(text))
            .await?;
        Ok(page.permissions)
    }

    /// Administrative listing with filter and paging.
    pub async fn load_all_permissions(
        &self,
        query: &PermissionQuery,
    ) -> SessionResult<PermissionPage> {
        Ok(self.catalog.list_permissions(query).await?)
    }

    /// Whether `name` exists in the catalog. Not an authorization check.
    pub async fn permission_exists(&self, name: &PermissionName) -> SessionResult<bool> {
        Ok(self.catalog.permission_exists(name).await?)
    }

    /// Grant lookup for another user, for admin screens.
    pub async fn permissions_of(&self, user_id: Uuid) -> SessionResult<Vec<PermissionName>> {
        Ok(self.catalog.granted_for(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagedesk_catalog::{CatalogError, InMemoryCatalog};

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::now_v7(),
            role: role.to_string(),
            display_name: "Alex Reyes".to_string(),
        }
    }

    fn seeded_catalog() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::with_permissions(
            [
                "department_view",
                "department_edit",
                "department_delete",
                "role_view",
                "role_delete",
                "area_delete",
                "template_create",
            ]
            .map(PermissionName::from),
        ))
    }

    #[tokio::test]
    async fn login_commits_grants_and_categories() {
        let catalog = seeded_catalog();
        let member = user("coordinator");
        catalog.grant(
            member.id,
            ["department_view", "department_edit"].map(PermissionName::from),
        );

        let session = AuthSession::new(catalog);
        session.login(member).await.unwrap();

        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.has_permission(&"department_edit".into()));
        assert!(!session.has_permission(&"department_delete".into()));
        assert!(session.can_perform("department", "view"));
        assert!(!session.is_admin());
        assert_eq!(session.categories().len(), 4);
        assert!(session.loaded_at().is_some());
    }

    #[tokio::test]
    async fn admin_role_bypasses_grants() {
        let catalog = seeded_catalog();
        let session = AuthSession::new(catalog);
        session.login(user("admin")).await.unwrap();

        assert!(session.is_admin());
        assert!(session.has_all_permissions(&[
            "role_delete".into(),
            "area_delete".into(),
        ]));
        assert!(session.user_permissions().is_empty());
    }

    #[tokio::test]
    async fn failed_load_stores_error_and_fails_closed() {
        let catalog = seeded_catalog();
        catalog.fail_with(CatalogError::Unavailable("boom".into()));

        let session = AuthSession::new(catalog.clone());
        let err = session.login(user("coordinator")).await.unwrap_err();

        assert!(matches!(err, SessionError::Catalog(_)));
        assert_eq!(session.phase(), SessionPhase::Error);
        assert!(session.error().is_some());
        assert!(session.user_permissions().is_empty());
        assert!(!session.has_permission(&"anything".into()));
        assert!(session.user().is_some());
    }

    #[tokio::test]
    async fn refresh_recovers_from_error_phase() {
        let catalog = seeded_catalog();
        let member = user("coordinator");
        catalog.grant(member.id, ["role_view"].map(PermissionName::from));
        catalog.fail_with(CatalogError::Unavailable("boom".into()));

        let session = AuthSession::new(catalog.clone());
        let _ = session.login(member).await;
        assert_eq!(session.phase(), SessionPhase::Error);

        catalog.recover();
        session.refresh().await.unwrap();

        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.error().is_none());
        assert!(session.can_view("role"));
    }

    #[tokio::test]
    async fn logout_clears_every_grant() {
        let catalog = seeded_catalog();
        let member = user("coordinator");
        catalog.grant(
            member.id,
            ["department_view", "department_edit"].map(PermissionName::from),
        );

        let session = AuthSession::new(catalog);
        session.login(member).await.unwrap();
        assert!(session.can_edit("department"));

        session.logout();

        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(session.user().is_none());
        assert!(session.user_permissions().is_empty());
        assert!(!session.has_permission(&"department_edit".into()));
        assert!(!session.can_view("department"));
        assert!(!session.can_edit("department"));
        assert!(session.categories().is_empty());
    }

    #[tokio::test]
    async fn refresh_without_user_is_rejected() {
        let session = AuthSession::new(seeded_catalog());
        let err = session.refresh().await.unwrap_err();
        assert_eq!(err, SessionError::NotAuthenticated);
    }

    #[tokio::test]
    async fn refresh_picks_up_new_grants() {
        let catalog = seeded_catalog();
        let member = user("coordinator");
        catalog.grant(member.id, ["role_view"].map(PermissionName::from));

        let session = AuthSession::new(catalog.clone());
        session.login(member.clone()).await.unwrap();
        assert!(!session.can_delete("role"));

        catalog.grant(member.id, ["role_delete"].map(PermissionName::from));
        session.refresh().await.unwrap();

        assert!(session.can_delete("role"));
    }

    #[tokio::test]
    async fn search_and_listing_delegate_to_catalog() {
        let catalog = seeded_catalog();
        let session = AuthSession::new(catalog);
        session.login(user("coordinator")).await.unwrap();

        let hits = session.search_permissions("delete").await.unwrap();
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["department_delete", "role_delete", "area_delete"]);

        let page = session
            .load_all_permissions(&PermissionQuery::in_category("department"))
            .await
            .unwrap();
        assert_eq!(page.total, 3);

        assert!(session
            .permission_exists(&"template_create".into())
            .await
            .unwrap());
        assert!(!session.permission_exists(&"template_publish".into()).await.unwrap());

        let stats = session.stats();
        assert_eq!(stats.total_permissions, 7);
    }
}
