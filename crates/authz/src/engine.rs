//! Boolean authorization queries over a granted-permission snapshot.

use std::collections::HashSet;

use stagedesk_core::{CrudAction, PermissionName, build_permission_name};

use crate::{AuthorizationSubject, PermissionRequirement};

/// Pure query surface over one session's permission snapshot.
///
/// The engine owns no lifecycle: the session layer constructs a fresh one
/// whenever grants are (re)loaded and swaps it in atomically. Every query is
/// a total function of `(granted, subject)`:
///
/// - No IO
/// - No panics
/// - Absence of data yields `false` (fail-closed)
///
/// An admin subject short-circuits every query to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthzEngine {
    granted: HashSet<PermissionName>,
    subject: AuthorizationSubject,
}

impl AuthzEngine {
    pub fn new(
        granted: impl IntoIterator<Item = PermissionName>,
        subject: AuthorizationSubject,
    ) -> Self {
        Self {
            granted: granted.into_iter().collect(),
            subject,
        }
    }

    /// An engine that denies everything. Used for unauthenticated and
    /// failed-load states.
    pub fn denying() -> Self {
        Self::default()
    }

    pub fn is_admin(&self) -> bool {
        self.subject.is_admin
    }

    /// The granted names, sorted, for display/debugging.
    pub fn granted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.granted.iter().map(|n| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn has_permission(&self, name: &PermissionName) -> bool {
        self.subject.is_admin || self.granted.contains(name)
    }

    /// True if any of `names` is granted.
    ///
    /// An empty slice is `false`: requesting no permissions satisfies
    /// nothing. Callers must not rely on vacuous truth here.
    pub fn has_any_permission(&self, names: &[PermissionName]) -> bool {
        if names.is_empty() {
            return false;
        }
        self.subject.is_admin || names.iter().any(|n| self.granted.contains(n))
    }

    /// True if every one of `names` is granted.
    ///
    /// An empty slice is `true` (require nothing, get everything). This is
    /// intentionally asymmetric with [`Self::has_any_permission`]; call sites
    /// that mean "deny by default" must not pass an empty list.
    pub fn has_all_permissions(&self, names: &[PermissionName]) -> bool {
        self.subject.is_admin || names.iter().all(|n| self.granted.contains(n))
    }

    /// Check the permission composed from `(category, action)`.
    ///
    /// Equivalent to `has_permission(build_permission_name(category, action))`
    /// by construction: both paths go through the codec.
    pub fn can_perform(&self, category: &str, action: &str) -> bool {
        self.has_permission(&build_permission_name(category, action))
    }

    pub fn can_view(&self, category: &str) -> bool {
        self.has_permission(&CrudAction::View.on(category))
    }

    pub fn can_create(&self, category: &str) -> bool {
        self.has_permission(&CrudAction::Create.on(category))
    }

    pub fn can_edit(&self, category: &str) -> bool {
        self.has_permission(&CrudAction::Edit.on(category))
    }

    pub fn can_delete(&self, category: &str) -> bool {
        self.has_permission(&CrudAction::Delete.on(category))
    }

    /// Resolve a declarative requirement to a single boolean.
    pub fn satisfies(&self, requirement: &PermissionRequirement) -> bool {
        match requirement {
            PermissionRequirement::Single(name) => self.has_permission(name),
            PermissionRequirement::CategoryAction { category, action } => {
                self.can_perform(category, action)
            }
            PermissionRequirement::AnyOf(names) => self.has_any_permission(names),
            PermissionRequirement::AllOf(names) => self.has_all_permissions(names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn granted(names: &[&str]) -> AuthzEngine {
        AuthzEngine::new(
            names.iter().map(|n| PermissionName::from(*n)),
            AuthorizationSubject::default(),
        )
    }

    fn names(raw: &[&str]) -> Vec<PermissionName> {
        raw.iter().map(|n| PermissionName::from(*n)).collect()
    }

    #[test]
    fn membership_decides_for_non_admin() {
        let engine = granted(&["department_view", "department_edit"]);

        assert!(engine.has_permission(&"department_edit".into()));
        assert!(!engine.has_permission(&"department_delete".into()));
        assert!(engine.can_perform("department", "view"));
    }

    #[test]
    fn admin_bypasses_empty_grant_set() {
        let engine = AuthzEngine::new([], AuthorizationSubject::admin());

        assert!(engine.has_all_permissions(&names(&["role_delete", "area_delete"])));
        assert!(engine.has_permission(&"anything_at_all".into()));
        assert!(engine.can_delete("service"));
    }

    #[test]
    fn any_of_empty_is_false_even_for_admin_grants() {
        let engine = granted(&["department_view"]);
        assert!(!engine.has_any_permission(&[]));
    }

    #[test]
    fn all_of_empty_is_vacuously_true() {
        let engine = granted(&[]);
        assert!(engine.has_all_permissions(&[]));
    }

    #[test]
    fn any_of_needs_one_match() {
        let engine = granted(&["service_view"]);

        assert!(engine.has_any_permission(&names(&["service_view", "service_edit"])));
        assert!(!engine.has_any_permission(&names(&["service_edit", "service_delete"])));
    }

    #[test]
    fn all_of_needs_every_match() {
        let engine = granted(&["service_view", "service_edit"]);

        assert!(engine.has_all_permissions(&names(&["service_view", "service_edit"])));
        assert!(!engine.has_all_permissions(&names(&["service_view", "service_delete"])));
    }

    #[test]
    fn crud_shorthands_match_can_perform() {
        let engine = granted(&["inventory_view", "inventory_create"]);

        assert_eq!(engine.can_view("inventory"), engine.can_perform("inventory", "view"));
        assert!(engine.can_create("inventory"));
        assert!(!engine.can_edit("inventory"));
        assert!(!engine.can_delete("inventory"));
    }

    #[test]
    fn denying_engine_rejects_everything() {
        let engine = AuthzEngine::denying();

        assert!(!engine.has_permission(&"department_view".into()));
        assert!(!engine.can_view("department"));
        assert!(!engine.has_any_permission(&names(&["role_view"])));
    }

    #[test]
    fn satisfies_resolves_each_variant() {
        let engine = granted(&["department_edit", "role_view"]);

        assert!(engine.satisfies(&PermissionRequirement::single("department_edit")));
        assert!(engine.satisfies(&PermissionRequirement::category_action("role", "view")));
        assert!(engine.satisfies(&PermissionRequirement::AnyOf(names(&[
            "role_view",
            "role_delete"
        ]))));
        assert!(!engine.satisfies(&PermissionRequirement::AllOf(names(&[
            "role_view",
            "role_delete"
        ]))));
    }

    #[test]
    fn granted_names_are_sorted() {
        let engine = granted(&["role_view", "area_edit", "department_view"]);
        assert_eq!(
            engine.granted_names(),
            vec!["area_edit", "department_view", "role_view"]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: an admin subject is granted any permission name,
        /// whatever the granted set contains.
        #[test]
        fn admin_is_granted_everything(
            grants in prop::collection::vec("[a-z]{1,8}_[a-z]{1,8}", 0..8),
            probe in "[a-z]{1,8}_[a-z]{1,8}",
        ) {
            let engine = AuthzEngine::new(
                grants.iter().map(|g| PermissionName::from(g.clone())),
                AuthorizationSubject::admin(),
            );
            prop_assert!(engine.has_permission(&PermissionName::from(probe)));
        }

        /// Property: for non-admin subjects, has_permission is exactly set
        /// membership.
        #[test]
        fn non_admin_is_set_membership(
            grants in prop::collection::vec("[a-z]{1,8}_[a-z]{1,8}", 0..8),
            probe in "[a-z]{1,8}_[a-z]{1,8}",
        ) {
            let engine = AuthzEngine::new(
                grants.iter().map(|g| PermissionName::from(g.clone())),
                AuthorizationSubject::default(),
            );
            let expected = grants.contains(&probe);
            prop_assert_eq!(engine.has_permission(&PermissionName::from(probe)), expected);
        }

        /// Property: category+action queries and exact-name queries agree for
        /// underscore-free parts.
        #[test]
        fn can_perform_equals_built_name_query(
            category in "[a-z]{1,8}",
            action in "[a-z]{1,8}",
            extra in prop::collection::vec("[a-z]{1,8}_[a-z]{1,8}", 0..4),
        ) {
            let built = stagedesk_core::build_permission_name(&category, &action);
            let mut grants: Vec<PermissionName> =
                extra.iter().map(|g| PermissionName::from(g.clone())).collect();
            grants.push(built.clone());

            let engine = AuthzEngine::new(grants, AuthorizationSubject::default());
            prop_assert_eq!(
                engine.can_perform(&category, &action),
                engine.has_permission(&built)
            );
        }
    }
}
