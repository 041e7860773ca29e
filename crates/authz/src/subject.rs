//! Authorization subject derived from the authenticated user.

use serde::{Deserialize, Serialize};

/// Role name whose holders bypass permission checks entirely.
pub const ADMIN_ROLE: &str = "admin";

/// What authorization needs to know about the current session's user.
///
/// The admin bypass is resolved **once** here, at session-load time, rather
/// than compared against the role string inside every predicate. If role
/// naming changes, this is the only place that notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthorizationSubject {
    pub is_admin: bool,
}

impl AuthorizationSubject {
    pub fn from_role(role: &str) -> Self {
        Self {
            is_admin: role == ADMIN_ROLE,
        }
    }

    pub fn admin() -> Self {
        Self { is_admin: true }
    }
}
