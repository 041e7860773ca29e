//! Session state machine types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stagedesk_authz::{AuthzEngine, CatalogStats, PermissionCategory};

/// What the authentication layer hands over after a successful login.
///
/// Deliberately minimal: the session only needs an identity to fetch grants
/// for and a role to resolve the admin bypass from. Token lifecycle stays
/// with the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub role: String,
    pub display_name: String,
}

/// Where the session is in its lifecycle.
///
/// `Unauthenticated → Loading → Ready | Error`, and back to
/// `Unauthenticated` on logout. In every phase except `Ready` the committed
/// snapshot either denies everything or is the previous one (during a
/// refresh), so queries always fail closed rather than fail open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Unauthenticated,
    Loading,
    Ready,
    Error,
}

/// The mutable session state behind the lock.
#[derive(Debug)]
pub(crate) struct SessionState {
    /// Bumped on every login/logout/refresh. A fetch commits its result only
    /// if the epoch it started under is still current, so responses landing
    /// after a logout or a superseding refresh are dropped.
    pub epoch: u64,
    pub phase: SessionPhase,
    pub user: Option<AuthenticatedUser>,
    pub engine: AuthzEngine,
    pub categories: Vec<PermissionCategory>,
    pub stats: CatalogStats,
    pub error: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn unauthenticated() -> Self {
        Self {
            epoch: 0,
            phase: SessionPhase::Unauthenticated,
            user: None,
            engine: AuthzEngine::denying(),
            categories: Vec::new(),
            stats: CatalogStats::default(),
            error: None,
            loaded_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_denies() {
        let state = SessionState::unauthenticated();

        assert_eq!(state.phase, SessionPhase::Unauthenticated);
        assert!(state.user.is_none());
        assert!(!state.engine.can_view("department"));
        assert!(state.categories.is_empty());
        assert!(state.error.is_none());
    }
}
