//! Permission guard for non-interactive content blocks.

use stagedesk_authz::PermissionRequirement;
use stagedesk_session::AuthSession;

/// Gate around a block of content that is not a single clickable affordance.
///
/// Unlike [`crate::GatedButton`] there is no disabled state: guarded content
/// is either rendered, replaced by a configured fallback, or absent.
#[derive(Debug, Clone, Default)]
pub struct PermissionGuard {
    requirement: Option<PermissionRequirement>,
    has_fallback: bool,
}

/// Resolution outcome for a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Requirement satisfied (or absent): render the guarded content.
    Content,
    /// Unsatisfied, and a fallback node is configured: render it.
    Fallback,
    /// Unsatisfied, no fallback: render nothing.
    Hidden,
}

impl PermissionGuard {
    /// A guard with no requirement; always renders its content.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn require(requirement: PermissionRequirement) -> Self {
        Self {
            requirement: Some(requirement),
            has_fallback: false,
        }
    }

    /// Render an explicit fallback node instead of nothing when unsatisfied.
    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    pub fn resolve(&self, session: &AuthSession) -> GuardDecision {
        let satisfied = match &self.requirement {
            None => true,
            Some(req) => session.satisfies(req),
        };

        if satisfied {
            GuardDecision::Content
        } else if self.has_fallback {
            GuardDecision::Fallback
        } else {
            GuardDecision::Hidden
        }
    }
}
