//! Permission-gated action button.

use stagedesk_authz::PermissionRequirement;
use stagedesk_core::PermissionName;
use stagedesk_session::AuthSession;

/// Declarative description of an action button and its permission gate.
///
/// The requirement can be given three ways, with explicit precedence when
/// several are set: an exact `permission` name wins over a
/// `category` + `action` pair, which wins over a `permissions` list. No
/// requirement at all means the button is always allowed.
#[derive(Debug, Clone, Default)]
pub struct GatedButton {
    label: String,
    permission: Option<PermissionName>,
    category_action: Option<(String, String)>,
    permissions: Vec<PermissionName>,
    require_all: bool,
    disabled: bool,
    hide_if_no_permission: bool,
    show_permission_tooltip: bool,
}

/// What the view layer should render for a gated control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    /// Unsatisfied requirement with the hide policy: render nothing.
    Hidden,
    Visible {
        enabled: bool,
        /// Denial reason, present only under the tooltip policy.
        tooltip: Option<String>,
    },
}

impl ControlState {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Visible { enabled: true, .. })
    }

    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Self::Visible { tooltip, .. } => tooltip.as_deref(),
            Self::Hidden => None,
        }
    }
}

impl GatedButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn permission(mut self, name: impl Into<PermissionName>) -> Self {
        self.permission = Some(name.into());
        self
    }

    pub fn category_action(mut self, category: impl Into<String>, action: impl Into<String>) -> Self {
        self.category_action = Some((category.into(), action.into()));
        self
    }

    pub fn permissions(mut self, names: impl IntoIterator<Item = PermissionName>) -> Self {
        self.permissions = names.into_iter().collect();
        self
    }

    /// Require every listed permission instead of any one of them.
    pub fn require_all(mut self, yes: bool) -> Self {
        self.require_all = yes;
        self
    }

    /// Caller-side disable, OR-ed with the permission outcome.
    pub fn disabled(mut self, yes: bool) -> Self {
        self.disabled = yes;
        self
    }

    pub fn hide_if_no_permission(mut self, yes: bool) -> Self {
        self.hide_if_no_permission = yes;
        self
    }

    pub fn show_permission_tooltip(mut self, yes: bool) -> Self {
        self.show_permission_tooltip = yes;
        self
    }

    /// Normalize the prop shapes into one requirement, applying precedence.
    ///
    /// An empty `permissions` list normalizes to "no requirement" rather
    /// than an empty `AllOf`, so the all-of vacuous truth cannot leak in
    /// through a forgotten list.
    pub fn requirement(&self) -> Option<PermissionRequirement> {
        if let Some(name) = &self.permission {
            return Some(PermissionRequirement::Single(name.clone()));
        }
        if let Some((category, action)) = &self.category_action {
            return Some(PermissionRequirement::CategoryAction {
                category: category.clone(),
                action: action.clone(),
            });
        }
        if self.permissions.is_empty() {
            return None;
        }
        Some(if self.require_all {
            PermissionRequirement::AllOf(self.permissions.clone())
        } else {
            PermissionRequirement::AnyOf(self.permissions.clone())
        })
    }

    /// Decide render state against the current session snapshot.
    pub fn resolve(&self, session: &AuthSession) -> ControlState {
        let denied = match self.requirement() {
            None => None,
            Some(req) => {
                if session.satisfies(&req) {
                    None
                } else {
                    Some(req)
                }
            }
        };

        match denied {
            Some(_) if self.hide_if_no_permission => ControlState::Hidden,
            Some(req) => ControlState::Visible {
                enabled: false,
                tooltip: self
                    .show_permission_tooltip
                    .then(|| format!("Requires permission: {}", req.describe())),
            },
            None => ControlState::Visible {
                enabled: !self.disabled,
                tooltip: None,
            },
        }
    }
}
