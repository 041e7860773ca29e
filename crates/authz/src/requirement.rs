//! Declarative permission requirements for gated UI elements.

use serde::{Deserialize, Serialize};

use stagedesk_core::{PermissionName, build_permission_name};

/// What a gated control needs before it may show or enable itself.
///
/// Callers construct one of these; the engine resolves it. Modeling the
/// mutually exclusive prop shapes as a tagged variant makes the precedence
/// among them explicit at the construction site instead of implicit in
/// evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRequirement {
    /// An exact permission name.
    Single(PermissionName),
    /// A `(category, action)` pair, composed through the codec.
    CategoryAction { category: String, action: String },
    /// At least one of the listed permissions.
    AnyOf(Vec<PermissionName>),
    /// Every one of the listed permissions.
    AllOf(Vec<PermissionName>),
}

impl PermissionRequirement {
    pub fn single(name: impl Into<PermissionName>) -> Self {
        Self::Single(name.into())
    }

    pub fn category_action(category: impl Into<String>, action: impl Into<String>) -> Self {
        Self::CategoryAction {
            category: category.into(),
            action: action.into(),
        }
    }

    /// Human-readable description of what is missing, for tooltips.
    pub fn describe(&self) -> String {
        match self {
            Self::Single(name) => name.to_string(),
            Self::CategoryAction { category, action } => {
                build_permission_name(category, action).to_string()
            }
            Self::AnyOf(names) => format!("any of {}", join_names(names)),
            Self::AllOf(names) => join_names(names),
        }
    }
}

fn join_names(names: &[PermissionName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_single_is_the_bare_name() {
        let req = PermissionRequirement::single("template_create");
        assert_eq!(req.describe(), "template_create");
    }

    #[test]
    fn describe_category_action_goes_through_codec() {
        let req = PermissionRequirement::category_action("department", "edit");
        assert_eq!(req.describe(), "department_edit");
    }

    #[test]
    fn describe_lists() {
        let any = PermissionRequirement::AnyOf(vec![
            PermissionName::new("role_edit"),
            PermissionName::new("role_delete"),
        ]);
        assert_eq!(any.describe(), "any of role_edit, role_delete");

        let all = PermissionRequirement::AllOf(vec![
            PermissionName::new("role_edit"),
            PermissionName::new("role_delete"),
        ]);
        assert_eq!(all.describe(), "role_edit, role_delete");
    }
}
