/*!
 * Role Default Policy
 * The fallback permission table applied when no explicit grant exists
 *
 * Kept independent of storage: evaluation is a pure (role, action) → bool
 * lookup against an immutable table fixed at construction time. The
 * shipped defaults cover the built-in roles; deployments override the
 * table through configuration (TenantAdmin scoping in particular is a
 * deployment decision, not a hard-coded rule).
 */

use crate::grants::Action;
use crate::identity::Role;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-role default action sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePolicy {
    actions: BTreeMap<Role, BTreeSet<Action>>,
}

impl RolePolicy {
    /// Empty policy: every role defaults to no actions
    pub fn deny_all() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Replace the default action set for one role
    pub fn with_role_actions(
        mut self,
        role: Role,
        actions: impl IntoIterator<Item = Action>,
    ) -> Self {
        self.actions.insert(role, actions.into_iter().collect());
        self
    }

    /// Whether `role` may perform `action` on a managed resource absent
    /// an explicit grant
    pub fn allows(&self, role: Role, action: Action) -> bool {
        self.actions
            .get(&role)
            .map(|set| set.contains(&action))
            .unwrap_or(false)
    }

    /// Default action set for a role, for introspection
    pub fn actions_for(&self, role: Role) -> BTreeSet<Action> {
        self.actions.get(&role).cloned().unwrap_or_default()
    }
}

impl Default for RolePolicy {
    /// Shipped defaults: admins get every action, editors read and write,
    /// viewers read. TenantAdmin mirrors SystemAdmin until a deployment
    /// narrows it via configuration.
    fn default() -> Self {
        Self::deny_all()
            .with_role_actions(Role::SystemAdmin, Action::ALL)
            .with_role_actions(Role::TenantAdmin, Action::ALL)
            .with_role_actions(
                Role::DataEditor,
                [Action::Select, Action::Insert, Action::Update],
            )
            .with_role_actions(Role::DataViewer, [Action::Select])
    }
}
