/*!
 * Grant Types
 * The permission matrix: user × resource × action → effect
 */

use crate::core::errors::AdminError;
use crate::core::types::{ResourceName, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of table actions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Select,
    Insert,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Select, Action::Insert, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Select => "select",
            Action::Insert => "insert",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Action::Select),
            "insert" => Ok(Action::Insert),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(AdminError::invalid_enum("action", other)),
        }
    }
}

/// Closed set of grant effects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn is_allow(&self) -> bool {
        matches!(self, Effect::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Allow => "allow",
            Effect::Deny => "deny",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Effect::Allow),
            "deny" => Ok(Effect::Deny),
            other => Err(AdminError::invalid_enum("effect", other)),
        }
    }
}

/// Composite key of the grant relation
///
/// At most one grant exists per key; writing to an occupied key replaces
/// its effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GrantKey {
    pub user_id: UserId,
    pub resource: ResourceName,
    pub action: Action,
}

impl GrantKey {
    pub fn new(
        user_id: impl Into<UserId>,
        resource: impl Into<ResourceName>,
        action: Action,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            resource: resource.into(),
            action,
        }
    }
}

/// One explicit per-user, per-resource, per-action override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Grant {
    pub user_id: UserId,
    pub resource: ResourceName,
    pub action: Action,
    pub effect: Effect,
}

impl Grant {
    pub fn new(key: GrantKey, effect: Effect) -> Self {
        Self {
            user_id: key.user_id,
            resource: key.resource,
            action: key.action,
            effect,
        }
    }

    pub fn key(&self) -> GrantKey {
        GrantKey::new(self.user_id.clone(), self.resource.clone(), self.action)
    }
}
