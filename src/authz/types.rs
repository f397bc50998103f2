/*!
 * Authorization Types
 * Access requests and the decisions produced for them
 */

use crate::core::types::{ResourceName, UserId};
use crate::grants::Action;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::fmt;
use std::time::SystemTime;

/// One access attempt: may `user_id` perform `action` on `resource`?
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AccessRequest {
    pub user_id: UserId,
    pub resource: ResourceName,
    pub action: Action,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub requested_at: SystemTime,
}

impl AccessRequest {
    pub fn new(
        user_id: impl Into<UserId>,
        resource: impl Into<ResourceName>,
        action: Action,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            resource: resource.into(),
            action,
            requested_at: SystemTime::now(),
        }
    }

    pub fn select(user_id: impl Into<UserId>, resource: impl Into<ResourceName>) -> Self {
        Self::new(user_id, resource, Action::Select)
    }

    pub fn insert(user_id: impl Into<UserId>, resource: impl Into<ResourceName>) -> Self {
        Self::new(user_id, resource, Action::Insert)
    }

    pub fn update(user_id: impl Into<UserId>, resource: impl Into<ResourceName>) -> Self {
        Self::new(user_id, resource, Action::Update)
    }

    pub fn delete(user_id: impl Into<UserId>, resource: impl Into<ResourceName>) -> Self {
        Self::new(user_id, resource, Action::Delete)
    }
}

/// Why a decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// The user is unknown or deactivated; an absolute veto
    UserInactiveOrUnknown,
    /// The resource is not managed by the gateway
    UnknownResource,
    /// An explicit grant decided the outcome
    ExplicitGrant,
    /// The role-default policy decided the outcome
    RoleDefault,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::UserInactiveOrUnknown => "user_inactive_or_unknown",
            ReasonCode::UnknownResource => "unknown_resource",
            ReasonCode::ExplicitGrant => "explicit_grant",
            ReasonCode::RoleDefault => "role_default",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an authorization request
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Decision {
    /// Request that was evaluated
    pub request: AccessRequest,
    /// Whether the action is allowed
    pub allowed: bool,
    /// Reason for the outcome
    pub reason: ReasonCode,
    /// Decision time
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub decided_at: SystemTime,
}

impl Decision {
    pub fn allow(request: AccessRequest, reason: ReasonCode) -> Self {
        Self {
            request,
            allowed: true,
            reason,
            decided_at: SystemTime::now(),
        }
    }

    pub fn deny(request: AccessRequest, reason: ReasonCode) -> Self {
        Self {
            request,
            allowed: false,
            reason,
            decided_at: SystemTime::now(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn reason(&self) -> ReasonCode {
        self.reason
    }
}
