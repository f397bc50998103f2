/*!
 * Identity Types
 * User records and the closed role enumeration
 */

use crate::core::errors::AdminError;
use crate::core::types::UserId;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

/// Closed set of user roles
///
/// Every write boundary validates against this set; free-form role
/// strings are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SystemAdmin,
    TenantAdmin,
    DataEditor,
    DataViewer,
}

impl Role {
    /// All roles, for iteration and validation messages
    pub const ALL: [Role; 4] = [
        Role::SystemAdmin,
        Role::TenantAdmin,
        Role::DataEditor,
        Role::DataViewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "system_admin",
            Role::TenantAdmin => "tenant_admin",
            Role::DataEditor => "data_editor",
            Role::DataViewer => "data_viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system_admin" => Ok(Role::SystemAdmin),
            "tenant_admin" => Ok(Role::TenantAdmin),
            "data_editor" => Ok(Role::DataEditor),
            "data_viewer" => Ok(Role::DataViewer),
            other => Err(AdminError::invalid_enum("role", other)),
        }
    }
}

/// A gateway user
///
/// `id` is unique and immutable; `role` is mutable through the admin
/// façade. An inactive user is denied every action regardless of grants.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    pub active: bool,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub created_at: SystemTime,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email,
            role,
            active: true,
            created_at: SystemTime::now(),
        }
    }
}
