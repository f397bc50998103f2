/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::{ResourceName, UserId};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Backing-store errors with serialization support
///
/// Unavailability is the one transient condition the gateway reports.
/// It is surfaced as an error distinct from any permission outcome so
/// the calling middleware can apply its own fail-open/fail-closed policy.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum StoreError {
    #[error("Store '{0}' is unavailable")]
    #[diagnostic(
        code(store::unavailable),
        help("The backing store is closed or unreachable. Retry once it is back, or apply the middleware's configured failure policy.")
    )]
    Unavailable(String),
}

/// Administrative validation errors with serialization support
///
/// All variants are local validation failures surfaced synchronously to
/// the caller; none are transient, so none are retried automatically.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum AdminError {
    #[error("User '{0}' already exists")]
    #[diagnostic(
        code(admin::duplicate_user),
        help("A user with this display name already exists. Pick a different name or disable unique-name enforcement.")
    )]
    DuplicateUser(String),

    #[error("Resource '{0}' is already registered")]
    #[diagnostic(
        code(admin::duplicate_resource),
        help("A resource with this name is already managed. Resource names are unique and immutable.")
    )]
    DuplicateResource(ResourceName),

    #[error("Unknown user '{0}'")]
    #[diagnostic(
        code(admin::unknown_user),
        help("No user record with this id exists. The user may have been removed.")
    )]
    UnknownUser(UserId),

    #[error("Unknown resource '{0}'")]
    #[diagnostic(
        code(admin::unknown_resource),
        help("No managed resource with this name exists. Register it before granting permissions on it.")
    )]
    UnknownResource(ResourceName),

    #[error("Invalid {field}: '{value}'")]
    #[diagnostic(
        code(admin::invalid_enum),
        help("Role, action, and effect are closed enumerations. Check the accepted values for this field.")
    )]
    InvalidEnum { field: String, value: String },

    #[error("Store error: {0}")]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

impl AdminError {
    /// Construct an `InvalidEnum` for a rejected enumeration value
    pub fn invalid_enum(field: impl Into<String>, value: impl Into<String>) -> Self {
        AdminError::InvalidEnum {
            field: field.into(),
            value: value.into(),
        }
    }
}
