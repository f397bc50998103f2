/*!
 * Core Types
 * Common types used across the gateway
 */

/// User identifier type
///
/// Opaque string handed out at user creation (UUID v4) or supplied by
/// seed data. Immutable for the lifetime of the user record.
pub type UserId = String;

/// Managed resource (table) name
pub type ResourceName = String;

/// Common result type for administrative operations
///
/// # Must Use
/// Administrative writes can fail validation and must be handled
#[must_use = "administrative operations can fail and must be handled"]
pub type AdminResult<T> = Result<T, super::errors::AdminError>;

/// Result type for read-path operations
///
/// The only failure is backing-store unavailability; absence of data is
/// modeled as `Option`/`Decision`, never as an error.
#[must_use = "store operations can fail and must be handled"]
pub type StoreResult<T> = Result<T, super::errors::StoreError>;
