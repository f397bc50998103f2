/*!
 * Tablegate Library
 * Permission model and authorization-decision engine for managed tables
 *
 * The crate answers one question: may user U perform action A on
 * resource R? It keeps three relations (users, resources, grants) in an
 * in-memory store with snapshot reads and atomic commits. The admin
 * façade is the only writer; the authorization engine is the read path
 * consumed by data-access middleware.
 */

pub mod admin;
pub mod audit;
pub mod authz;
pub mod config;
pub mod core;
pub mod grants;
pub mod identity;
pub mod monitoring;
pub mod registry;

// Re-exports
pub use admin::AdminFacade;
pub use audit::{AuditEvent, AuditLogger, AuditSeverity, AuditStats};
pub use authz::{AccessChecker, AccessRequest, AuthzEngine, Decision, ReasonCode, RolePolicy};
pub use config::{GatewayConfig, SeedData};
pub use crate::core::errors::{AdminError, StoreError};
pub use crate::core::state::StateHandle;
pub use crate::core::types::{AdminResult, ResourceName, StoreResult, UserId};
pub use grants::{Action, Effect, Grant, GrantKey, GrantStore, PermissionMap};
pub use identity::{IdentityStore, Role, User};
pub use monitoring::{init_tracing, probe, HealthReport, HealthStatus};
pub use registry::{Resource, ResourceRegistry};
