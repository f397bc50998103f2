/*!
 * Authorization Engine
 * Central decision procedure for all table access
 */

use super::policy::RolePolicy;
use super::traits::AccessChecker;
use super::types::{AccessRequest, Decision, ReasonCode};
use crate::audit::{AuditEvent, AuditLogger, AuditStats};
use crate::core::state::StateHandle;
use crate::core::types::StoreResult;
use crate::grants::GrantKey;
use log::{debug, warn};
use std::sync::Arc;

/// Evaluates access decisions from role defaults and explicit grants
///
/// Every call re-evaluates against the current committed snapshot;
/// decisions are never cached, so a revocation is effective on the very
/// next request. Evaluation short-circuits in a fixed order: inactive or
/// unknown user (absolute veto), unknown resource, explicit grant,
/// role default.
#[derive(Clone)]
pub struct AuthzEngine {
    state: StateHandle,
    policy: Arc<RolePolicy>,
    audit: Arc<AuditLogger>,
}

impl AuthzEngine {
    /// Create an engine with the shipped role defaults
    pub fn new(state: StateHandle) -> Self {
        debug!("Initializing authorization engine");
        Self {
            state,
            policy: Arc::new(RolePolicy::default()),
            audit: Arc::new(AuditLogger::new()),
        }
    }

    /// Create an engine with a deployment-supplied role-default table
    pub fn with_policy(state: StateHandle, policy: RolePolicy) -> Self {
        Self {
            state,
            policy: Arc::new(policy),
            audit: Arc::new(AuditLogger::new()),
        }
    }

    /// The role-default table in effect
    pub fn policy(&self) -> &RolePolicy {
        &self.policy
    }

    /// Get audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Get audit statistics
    pub fn audit_stats(&self) -> AuditStats {
        self.audit.stats()
    }

    fn evaluate(&self, request: &AccessRequest) -> StoreResult<Decision> {
        // One snapshot per decision: the request observes either all of a
        // concurrent commit or none of it.
        let state = self.state.snapshot()?;

        let user = match state.users.get(&request.user_id) {
            Some(user) if user.active => user,
            _ => {
                warn!(
                    "Denied {} on '{}' for '{}': user inactive or unknown",
                    request.action, request.resource, request.user_id
                );
                return Ok(Decision::deny(
                    request.clone(),
                    ReasonCode::UserInactiveOrUnknown,
                ));
            }
        };

        if !state.resources.contains_key(&request.resource) {
            warn!(
                "Denied {} on '{}' for '{}': unknown resource",
                request.action, request.resource, request.user_id
            );
            return Ok(Decision::deny(request.clone(), ReasonCode::UnknownResource));
        }

        let key = GrantKey::new(
            request.user_id.clone(),
            request.resource.clone(),
            request.action,
        );
        if let Some(effect) = state.grants.get(&key) {
            debug!(
                "Explicit grant decides {} on '{}' for '{}': {}",
                request.action, request.resource, request.user_id, effect
            );
            return Ok(if effect.is_allow() {
                Decision::allow(request.clone(), ReasonCode::ExplicitGrant)
            } else {
                Decision::deny(request.clone(), ReasonCode::ExplicitGrant)
            });
        }

        if self.policy.allows(user.role, request.action) {
            debug!(
                "Role default allows {} on '{}' for '{}' ({})",
                request.action, request.resource, request.user_id, user.role
            );
            Ok(Decision::allow(request.clone(), ReasonCode::RoleDefault))
        } else {
            debug!(
                "Role default denies {} on '{}' for '{}' ({})",
                request.action, request.resource, request.user_id, user.role
            );
            Ok(Decision::deny(request.clone(), ReasonCode::RoleDefault))
        }
    }
}

impl AccessChecker for AuthzEngine {
    fn authorize(&self, request: &AccessRequest) -> StoreResult<Decision> {
        self.evaluate(request)
    }

    fn authorize_and_audit(&self, request: &AccessRequest) -> StoreResult<Decision> {
        let decision = self.evaluate(request)?;
        self.audit.log(AuditEvent::new(decision.clone()));
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grants::{Action, Effect, GrantStore};
    use crate::identity::{IdentityStore, Role};
    use crate::registry::ResourceRegistry;

    fn setup() -> (StateHandle, String) {
        let state = StateHandle::new();
        let users = IdentityStore::new(state.clone());
        let registry = ResourceRegistry::new(state.clone());

        let alice = users.create_user("Alice", None, Role::DataViewer).unwrap();
        registry.register("orders", "Order line items").unwrap();
        (state, alice.id)
    }

    #[test]
    fn test_role_default_allows_viewer_select() {
        let (state, alice) = setup();
        let engine = AuthzEngine::new(state);

        let decision = engine
            .authorize(&AccessRequest::select(alice, "orders"))
            .unwrap();
        assert!(decision.is_allowed());
        assert_eq!(decision.reason(), ReasonCode::RoleDefault);
    }

    #[test]
    fn test_role_default_denies_viewer_delete() {
        let (state, alice) = setup();
        let engine = AuthzEngine::new(state);

        let decision = engine
            .authorize(&AccessRequest::delete(alice, "orders"))
            .unwrap();
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason(), ReasonCode::RoleDefault);
    }

    #[test]
    fn test_explicit_grant_overrides_default() {
        let (state, alice) = setup();
        let grants = GrantStore::new(state.clone());
        grants
            .set_grant(&alice, "orders", Action::Select, Effect::Deny)
            .unwrap();
        let engine = AuthzEngine::new(state);

        let decision = engine
            .authorize(&AccessRequest::select(alice, "orders"))
            .unwrap();
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason(), ReasonCode::ExplicitGrant);
    }

    #[test]
    fn test_unknown_user_denied() {
        let (state, _) = setup();
        let engine = AuthzEngine::new(state);

        let decision = engine
            .authorize(&AccessRequest::select("ghost", "orders"))
            .unwrap();
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason(), ReasonCode::UserInactiveOrUnknown);
    }

    #[test]
    fn test_unknown_resource_denied() {
        let (state, alice) = setup();
        let engine = AuthzEngine::new(state);

        let decision = engine
            .authorize(&AccessRequest::select(alice, "invoices"))
            .unwrap();
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason(), ReasonCode::UnknownResource);
    }

    #[test]
    fn test_inactive_user_veto_beats_grant() {
        let (state, alice) = setup();
        let users = IdentityStore::new(state.clone());
        let grants = GrantStore::new(state.clone());
        grants
            .set_grant(&alice, "orders", Action::Select, Effect::Allow)
            .unwrap();
        users.deactivate(&alice).unwrap();
        let engine = AuthzEngine::new(state);

        let decision = engine
            .authorize(&AccessRequest::select(alice, "orders"))
            .unwrap();
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason(), ReasonCode::UserInactiveOrUnknown);
    }

    #[test]
    fn test_audit_records_decision() {
        let (state, alice) = setup();
        let engine = AuthzEngine::new(state);

        engine
            .authorize_and_audit(&AccessRequest::delete(alice, "orders"))
            .unwrap();

        let stats = engine.audit_stats();
        assert_eq!(stats.total_events, 1);
        assert_eq!(stats.total_denials, 1);
    }

    #[test]
    fn test_closed_store_is_an_error_not_a_decision() {
        let (state, alice) = setup();
        let engine = AuthzEngine::new(state.clone());
        state.close();

        assert!(engine
            .authorize(&AccessRequest::select(alice, "orders"))
            .is_err());
    }

    #[test]
    fn test_batch() {
        let (state, alice) = setup();
        let engine = AuthzEngine::new(state);

        let requests = vec![
            AccessRequest::select(alice.clone(), "orders"),
            AccessRequest::delete(alice, "orders"),
        ];
        let decisions = engine.authorize_batch(&requests).unwrap();
        assert_eq!(decisions.len(), 2);
        assert!(decisions[0].is_allowed());
        assert!(!decisions[1].is_allowed());
    }
}
