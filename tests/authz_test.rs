/*!
 * Authorization Engine Integration Tests
 */

use pretty_assertions::assert_eq;
use tablegate::{
    AccessChecker, AccessRequest, Action, AdminFacade, AuthzEngine, Effect, ReasonCode, Role,
    RolePolicy, StateHandle,
};

fn gateway() -> (StateHandle, AdminFacade, AuthzEngine) {
    let state = StateHandle::new();
    let admin = AdminFacade::new(state.clone());
    let engine = AuthzEngine::new(state.clone());
    (state, admin, engine)
}

#[test]
fn test_viewer_scenario_end_to_end() {
    let (_, admin, engine) = gateway();
    let alice = admin.create_user("Alice", None, Role::DataViewer).unwrap();
    admin.register_resource("orders", "Order line items").unwrap();

    // Role default: viewers may read
    let decision = engine
        .authorize(&AccessRequest::select(alice.id.clone(), "orders"))
        .unwrap();
    assert!(decision.is_allowed());
    assert_eq!(decision.reason(), ReasonCode::RoleDefault);

    // Explicit DENY overrides the default
    admin
        .set_grant(&alice.id, "orders", Action::Select, Effect::Deny)
        .unwrap();
    let decision = engine
        .authorize(&AccessRequest::select(alice.id.clone(), "orders"))
        .unwrap();
    assert!(!decision.is_allowed());
    assert_eq!(decision.reason(), ReasonCode::ExplicitGrant);

    // Deactivation vetoes everything
    admin.deactivate(&alice.id).unwrap();
    let decision = engine
        .authorize(&AccessRequest::select(alice.id, "orders"))
        .unwrap();
    assert!(!decision.is_allowed());
    assert_eq!(decision.reason(), ReasonCode::UserInactiveOrUnknown);
}

#[test]
fn test_inactive_user_is_denied_every_action() {
    let (_, admin, engine) = gateway();
    let user = admin.create_user("Mallory", None, Role::SystemAdmin).unwrap();
    admin.register_resource("orders", "").unwrap();
    admin.register_resource("inventory", "").unwrap();
    for action in Action::ALL {
        admin
            .set_grant(&user.id, "orders", action, Effect::Allow)
            .unwrap();
    }
    admin.deactivate(&user.id).unwrap();

    for resource in ["orders", "inventory"] {
        for action in Action::ALL {
            let decision = engine
                .authorize(&AccessRequest::new(user.id.clone(), resource, action))
                .unwrap();
            assert!(!decision.is_allowed(), "{action} on {resource} must be denied");
            assert_eq!(decision.reason(), ReasonCode::UserInactiveOrUnknown);
        }
    }
}

#[test]
fn test_explicit_allow_overrides_default_deny() {
    let (_, admin, engine) = gateway();
    let viewer = admin.create_user("Vik", None, Role::DataViewer).unwrap();
    admin.register_resource("inventory", "").unwrap();

    // Viewers cannot insert by default
    let decision = engine
        .authorize(&AccessRequest::insert(viewer.id.clone(), "inventory"))
        .unwrap();
    assert!(!decision.is_allowed());

    admin
        .set_grant(&viewer.id, "inventory", Action::Insert, Effect::Allow)
        .unwrap();
    let decision = engine
        .authorize(&AccessRequest::insert(viewer.id.clone(), "inventory"))
        .unwrap();
    assert!(decision.is_allowed());
    assert_eq!(decision.reason(), ReasonCode::ExplicitGrant);

    // Revocation falls back to the role default on the next call
    admin.revoke(&viewer.id, "inventory", Action::Insert).unwrap();
    let decision = engine
        .authorize(&AccessRequest::insert(viewer.id, "inventory"))
        .unwrap();
    assert!(!decision.is_allowed());
    assert_eq!(decision.reason(), ReasonCode::RoleDefault);
}

#[test]
fn test_unknown_identities_fail_closed() {
    let (_, admin, engine) = gateway();
    let user = admin.create_user("Alice", None, Role::SystemAdmin).unwrap();
    admin.register_resource("orders", "").unwrap();

    let decision = engine
        .authorize(&AccessRequest::select("ghost", "orders"))
        .unwrap();
    assert!(!decision.is_allowed());
    assert_eq!(decision.reason(), ReasonCode::UserInactiveOrUnknown);

    let decision = engine
        .authorize(&AccessRequest::select(user.id, "not_managed"))
        .unwrap();
    assert!(!decision.is_allowed());
    assert_eq!(decision.reason(), ReasonCode::UnknownResource);
}

#[test]
fn test_role_change_takes_effect_immediately() {
    let (_, admin, engine) = gateway();
    let user = admin.create_user("Edith", None, Role::DataViewer).unwrap();
    admin.register_resource("orders", "").unwrap();

    assert!(!engine
        .authorize(&AccessRequest::update(user.id.clone(), "orders"))
        .unwrap()
        .is_allowed());

    admin.set_role(&user.id, Role::DataEditor).unwrap();
    assert!(engine
        .authorize(&AccessRequest::update(user.id, "orders"))
        .unwrap()
        .is_allowed());
}

#[test]
fn test_configured_tenant_admin_scope() {
    let state = StateHandle::new();
    let admin = AdminFacade::new(state.clone());
    let policy =
        RolePolicy::default().with_role_actions(Role::TenantAdmin, [Action::Select, Action::Update]);
    let engine = AuthzEngine::with_policy(state, policy);

    let tenant = admin.create_user("Toni", None, Role::TenantAdmin).unwrap();
    admin.register_resource("orders", "").unwrap();

    assert!(engine
        .authorize(&AccessRequest::update(tenant.id.clone(), "orders"))
        .unwrap()
        .is_allowed());
    assert!(!engine
        .authorize(&AccessRequest::delete(tenant.id, "orders"))
        .unwrap()
        .is_allowed());
}

#[test]
fn test_closed_store_surfaces_unavailable_not_a_decision() {
    let (state, admin, engine) = gateway();
    let user = admin.create_user("Alice", None, Role::SystemAdmin).unwrap();
    admin.register_resource("orders", "").unwrap();
    state.close();

    // The caller gets an error to apply its own failure policy to; the
    // engine never invents an ALLOW (or a DENY) it cannot justify
    let result = engine.authorize(&AccessRequest::select(user.id, "orders"));
    assert!(result.is_err());
}

#[test]
fn test_audit_trail_accumulates() {
    let (_, admin, engine) = gateway();
    let user = admin.create_user("Vik", None, Role::DataViewer).unwrap();
    admin.register_resource("orders", "").unwrap();

    engine
        .authorize_and_audit(&AccessRequest::select(user.id.clone(), "orders"))
        .unwrap();
    engine
        .authorize_and_audit(&AccessRequest::delete(user.id.clone(), "orders"))
        .unwrap();
    engine
        .authorize_and_audit(&AccessRequest::delete(user.id.clone(), "orders"))
        .unwrap();

    let stats = engine.audit_stats();
    assert_eq!(stats.total_events, 3);
    assert_eq!(stats.total_denials, 2);
    assert_eq!(engine.audit().denial_count(&user.id), 2);
}
