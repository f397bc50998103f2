/*!
 * Grant Store
 */

use super::types::{Action, Effect, Grant, GrantKey};
use crate::core::errors::AdminError;
use crate::core::state::StateHandle;
use crate::core::types::{AdminResult, ResourceName, StoreResult};
use log::info;
use std::collections::BTreeMap;

/// Per-user permission map: resource → action → effect
///
/// The introspection shape consumed by admin tooling; BTreeMaps keep the
/// serialized output deterministic.
pub type PermissionMap = BTreeMap<ResourceName, BTreeMap<Action, Effect>>;

/// Store of explicit permission grants
#[derive(Clone)]
pub struct GrantStore {
    state: StateHandle,
}

impl GrantStore {
    pub fn new(state: StateHandle) -> Self {
        Self { state }
    }

    /// Upsert a grant
    ///
    /// Referential integrity is checked inside the commit: both the user
    /// and the resource must exist at publish time. Writing to an occupied
    /// key overwrites its effect (last writer wins).
    pub fn set_grant(
        &self,
        user_id: &str,
        resource: &str,
        action: Action,
        effect: Effect,
    ) -> AdminResult<Grant> {
        let key = GrantKey::new(user_id, resource, action);
        let grant = self.state.commit(move |state| {
            if !state.users.contains_key(&key.user_id) {
                return Err(AdminError::UnknownUser(key.user_id.clone()));
            }
            if !state.resources.contains_key(&key.resource) {
                return Err(AdminError::UnknownResource(key.resource.clone()));
            }
            state.grants.insert(key.clone(), effect);
            Ok(Grant::new(key, effect))
        })?;
        info!(
            "Set grant ({}, {}, {}) -> {}",
            grant.user_id, grant.resource, grant.action, grant.effect
        );
        Ok(grant)
    }

    /// Remove a grant; absence is not an error
    ///
    /// Returns whether a grant was present.
    pub fn revoke(&self, user_id: &str, resource: &str, action: Action) -> AdminResult<bool> {
        let key = GrantKey::new(user_id, resource, action);
        let removed = self
            .state
            .commit(move |state| Ok(state.grants.remove(&key).is_some()))?;
        if removed {
            info!("Revoked grant ({}, {}, {})", user_id, resource, action);
        }
        Ok(removed)
    }

    /// Effect of the explicit grant for a key, if one exists
    pub fn lookup(
        &self,
        user_id: &str,
        resource: &str,
        action: Action,
    ) -> StoreResult<Option<Effect>> {
        let key = GrantKey::new(user_id, resource, action);
        Ok(self.state.snapshot()?.grants.get(&key).copied())
    }

    /// All grants for a user, for introspection and audit
    pub fn grants_for(&self, user_id: &str) -> StoreResult<Vec<Grant>> {
        let snapshot = self.state.snapshot()?;
        let mut grants: Vec<Grant> = snapshot
            .grants
            .iter()
            .filter(|(key, _)| key.user_id == user_id)
            .map(|(key, effect)| Grant::new(key.clone(), *effect))
            .collect();
        grants.sort_by(|a, b| a.resource.cmp(&b.resource).then(a.action.cmp(&b.action)));
        Ok(grants)
    }

    /// A user's grants as resource → action → effect
    pub fn permission_map(&self, user_id: &str) -> StoreResult<PermissionMap> {
        let snapshot = self.state.snapshot()?;
        let mut map = PermissionMap::new();
        for (key, effect) in &snapshot.grants {
            if key.user_id == user_id {
                map.entry(key.resource.clone())
                    .or_default()
                    .insert(key.action, *effect);
            }
        }
        Ok(map)
    }
}
