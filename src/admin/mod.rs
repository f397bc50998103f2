/*!
 * Admin Façade
 * The single writer of the identity, resource, and grant relations
 *
 * Wraps the stores with transactional semantics: any administrative
 * request that touches multiple relations (cascading deletes, bulk grant
 * replacement, seeding) is applied in one commit, so authorization
 * readers never observe a partial cascade.
 */

use crate::config::SeedData;
use crate::core::errors::AdminError;
use crate::core::state::StateHandle;
use crate::core::types::{AdminResult, StoreResult, UserId};
use crate::grants::{Action, Effect, Grant, GrantStore, PermissionMap};
use crate::identity::{IdentityStore, Role, User};
use crate::registry::{Resource, ResourceRegistry};
use log::info;

/// Administrative entry point over the gateway's stores
#[derive(Clone)]
pub struct AdminFacade {
    state: StateHandle,
    users: IdentityStore,
    resources: ResourceRegistry,
    grants: GrantStore,
}

impl AdminFacade {
    pub fn new(state: StateHandle) -> Self {
        Self {
            users: IdentityStore::new(state.clone()),
            resources: ResourceRegistry::new(state.clone()),
            grants: GrantStore::new(state.clone()),
            state,
        }
    }

    /// Enforce unique display names on user creation
    pub fn with_unique_names(mut self, required: bool) -> Self {
        self.users = self.users.with_unique_names(required);
        self
    }

    // --- Identity ---

    pub fn create_user(
        &self,
        name: impl Into<String>,
        email: Option<String>,
        role: Role,
    ) -> AdminResult<User> {
        self.users.create_user(name, email, role)
    }

    pub fn set_role(&self, id: &str, role: Role) -> AdminResult<()> {
        self.users.set_role(id, role)
    }

    pub fn deactivate(&self, id: &str) -> AdminResult<()> {
        self.users.deactivate(id)
    }

    pub fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        self.users.get(id)
    }

    pub fn list_users(&self) -> StoreResult<Vec<User>> {
        self.users.list()
    }

    /// Remove a user and every grant referencing them, atomically
    ///
    /// Returns whether the user existed.
    pub fn remove_user(&self, id: &str) -> AdminResult<bool> {
        let removed = self.state.commit(|state| {
            if state.users.remove(id).is_none() {
                return Ok(false);
            }
            state.grants.retain(|key, _| key.user_id != id);
            Ok(true)
        })?;
        if removed {
            info!("Removed user {} and cascaded their grants", id);
        }
        Ok(removed)
    }

    // --- Resources ---

    pub fn register_resource(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AdminResult<Resource> {
        self.resources.register(name, description)
    }

    pub fn unregister_resource(&self, name: &str) -> AdminResult<bool> {
        self.resources.unregister(name)
    }

    pub fn list_resources(&self) -> StoreResult<Vec<Resource>> {
        self.resources.list()
    }

    pub fn resource_exists(&self, name: &str) -> StoreResult<bool> {
        self.resources.exists(name)
    }

    // --- Grants ---

    pub fn set_grant(
        &self,
        user_id: &str,
        resource: &str,
        action: Action,
        effect: Effect,
    ) -> AdminResult<Grant> {
        self.grants.set_grant(user_id, resource, action, effect)
    }

    pub fn revoke(&self, user_id: &str, resource: &str, action: Action) -> AdminResult<bool> {
        self.grants.revoke(user_id, resource, action)
    }

    pub fn grants_for(&self, user_id: &str) -> StoreResult<Vec<Grant>> {
        self.grants.grants_for(user_id)
    }

    pub fn permission_map(&self, user_id: &str) -> StoreResult<PermissionMap> {
        self.grants.permission_map(user_id)
    }

    /// Replace a user's entire grant set in one commit
    ///
    /// Existing grants for the user are dropped and the supplied map is
    /// installed in their place; readers observe either the old set or
    /// the new one, never an empty in-between.
    pub fn replace_grants(&self, user_id: &UserId, map: &PermissionMap) -> AdminResult<usize> {
        let user_id = user_id.clone();
        let map = map.clone();
        let installed = self.state.commit(move |state| {
            if !state.users.contains_key(&user_id) {
                return Err(AdminError::UnknownUser(user_id.clone()));
            }
            for resource in map.keys() {
                if !state.resources.contains_key(resource) {
                    return Err(AdminError::UnknownResource(resource.clone()));
                }
            }

            state.grants.retain(|key, _| key.user_id != user_id);
            let mut installed = 0;
            for (resource, actions) in &map {
                for (action, effect) in actions {
                    state.grants.insert(
                        crate::grants::GrantKey::new(user_id.clone(), resource.clone(), *action),
                        *effect,
                    );
                    installed += 1;
                }
            }
            Ok(installed)
        })?;
        info!("Replaced grants ({} installed)", installed);
        Ok(installed)
    }

    // --- Seeding ---

    /// Populate an empty gateway from deployment seed data
    ///
    /// Idempotent: a gateway that already holds users is left untouched.
    /// Returns whether the seed was applied.
    pub fn seed(&self, seed: &SeedData) -> AdminResult<bool> {
        let seed = seed.clone();
        let applied = self.state.commit(move |state| {
            if !state.users.is_empty() {
                return Ok(false);
            }

            for su in &seed.users {
                if state.users.contains_key(&su.id) {
                    return Err(AdminError::DuplicateUser(su.id.clone()));
                }
                let mut user = User::new(su.id.clone(), su.name.clone(), su.email.clone(), su.role);
                user.active = su.active;
                state.users.insert(su.id.clone(), user);
            }
            for sr in &seed.resources {
                if state.resources.contains_key(&sr.name) {
                    return Err(AdminError::DuplicateResource(sr.name.clone()));
                }
                state
                    .resources
                    .insert(sr.name.clone(), Resource::new(sr.name.clone(), sr.description.clone()));
            }
            for sg in &seed.grants {
                if !state.users.contains_key(&sg.user_id) {
                    return Err(AdminError::UnknownUser(sg.user_id.clone()));
                }
                if !state.resources.contains_key(&sg.resource) {
                    return Err(AdminError::UnknownResource(sg.resource.clone()));
                }
                state.grants.insert(
                    crate::grants::GrantKey::new(sg.user_id.clone(), sg.resource.clone(), sg.action),
                    sg.effect,
                );
            }
            Ok(true)
        })?;
        if applied {
            info!("Applied seed data");
        } else {
            info!("Gateway already populated; seed skipped");
        }
        Ok(applied)
    }
}
