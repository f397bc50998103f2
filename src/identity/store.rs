/*!
 * Identity Store
 */

use super::types::{Role, User};
use crate::core::errors::AdminError;
use crate::core::state::StateHandle;
use crate::core::types::{AdminResult, StoreResult, UserId};
use log::info;
use uuid::Uuid;

/// Store of user records
///
/// Mutations are synchronous and immediately visible to the authorization
/// engine; there is no caching layer in between.
#[derive(Clone)]
pub struct IdentityStore {
    state: StateHandle,
    /// Deployment policy: reject user creation on a conflicting display name
    require_unique_names: bool,
}

impl IdentityStore {
    pub fn new(state: StateHandle) -> Self {
        Self {
            state,
            require_unique_names: false,
        }
    }

    pub fn with_unique_names(mut self, required: bool) -> Self {
        self.require_unique_names = required;
        self
    }

    /// Create a user with a generated id
    pub fn create_user(
        &self,
        name: impl Into<String>,
        email: Option<String>,
        role: Role,
    ) -> AdminResult<User> {
        let id = Uuid::new_v4().to_string();
        self.create_user_with_id(id, name, email, role)
    }

    /// Create a user with a caller-supplied id (seeding, imports)
    pub fn create_user_with_id(
        &self,
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: Option<String>,
        role: Role,
    ) -> AdminResult<User> {
        let user = User::new(id, name, email, role);
        let unique_names = self.require_unique_names;
        let created = self.state.commit(move |state| {
            if state.users.contains_key(&user.id) {
                return Err(AdminError::DuplicateUser(user.id.clone()));
            }
            if unique_names && state.users.values().any(|u| u.name == user.name) {
                return Err(AdminError::DuplicateUser(user.name.clone()));
            }
            state.users.insert(user.id.clone(), user.clone());
            Ok(user)
        })?;
        info!("Created user {} ({})", created.id, created.role);
        Ok(created)
    }

    /// Change a user's role
    pub fn set_role(&self, id: &str, role: Role) -> AdminResult<()> {
        self.state.commit(|state| match state.users.get_mut(id) {
            Some(user) => {
                user.role = role;
                Ok(())
            }
            None => Err(AdminError::UnknownUser(id.to_string())),
        })?;
        info!("Set role of user {} to {}", id, role);
        Ok(())
    }

    /// Deactivate a user
    ///
    /// Idempotent: deactivating an already-inactive user is a no-op.
    pub fn deactivate(&self, id: &str) -> AdminResult<()> {
        let changed = self.state.commit(|state| match state.users.get_mut(id) {
            Some(user) => {
                let was_active = user.active;
                user.active = false;
                Ok(was_active)
            }
            None => Err(AdminError::UnknownUser(id.to_string())),
        })?;
        if changed {
            info!("Deactivated user {}", id);
        }
        Ok(())
    }

    /// Look up a user by id
    pub fn get(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.state.snapshot()?.users.get(id).cloned())
    }

    /// All users, ordered by display name
    pub fn list(&self) -> StoreResult<Vec<User>> {
        let snapshot = self.state.snapshot()?;
        let mut users: Vec<User> = snapshot.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }
}
