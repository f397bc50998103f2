/*!
 * Resource Registry
 * The set of managed tables eligible for permissioning
 */

use crate::core::errors::AdminError;
use crate::core::state::StateHandle;
use crate::core::types::{AdminResult, ResourceName, StoreResult};
use log::info;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::time::SystemTime;

/// One managed table
///
/// `name` is unique and immutable; removal cascades to every grant that
/// references the resource.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Resource {
    pub name: ResourceName,
    pub description: String,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub registered_at: SystemTime,
}

impl Resource {
    pub fn new(name: impl Into<ResourceName>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            registered_at: SystemTime::now(),
        }
    }
}

/// Store of managed resources
#[derive(Clone)]
pub struct ResourceRegistry {
    state: StateHandle,
}

impl ResourceRegistry {
    pub fn new(state: StateHandle) -> Self {
        Self { state }
    }

    /// Register a managed resource
    pub fn register(
        &self,
        name: impl Into<ResourceName>,
        description: impl Into<String>,
    ) -> AdminResult<Resource> {
        let resource = Resource::new(name, description);
        let registered = self.state.commit(move |state| {
            if state.resources.contains_key(&resource.name) {
                return Err(AdminError::DuplicateResource(resource.name.clone()));
            }
            state.resources.insert(resource.name.clone(), resource.clone());
            Ok(resource)
        })?;
        info!("Registered resource '{}'", registered.name);
        Ok(registered)
    }

    /// Remove a managed resource and every grant referencing it
    ///
    /// The resource and its grants disappear in one commit; no snapshot
    /// ever contains a grant pointing at an unregistered resource.
    /// Returns whether the resource existed.
    pub fn unregister(&self, name: &str) -> AdminResult<bool> {
        let removed = self.state.commit(|state| {
            if state.resources.remove(name).is_none() {
                return Ok(false);
            }
            state.grants.retain(|key, _| key.resource != name);
            Ok(true)
        })?;
        if removed {
            info!("Unregistered resource '{}' and cascaded its grants", name);
        }
        Ok(removed)
    }

    /// All managed resources, ordered by name
    pub fn list(&self) -> StoreResult<Vec<Resource>> {
        let snapshot = self.state.snapshot()?;
        let mut resources: Vec<Resource> = snapshot.resources.values().cloned().collect();
        resources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(resources)
    }

    /// Whether a resource is managed
    pub fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.state.snapshot()?.resources.contains_key(name))
    }
}
