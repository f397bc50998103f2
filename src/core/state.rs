/*!
 * Gateway State Handle
 * Copy-on-write shared state with snapshot reads and serialized commits
 *
 * All three relations (users, resources, grants) live in one immutable
 * snapshot behind an RCU-style pointer. Readers load the current snapshot
 * and never block on writers; a snapshot observes every committed change
 * fully applied or not at all. Writers serialize through a mutex, mutate
 * a private clone, and publish it atomically; an error before publish
 * leaves the previous snapshot untouched (rollback for free).
 */

use crate::core::errors::StoreError;
use crate::core::types::{AdminResult, ResourceName, StoreResult, UserId};
use crate::grants::{Effect, GrantKey};
use crate::identity::User;
use crate::registry::Resource;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Relation names, as reported by the health probe
pub const STORE_USERS: &str = "users";
pub const STORE_RESOURCES: &str = "resources";
pub const STORE_GRANTS: &str = "grants";

/// Name of the shared backing store, as reported by errors
pub const STORE_STATE: &str = "state";

/// One immutable snapshot of the persisted relations
#[derive(Debug, Clone, Default)]
pub struct GatewayState {
    pub users: HashMap<UserId, User, ahash::RandomState>,
    pub resources: HashMap<ResourceName, Resource, ahash::RandomState>,
    pub grants: HashMap<GrantKey, Effect, ahash::RandomState>,
}

impl GatewayState {
    /// Referential integrity: every grant references a live user and resource
    pub fn grants_consistent(&self) -> bool {
        self.grants.keys().all(|key| {
            self.users.contains_key(&key.user_id) && self.resources.contains_key(&key.resource)
        })
    }
}

struct Shared {
    current: ArcSwap<GatewayState>,
    /// Serializes committers; readers never take this
    write: Mutex<()>,
    /// Cleared on close; every operation afterwards reports unavailability
    open: AtomicBool,
}

/// Handle to the in-memory backing store
///
/// Cheap to clone; every clone refers to the same shared state. Lifecycle
/// is owned by the process entry point: once `close` is called, reads and
/// commits fail with `StoreError::Unavailable` and the gateway's callers
/// apply their own failure policy.
#[derive(Clone)]
pub struct StateHandle {
    shared: Arc<Shared>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                current: ArcSwap::from_pointee(GatewayState::default()),
                write: Mutex::new(()),
                open: AtomicBool::new(true),
            }),
        }
    }

    /// Load the current snapshot
    ///
    /// Lock-free; concurrent commits are observed fully or not at all.
    pub fn snapshot(&self) -> StoreResult<Arc<GatewayState>> {
        if !self.is_open() {
            return Err(StoreError::Unavailable(STORE_STATE.to_string()));
        }
        Ok(self.shared.current.load_full())
    }

    /// Apply a mutation atomically
    ///
    /// The closure operates on a private clone of the current snapshot.
    /// On `Ok` the clone is published as the new snapshot; on `Err` nothing
    /// is published and readers keep observing the previous state.
    pub fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut GatewayState) -> AdminResult<T>,
    ) -> AdminResult<T> {
        let _guard = self.shared.write.lock();
        if !self.is_open() {
            return Err(StoreError::Unavailable(STORE_STATE.to_string()).into());
        }
        let mut next = GatewayState::clone(&self.shared.current.load());
        let out = mutate(&mut next)?;
        debug_assert!(next.grants_consistent());
        self.shared.current.store(Arc::new(next));
        Ok(out)
    }

    /// Whether the store is accepting operations
    pub fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::Acquire)
    }

    /// Close the store; subsequent operations report `Unavailable`
    pub fn close(&self) {
        let _guard = self.shared.write.lock();
        self.shared.open.store(false, Ordering::Release);
        log::info!("State handle closed; store operations now report unavailable");
    }
}

impl Default for StateHandle {
    fn default() -> Self {
        Self::new()
    }
}
