/*!
 * Grants Module
 * The permission matrix and its store
 */

mod store;
mod types;

pub use store::{GrantStore, PermissionMap};
pub use types::{Action, Effect, Grant, GrantKey};
