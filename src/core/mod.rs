/*!
 * Core Module
 * Fundamental gateway types, error handling, and shared state
 */

pub mod errors;
pub mod limits;
pub mod state;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use state::{GatewayState, StateHandle, STORE_GRANTS, STORE_RESOURCES, STORE_STATE, STORE_USERS};
pub use types::*;
