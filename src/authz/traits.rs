/*!
 * Authorization Traits
 * Interfaces consumed by data-access middleware
 */

use super::types::{AccessRequest, Decision};
use crate::core::types::StoreResult;

/// Core authorization interface
///
/// Absence of permission is a `Decision`, never an error; the only error
/// is backing-store unavailability, left to the caller's failure policy.
pub trait AccessChecker: Send + Sync {
    /// Decide an access request
    fn authorize(&self, request: &AccessRequest) -> StoreResult<Decision>;

    /// Decide and record the outcome in the audit trail
    fn authorize_and_audit(&self, request: &AccessRequest) -> StoreResult<Decision>;

    /// Decide multiple requests
    fn authorize_batch(&self, requests: &[AccessRequest]) -> StoreResult<Vec<Decision>> {
        requests.iter().map(|req| self.authorize(req)).collect()
    }
}
