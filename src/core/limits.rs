/*!
 * System Limits and Constants
 *
 * Centralized location for gateway-wide limits and thresholds.
 */

use std::time::Duration;

// =============================================================================
// AUDIT LIMITS
// =============================================================================

/// Maximum decision events kept in the global audit ring buffer
/// [SECURITY] Bounds memory while retaining enough history for incident review
pub const MAX_AUDIT_EVENTS: usize = 10_000;

/// Maximum decision events kept per user
/// [SECURITY] Per-principal history for investigating repeated denials
pub const MAX_USER_AUDIT_EVENTS: usize = 100;

// =============================================================================
// MONITORING
// =============================================================================

/// Interval between periodic health log lines in the gateway binary
pub const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(30);
