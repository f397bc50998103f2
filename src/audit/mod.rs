/*!
 * Decision Audit Trail
 * Tracks authorization outcomes and denials for security review
 */

use crate::authz::{Decision, ReasonCode};
use crate::core::limits::{MAX_AUDIT_EVENTS, MAX_USER_AUDIT_EVENTS};
use crate::core::types::UserId;
use ahash::RandomState;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::SystemTime;

/// Audit event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Info,
    Warning,
    Critical,
}

/// One recorded authorization outcome
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditEvent {
    pub decision: Decision,
    pub severity: AuditSeverity,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub logged_at: SystemTime,
}

impl AuditEvent {
    pub fn new(decision: Decision) -> Self {
        let severity = if decision.is_allowed() {
            AuditSeverity::Info
        } else {
            // A denial against an unknown principal or table smells like
            // probing; policy denials are routine
            match decision.reason() {
                ReasonCode::UserInactiveOrUnknown | ReasonCode::UnknownResource => {
                    AuditSeverity::Critical
                }
                ReasonCode::ExplicitGrant | ReasonCode::RoleDefault => AuditSeverity::Warning,
            }
        };

        Self {
            decision,
            severity,
            logged_at: SystemTime::now(),
        }
    }

    pub fn with_severity(mut self, severity: AuditSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Audit logger for authorization decisions
pub struct AuditLogger {
    /// Global event log (ring buffer)
    events: parking_lot::RwLock<VecDeque<AuditEvent>>,
    /// Per-user event logs
    user_events: Arc<DashMap<UserId, VecDeque<AuditEvent>, RandomState>>,
    /// Denial counters for monitoring
    denial_counts: Arc<DashMap<UserId, u64, RandomState>>,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self {
            events: parking_lot::RwLock::new(VecDeque::with_capacity(MAX_AUDIT_EVENTS)),
            user_events: Arc::new(DashMap::with_hasher(RandomState::new())),
            denial_counts: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    /// Record a decision
    pub fn log(&self, event: AuditEvent) {
        let user_id = event.decision.request.user_id.clone();
        let is_denied = !event.decision.is_allowed();

        {
            let mut events = self.events.write();
            if events.len() >= MAX_AUDIT_EVENTS {
                events.pop_front();
            }
            events.push_back(event.clone());
        }

        let mut entry = self
            .user_events
            .entry(user_id.clone())
            .or_insert_with(|| VecDeque::with_capacity(MAX_USER_AUDIT_EVENTS));
        if entry.len() >= MAX_USER_AUDIT_EVENTS {
            entry.pop_front();
        }
        entry.push_back(event);
        drop(entry);

        if is_denied {
            self.denial_counts
                .entry(user_id)
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
    }

    /// Most recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        let events = self.events.read();
        events.iter().rev().take(limit).cloned().collect()
    }

    /// Events for one user, newest first
    pub fn for_user(&self, user_id: &str, limit: usize) -> Vec<AuditEvent> {
        if let Some(entry) = self.user_events.get(user_id) {
            entry.iter().rev().take(limit).cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Denial count for a user
    pub fn denial_count(&self, user_id: &str) -> u64 {
        self.denial_counts.get(user_id).map(|e| *e).unwrap_or(0)
    }

    /// All users with at least one denial
    pub fn users_with_denials(&self) -> Vec<(UserId, u64)> {
        self.denial_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Drop audit history for a user (e.g. after user removal)
    pub fn clear_user(&self, user_id: &str) {
        self.user_events.remove(user_id);
        self.denial_counts.remove(user_id);
    }

    /// Get statistics
    pub fn stats(&self) -> AuditStats {
        let total_events = self.events.read().len();
        let total_denials: u64 = self.denial_counts.iter().map(|e| *e.value()).sum();
        let users_tracked = self.user_events.len();

        AuditStats {
            total_events,
            total_denials,
            users_tracked,
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Audit statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_events: usize,
    pub total_denials: u64,
    pub users_tracked: usize,
}
