/*!
 * Health Probe
 * Readiness reporting for the backing stores
 */

use crate::core::state::{StateHandle, STORE_GRANTS, STORE_RESOURCES, STORE_USERS};
use serde::{Deserialize, Serialize};

/// Overall gateway status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    Unavailable,
}

/// Reachability of one backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreHealth {
    pub name: String,
    pub reachable: bool,
}

/// Health/readiness report consumed by the liveness endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub message: String,
    pub stores: Vec<StoreHealth>,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}

/// Report whether the backing stores are reachable
pub fn probe(state: &StateHandle) -> HealthReport {
    let reachable = state.is_open();
    let stores = [STORE_USERS, STORE_RESOURCES, STORE_GRANTS]
        .into_iter()
        .map(|name| StoreHealth {
            name: name.to_string(),
            reachable,
        })
        .collect();

    HealthReport {
        status: if reachable {
            HealthStatus::Ok
        } else {
            HealthStatus::Unavailable
        },
        message: if reachable {
            "Permissions gateway is online".to_string()
        } else {
            "Backing stores are unavailable".to_string()
        },
        stores,
    }
}
