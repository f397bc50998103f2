/*!
 * Gateway Configuration
 * Deployment-supplied policy table, naming rules, and seed data
 */

use crate::authz::RolePolicy;
use crate::core::types::{ResourceName, UserId};
use crate::grants::{Action, Effect};
use crate::identity::Role;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    #[diagnostic(
        code(config::read_failed),
        help("Check that the path exists and is readable.")
    )]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    #[diagnostic(
        code(config::parse_failed),
        help("The file must be JSON matching the GatewayConfig shape; role, action, and effect values are closed sets.")
    )]
    Parse(#[from] serde_json::Error),
}

/// A user supplied by seed data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeedUser {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A resource supplied by seed data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeedResource {
    pub name: ResourceName,
    #[serde(default)]
    pub description: String,
}

/// A grant supplied by seed data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeedGrant {
    pub user_id: UserId,
    pub resource: ResourceName,
    pub action: Action,
    pub effect: Effect,
}

/// First-boot population data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub resources: Vec<SeedResource>,
    #[serde(default)]
    pub grants: Vec<SeedGrant>,
}

/// Deployment configuration for the gateway core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GatewayConfig {
    /// Role → default action set; absent roles default to no actions
    #[serde(default = "RolePolicy::default")]
    pub role_defaults: RolePolicy,
    /// Reject user creation on conflicting display names
    #[serde(default)]
    pub require_unique_names: bool,
    /// Applied once to an empty gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedData>,
}

impl GatewayConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Small built-in dataset for demos and smoke tests
    pub fn demo() -> Self {
        Self {
            role_defaults: RolePolicy::default(),
            require_unique_names: true,
            seed: Some(SeedData {
                users: vec![
                    SeedUser {
                        id: "usr_admin".to_string(),
                        name: "Site Admin".to_string(),
                        email: Some("admin@example.com".to_string()),
                        role: Role::SystemAdmin,
                        active: true,
                    },
                    SeedUser {
                        id: "usr_editor".to_string(),
                        name: "Edith Editor".to_string(),
                        email: Some("edith@example.com".to_string()),
                        role: Role::DataEditor,
                        active: true,
                    },
                    SeedUser {
                        id: "usr_viewer".to_string(),
                        name: "Vik Viewer".to_string(),
                        email: Some("vik@example.com".to_string()),
                        role: Role::DataViewer,
                        active: true,
                    },
                ],
                resources: vec![
                    SeedResource {
                        name: "orders".to_string(),
                        description: "Order line items".to_string(),
                    },
                    SeedResource {
                        name: "inventory".to_string(),
                        description: "Stock levels".to_string(),
                    },
                    SeedResource {
                        name: "audit_log".to_string(),
                        description: "Immutable audit records".to_string(),
                    },
                ],
                grants: vec![
                    SeedGrant {
                        user_id: "usr_editor".to_string(),
                        resource: "audit_log".to_string(),
                        action: Action::Update,
                        effect: Effect::Deny,
                    },
                    SeedGrant {
                        user_id: "usr_viewer".to_string(),
                        resource: "inventory".to_string(),
                        action: Action::Insert,
                        effect: Effect::Allow,
                    },
                ],
            }),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert!(!config.require_unique_names);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_parse_minimal_json() {
        let config: GatewayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn test_parse_full_json() {
        let json = r#"{
            "role_defaults": {"data_viewer": ["select"]},
            "require_unique_names": true,
            "seed": {
                "users": [{"id": "u1", "name": "Alice", "role": "data_viewer"}],
                "resources": [{"name": "orders"}],
                "grants": [
                    {"user_id": "u1", "resource": "orders", "action": "select", "effect": "deny"}
                ]
            }
        }"#;
        let config: GatewayConfig = serde_json::from_str(json).unwrap();

        assert!(config.require_unique_names);
        let seed = config.seed.unwrap();
        assert_eq!(seed.users[0].role, Role::DataViewer);
        assert!(seed.users[0].active, "active defaults to true");
        assert_eq!(seed.grants[0].effect, Effect::Deny);
    }

    #[test]
    fn test_rejects_out_of_set_enums() {
        let json = r#"{"seed": {"users": [{"id": "u1", "name": "A", "role": "root"}]}}"#;
        assert!(serde_json::from_str::<GatewayConfig>(json).is_err());
    }

    #[test]
    fn test_demo_seed_is_internally_consistent() {
        let seed = GatewayConfig::demo().seed.unwrap();
        for grant in &seed.grants {
            assert!(seed.users.iter().any(|u| u.id == grant.user_id));
            assert!(seed.resources.iter().any(|r| r.name == grant.resource));
        }
    }
}
