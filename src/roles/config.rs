//! Role synchronization configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Role name granted to every signed-in user.
pub const AUTHENTICATED_ROLE: &str = "authenticated user";

/// Role name for the administrator role.
pub const ADMINISTRATOR_ROLE: &str = "administrator";

/// Role synchronization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleSyncConfig {
    /// Enable role synchronization from IdP attributes.
    #[serde(default)]
    pub enabled: bool,

    /// IdP attribute carrying role names.
    #[serde(default = "default_role_attribute")]
    pub role_attribute: String,

    /// IdP role names that imply the administrator role.
    #[serde(default)]
    pub admin_role_names: Vec<String>,

    /// Local role id granted to every signed-in user.
    #[serde(default = "default_authenticated_role_id")]
    pub authenticated_role_id: u32,

    /// Local role id for the administrator role.
    #[serde(default = "default_admin_role_id")]
    pub admin_role_id: u32,
}

fn default_role_attribute() -> String {
    "roles".to_string()
}

fn default_authenticated_role_id() -> u32 {
    2
}

fn default_admin_role_id() -> u32 {
    3
}

impl Default for RoleSyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            role_attribute: default_role_attribute(),
            admin_role_names: Vec::new(),
            authenticated_role_id: default_authenticated_role_id(),
            admin_role_id: default_admin_role_id(),
        }
    }
}

impl RoleSyncConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.role_attribute.is_empty() {
            return Err("Role sync requires a role_attribute".to_string());
        }

        if self.authenticated_role_id == 0 {
            return Err("authenticated_role_id must be non-zero".to_string());
        }

        if !self.admin_role_names.is_empty() && self.admin_role_id == 0 {
            return Err("admin_role_id must be non-zero when admin_role_names is set".to_string());
        }

        Ok(())
    }

    /// Check whether an IdP role name implies the administrator role.
    pub fn is_admin_name(&self, name: &str) -> bool {
        self.admin_role_names.iter().any(|n| n == name)
    }
}

/// JSON configuration overlay for dynamic reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RoleSyncConfigJson {
    pub enabled: Option<bool>,
    pub role_attribute: Option<String>,
    #[serde(default)]
    pub admin_role_names: Vec<String>,
    pub authenticated_role_id: Option<u32>,
    pub admin_role_id: Option<u32>,
}

impl RoleSyncConfigJson {
    /// Parse an overlay from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).context("Failed to parse role sync config")
    }

    /// Merge JSON overlay into existing config.
    pub fn apply_to(&self, config: &mut RoleSyncConfig) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(ref attribute) = self.role_attribute {
            config.role_attribute = attribute.clone();
        }
        if !self.admin_role_names.is_empty() {
            config.admin_role_names = self.admin_role_names.clone();
        }
        if let Some(id) = self.authenticated_role_id {
            config.authenticated_role_id = id;
        }
        if let Some(id) = self.admin_role_id {
            config.admin_role_id = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoleSyncConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.role_attribute, "roles");
        assert_eq!(config.authenticated_role_id, 2);
        assert_eq!(config.admin_role_id, 3);
        assert!(config.admin_role_names.is_empty());
    }

    #[test]
    fn test_validation() {
        let mut config = RoleSyncConfig::default();
        assert!(config.validate().is_ok()); // disabled is valid

        config.enabled = true;
        assert!(config.validate().is_ok());

        config.role_attribute = String::new();
        assert!(config.validate().is_err()); // missing attribute

        config.role_attribute = "roles".to_string();
        config.admin_role_names = vec!["admin".to_string()];
        config.admin_role_id = 0;
        assert!(config.validate().is_err()); // admin names without admin id
    }

    #[test]
    fn test_is_admin_name() {
        let mut config = RoleSyncConfig::default();
        config.admin_role_names = vec!["admin".to_string(), "superuser".to_string()];

        assert!(config.is_admin_name("admin"));
        assert!(config.is_admin_name("superuser"));
        assert!(!config.is_admin_name("editor"));
        assert!(!config.is_admin_name("Admin")); // exact match only
    }

    #[test]
    fn test_json_overlay() {
        let overlay = RoleSyncConfigJson::from_value(serde_json::json!({
            "enabled": true,
            "role-attribute": "eduPersonAffiliation",
            "admin-role-names": ["admin"],
            "admin-role-id": 5
        }))
        .unwrap();

        let mut config = RoleSyncConfig::default();
        overlay.apply_to(&mut config);

        assert!(config.enabled);
        assert_eq!(config.role_attribute, "eduPersonAffiliation");
        assert_eq!(config.admin_role_names, vec!["admin".to_string()]);
        assert_eq!(config.admin_role_id, 5);
        assert_eq!(config.authenticated_role_id, 2); // untouched
    }
}
