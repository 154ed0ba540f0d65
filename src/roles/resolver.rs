//! Role resolution from IdP attributes.
//!
//! Scans the configured role attribute left to right, mapping each role
//! name to a local role id. The first administrator match ends the scan
//! and replaces the whole set; failures never escalate privilege, they
//! only skip synchronization.

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::{debug, warn};

use super::config::{RoleSyncConfig, ADMINISTRATOR_ROLE, AUTHENTICATED_ROLE};
use crate::attributes::AttributeSet;

/// Local role identifier.
pub type RoleId = u32;

/// Resolved roles: local role id mapped to role name. Keys unique,
/// order irrelevant.
pub type RoleSet = BTreeMap<RoleId, String>;

/// External capability resolving a role name to a local role id.
///
/// `Ok(None)` means the name is unknown to the host and is skipped.
pub trait RoleLookup {
    fn lookup(&self, name: &str) -> Result<Option<RoleId>>;
}

/// Resolves local roles from IdP-supplied attributes.
pub struct RoleResolver {
    /// Role sync configuration.
    config: RwLock<RoleSyncConfig>,
}

impl RoleResolver {
    /// Create a new resolver with the given configuration.
    pub fn new(config: RoleSyncConfig) -> Result<Self> {
        if config.enabled {
            config.validate().map_err(|e| anyhow!(e))?;
        }

        Ok(Self {
            config: RwLock::new(config),
        })
    }

    /// Update configuration.
    pub fn reconfigure(&self, config: RoleSyncConfig) -> Result<()> {
        if config.enabled {
            config.validate().map_err(|e| anyhow!(e))?;
        }

        let mut cfg = self
            .config
            .write()
            .map_err(|_| anyhow!("Config lock poisoned"))?;
        *cfg = config;

        Ok(())
    }

    /// Check if role sync is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.read().map(|c| c.enabled).unwrap_or(false)
    }

    /// Get a clone of the current config.
    pub fn config(&self) -> Result<RoleSyncConfig> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| anyhow!("Config lock poisoned"))
    }

    /// Resolve roles into `roles`, which carries the caller-supplied
    /// default set and is updated in place.
    ///
    /// With sync disabled the result is exactly the authenticated role.
    /// Otherwise the role attribute is scanned left to right: a blank
    /// entry stops the scan, the first administrator match stops the
    /// scan and replaces the set, unknown names are skipped. If neither
    /// branch produced any entry the set falls back to the
    /// authenticated role.
    pub fn resolve(
        &self,
        attributes: &AttributeSet,
        lookup: &dyn RoleLookup,
        roles: &mut RoleSet,
    ) -> Result<()> {
        let config = self.config()?;

        if !config.enabled {
            roles.clear();
            roles.insert(config.authenticated_role_id, AUTHENTICATED_ROLE.to_string());
            return Ok(());
        }

        debug!(
            attribute = %config.role_attribute,
            defaults = roles.len(),
            "Resolving roles from IdP attributes"
        );

        let mut admin_match = false;
        let mut accumulated = 0usize;

        if let Some(candidates) = attributes.get(&config.role_attribute) {
            for candidate in candidates {
                let name = candidate.trim();

                if name.is_empty() {
                    break;
                }

                if config.is_admin_name(name) {
                    admin_match = true;
                    break;
                }

                match lookup.lookup(name)? {
                    Some(id) => {
                        roles.insert(id, name.to_string());
                        accumulated += 1;
                    }
                    None => {
                        debug!(role = name, "Unknown IdP role name, skipping");
                    }
                }
            }
        }

        if admin_match {
            // Administrator precedence: replacement is authoritative.
            roles.clear();
            roles.insert(config.admin_role_id, ADMINISTRATOR_ROLE.to_string());
        } else if accumulated == 0 {
            roles.clear();
            roles.insert(config.authenticated_role_id, AUTHENTICATED_ROLE.to_string());
        }

        debug!(roles = roles.len(), admin = admin_match, "Roles resolved");
        Ok(())
    }

    /// Fail-open wrapper around [`resolve`](Self::resolve).
    ///
    /// Any fault while reading attributes, configuration, or performing
    /// lookups is logged and swallowed, leaving the previously assigned
    /// set untouched.
    pub fn sync(&self, attributes: &AttributeSet, lookup: &dyn RoleLookup, roles: &mut RoleSet) {
        let mut scratch = roles.clone();

        match self.resolve(attributes, lookup, &mut scratch) {
            Ok(()) => *roles = scratch,
            Err(e) => {
                warn!(error = %e, "Role sync failed, keeping previously assigned roles");
            }
        }
    }
}
