//! Role synchronization from IdP attributes.
//!
//! Maps IdP-supplied role names to local role ids after SAML
//! authentication, with administrator precedence and a host extension
//! point for altering the resolved set.

pub mod config;
pub mod hooks;
pub mod resolver;

pub use config::{RoleSyncConfig, RoleSyncConfigJson, ADMINISTRATOR_ROLE, AUTHENTICATED_ROLE};
pub use hooks::{run_alter_hooks, RoleAlterHook};
pub use resolver::{RoleId, RoleLookup, RoleResolver, RoleSet};
