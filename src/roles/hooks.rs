//! Host extension point for altering resolved roles.
//!
//! After resolution the host may adjust or completely replace the
//! resolved set, e.g. to apply site-specific mapping rules.

use tracing::debug;

use super::resolver::RoleSet;
use crate::attributes::AttributeSet;

/// Hook invoked whenever a user's roles have been evaluated.
pub trait RoleAlterHook {
    /// Alter the resolved set in place. `attributes` is the IdP
    /// attribute set the resolution ran against.
    fn alter_roles(&self, roles: &mut RoleSet, attributes: &AttributeSet);
}

/// Run all registered alter hooks in order.
pub fn run_alter_hooks(hooks: &[&dyn RoleAlterHook], roles: &mut RoleSet, attributes: &AttributeSet) {
    for hook in hooks {
        hook.alter_roles(roles, attributes);
    }

    if !hooks.is_empty() {
        debug!(hooks = hooks.len(), roles = roles.len(), "Applied role alter hooks");
    }
}
