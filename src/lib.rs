//! SSO bridge for simpleSAMLphp-backed sign-on.
//!
//! Two independent units extracted from a CMS integration module:
//! role resolution (IdP role attributes mapped to local role ids, with
//! administrator precedence and a fail-open error policy) and the
//! cookie-gated redirect that short-circuits anonymous navigation to
//! the SSO endpoint.

pub mod attributes;
pub mod redirect;
pub mod roles;

pub use attributes::AttributeSet;
pub use redirect::{
    bind_login_element, evaluate, PageContext, RedirectConfig, RedirectConfigJson,
    RedirectDecision, RedirectMode,
};
pub use roles::{
    run_alter_hooks, RoleAlterHook, RoleId, RoleLookup, RoleResolver, RoleSet, RoleSyncConfig,
    RoleSyncConfigJson,
};
