//! Cookie-gated SSO redirect.
//!
//! Detects the SSO login cookie on pages served to anonymous users and
//! decides whether to short-circuit navigation to the SSO redirect
//! endpoint.

pub mod config;
pub mod cookie;
pub mod gate;

pub use config::{RedirectConfig, RedirectConfigJson};
pub use cookie::read_cookie;
pub use gate::{bind_login_element, evaluate, PageContext, RedirectDecision, RedirectMode};
