//! Redirect decision logic.
//!
//! Single rendition of the two browser flows: a click interceptor on
//! the login control and an unconditional page-load redirect, selected
//! by mode. Both read the SSO cookie and compose the same target URL;
//! only the click flow re-attaches the query string and cancels the
//! triggering event.

use tracing::debug;

use super::config::RedirectConfig;
use super::cookie::read_cookie;

/// Which browser flow is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Click handler on the login control.
    LoginClick,
    /// Unconditional page-load redirect on anonymous pages.
    AutoRedirect,
}

/// Snapshot of the current browser location and cookie jar.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Current hostname.
    pub hostname: String,
    /// Current path.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: Option<String>,
    /// Raw cookie jar (`document.cookie`).
    pub cookie_header: String,
}

impl PageContext {
    /// Reassemble path and query for textual pattern tests.
    pub fn href(&self) -> String {
        match self.query.as_deref() {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

/// Outcome of a redirect evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    /// Composed redirect target URL.
    pub location: String,
    /// Whether the triggering event's default action must be cancelled.
    pub cancel_default: bool,
}

/// Decide whether to redirect to the SSO endpoint.
///
/// Returns `None` when the SSO cookie is missing or empty, in which
/// case default navigation proceeds unmodified. Cookie token and
/// destination are forwarded verbatim, not percent-encoded.
pub fn evaluate(
    mode: RedirectMode,
    context: &PageContext,
    config: &RedirectConfig,
) -> Option<RedirectDecision> {
    let token = read_cookie(&context.cookie_header, &config.cookie_name)?;

    let mut location = format!(
        "{}://{}{}?{}={}&{}={}",
        config.scheme,
        context.hostname,
        config.endpoint_path,
        config.token_param,
        token,
        config.destination_param,
        context.path,
    );

    let cancel_default = match mode {
        RedirectMode::LoginClick => {
            if has_forward_marker(&context.href(), &config.forward_query_param) {
                if let Some(query) = context.query.as_deref() {
                    location.push('?');
                    location.push_str(query);
                }
            }
            true
        }
        RedirectMode::AutoRedirect => false,
    };

    debug!(mode = ?mode, location = %location, "SSO cookie present, redirecting");

    Some(RedirectDecision {
        location,
        cancel_default,
    })
}

/// Pick the login control to attach the click interceptor to.
///
/// Returns the first configured element id present on the page; `None`
/// means the interceptor is inert.
pub fn bind_login_element<'a>(
    present_ids: &[&'a str],
    config: &RedirectConfig,
) -> Option<&'a str> {
    for id in &config.login_element_ids {
        if let Some(found) = present_ids.iter().copied().find(|present| *present == id.as_str()) {
            return Some(found);
        }
    }

    debug!("No login control present, click interceptor inert");
    None
}

/// Test for the forward marker in both plain and percent-encoded forms,
/// preceded by `?` or `&`.
fn has_forward_marker(href: &str, param: &str) -> bool {
    let bytes = href.as_bytes();

    for needle in [format!("{param}="), format!("{param}%3D")] {
        for (idx, _) in href.match_indices(needle.as_str()) {
            if idx > 0 && matches!(bytes[idx - 1], b'?' | b'&') {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(path: &str, query: Option<&str>, cookie_header: &str) -> PageContext {
        PageContext {
            hostname: "www.example.org".to_string(),
            path: path.to_string(),
            query: query.map(|q| q.to_string()),
            cookie_header: cookie_header.to_string(),
        }
    }

    #[test]
    fn test_login_click_basic_target() {
        let decision = evaluate(
            RedirectMode::LoginClick,
            &context("/node/5", None, "_lta=abc123"),
            &RedirectConfig::default(),
        )
        .unwrap();

        assert_eq!(
            decision.location,
            "http://www.example.org/saml_redirect?s=abc123&destination=/node/5"
        );
        assert!(decision.cancel_default);
    }

    #[test]
    fn test_login_click_reattaches_query_on_marker() {
        let decision = evaluate(
            RedirectMode::LoginClick,
            &context("/search", Some("esq=term&page=2"), "_lta=abc123"),
            &RedirectConfig::default(),
        )
        .unwrap();

        assert_eq!(
            decision.location,
            "http://www.example.org/saml_redirect?s=abc123&destination=/search?esq=term&page=2"
        );
    }

    #[test]
    fn test_login_click_encoded_marker_form() {
        let decision = evaluate(
            RedirectMode::LoginClick,
            &context("/search", Some("page=2&esq%3Dterm"), "_lta=tok"),
            &RedirectConfig::default(),
        )
        .unwrap();

        assert!(decision.location.ends_with("&destination=/search?page=2&esq%3Dterm"));
    }

    #[test]
    fn test_login_click_ignores_query_without_marker() {
        let decision = evaluate(
            RedirectMode::LoginClick,
            &context("/search", Some("page=2"), "_lta=tok"),
            &RedirectConfig::default(),
        )
        .unwrap();

        assert_eq!(
            decision.location,
            "http://www.example.org/saml_redirect?s=tok&destination=/search"
        );
    }

    #[test]
    fn test_marker_requires_separator_prefix() {
        // "myesq=x" must not count as the marker.
        let decision = evaluate(
            RedirectMode::LoginClick,
            &context("/search", Some("myesq=x"), "_lta=tok"),
            &RedirectConfig::default(),
        )
        .unwrap();

        assert!(!decision.location.contains("myesq"));
    }

    #[test]
    fn test_auto_redirect_never_reattaches_query() {
        let decision = evaluate(
            RedirectMode::AutoRedirect,
            &context("/search", Some("esq=term"), "_lta=abc123"),
            &RedirectConfig::default(),
        )
        .unwrap();

        assert_eq!(
            decision.location,
            "http://www.example.org/saml_redirect?s=abc123&destination=/search"
        );
        assert!(!decision.cancel_default);
    }

    #[test]
    fn test_missing_or_empty_cookie_means_no_redirect() {
        let config = RedirectConfig::default();

        for mode in [RedirectMode::LoginClick, RedirectMode::AutoRedirect] {
            assert_eq!(evaluate(mode, &context("/node/5", None, ""), &config), None);
            assert_eq!(
                evaluate(mode, &context("/node/5", None, "_lta="), &config),
                None
            );
            assert_eq!(
                evaluate(mode, &context("/node/5", None, "other=x"), &config),
                None
            );
        }
    }

    #[test]
    fn test_bind_login_element_first_found_wins() {
        let config = RedirectConfig::default();

        assert_eq!(
            bind_login_element(&["nav", "login_s", "login-link-s"], &config),
            Some("login_s")
        );
        assert_eq!(
            bind_login_element(&["nav", "login-link-s"], &config),
            Some("login-link-s")
        );
        assert_eq!(bind_login_element(&["nav", "footer"], &config), None);
        assert_eq!(bind_login_element(&[], &config), None);
    }

    #[test]
    fn test_has_forward_marker_patterns() {
        assert!(has_forward_marker("/p?esq=1", "esq"));
        assert!(has_forward_marker("/p?a=1&esq=1", "esq"));
        assert!(has_forward_marker("/p?a=1&esq%3D1", "esq"));
        assert!(!has_forward_marker("/p?a=esq", "esq"));
        assert!(!has_forward_marker("/p/esq=1", "esq"));
        assert!(!has_forward_marker("esq=1", "esq"));
    }
}
