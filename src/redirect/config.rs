//! SSO redirect configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// SSO redirect configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectConfig {
    /// Cookie that carries the SSO login token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Redirect endpoint path on the current host.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// URL scheme for the redirect target.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Query parameter carrying the cookie token.
    #[serde(default = "default_token_param")]
    pub token_param: String,

    /// Query parameter carrying the post-login destination.
    #[serde(default = "default_destination_param")]
    pub destination_param: String,

    /// Element ids for the login control, checked in order; the click
    /// interceptor is inert when none is present.
    #[serde(default = "default_login_element_ids")]
    pub login_element_ids: Vec<String>,

    /// Query parameter whose presence makes the click interceptor
    /// re-attach the original query string to the destination.
    #[serde(default = "default_forward_query_param")]
    pub forward_query_param: String,
}

fn default_cookie_name() -> String {
    "_lta".to_string()
}

fn default_endpoint_path() -> String {
    "/saml_redirect".to_string()
}

fn default_scheme() -> String {
    // The source builds plain-HTTP targets.
    "http".to_string()
}

fn default_token_param() -> String {
    "s".to_string()
}

fn default_destination_param() -> String {
    "destination".to_string()
}

fn default_login_element_ids() -> Vec<String> {
    vec!["login_s".to_string(), "login-link-s".to_string()]
}

fn default_forward_query_param() -> String {
    "esq".to_string()
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            endpoint_path: default_endpoint_path(),
            scheme: default_scheme(),
            token_param: default_token_param(),
            destination_param: default_destination_param(),
            login_element_ids: default_login_element_ids(),
            forward_query_param: default_forward_query_param(),
        }
    }
}

impl RedirectConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cookie_name.is_empty() {
            return Err("cookie_name is required".to_string());
        }

        if !self.endpoint_path.starts_with('/') {
            return Err("endpoint_path must start with '/'".to_string());
        }

        if self.scheme.is_empty() {
            return Err("scheme is required".to_string());
        }

        if self.token_param.is_empty() || self.destination_param.is_empty() {
            return Err("token_param and destination_param are required".to_string());
        }

        Ok(())
    }
}

/// JSON configuration overlay for dynamic reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RedirectConfigJson {
    pub cookie_name: Option<String>,
    pub endpoint_path: Option<String>,
    pub scheme: Option<String>,
    pub token_param: Option<String>,
    pub destination_param: Option<String>,
    #[serde(default)]
    pub login_element_ids: Vec<String>,
    pub forward_query_param: Option<String>,
}

impl RedirectConfigJson {
    /// Parse an overlay from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).context("Failed to parse redirect config")
    }

    /// Merge JSON overlay into existing config.
    pub fn apply_to(&self, config: &mut RedirectConfig) {
        if let Some(ref name) = self.cookie_name {
            config.cookie_name = name.clone();
        }
        if let Some(ref path) = self.endpoint_path {
            config.endpoint_path = path.clone();
        }
        if let Some(ref scheme) = self.scheme {
            config.scheme = scheme.clone();
        }
        if let Some(ref param) = self.token_param {
            config.token_param = param.clone();
        }
        if let Some(ref param) = self.destination_param {
            config.destination_param = param.clone();
        }
        if !self.login_element_ids.is_empty() {
            config.login_element_ids = self.login_element_ids.clone();
        }
        if let Some(ref param) = self.forward_query_param {
            config.forward_query_param = param.clone();
        }
    }
}
