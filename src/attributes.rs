//! IdP attribute set delivered after SAML authentication.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes supplied by the IdP for the authenticated identity.
///
/// Values are ordered as delivered. Most attributes are single-valued,
/// but SAML allows multi-valued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet(HashMap<String, Vec<String>>);

impl AttributeSet {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all values for an attribute.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(|values| values.as_slice())
    }

    /// Get a single-valued attribute (first value).
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(|values| values.first())
            .map(|s| s.as_str())
    }

    /// Set a multi-valued attribute.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// Set a single-valued attribute.
    pub fn set_single(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), vec![value.into()]);
    }

    /// Number of attributes present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attributes are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for AttributeSet {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}
