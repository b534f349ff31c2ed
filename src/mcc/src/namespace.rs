//! Namespace validation and identifier helpers
//!
//! Every converted item id and asset reference is prefixed by a namespace.
//! Namespaces are restricted to `[0-9a-z_.-]+`.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Namespace used when neither the caller nor the source declares one
pub const DEFAULT_NAMESPACE: &str = "converted";

/// Validated resource namespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

/// Check a string against the namespace character set
pub fn is_valid(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-'))
}

/// Check whether a reference already carries a namespace (`ns:path`)
pub fn has_namespace(reference: &str) -> bool {
    reference.contains(':')
}

impl Namespace {
    /// Validate and wrap a namespace string
    pub fn parse(s: &str) -> Result<Self> {
        if is_valid(s) {
            Ok(Namespace(s.to_string()))
        } else {
            Err(Error::InvalidNamespace(s.to_string()))
        }
    }

    /// Pick the active namespace: explicit override, then the source
    /// declaration, then [`DEFAULT_NAMESPACE`]
    pub fn resolve(override_ns: Option<&str>, declared: Option<&str>) -> Result<Self> {
        Self::parse(override_ns.or(declared).unwrap_or(DEFAULT_NAMESPACE))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `namespace:key`
    pub fn id(&self, key: &str) -> String {
        format!("{}:{}", self.0, key)
    }

    /// Prefix a reference with this namespace unless it already has one
    pub fn qualify(&self, reference: &str) -> String {
        if has_namespace(reference) {
            reference.to_string()
        } else {
            self.id(reference)
        }
    }

    /// `namespace:item/path`
    pub fn item_path(&self, path: &str) -> String {
        format!("{}:item/{}", self.0, path)
    }

    /// Return the path part if `reference` is scoped to this namespace
    pub fn strip<'a>(&self, reference: &'a str) -> Option<&'a str> {
        reference
            .strip_prefix(self.0.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
