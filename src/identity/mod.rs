//! # Identity Validation
//!
//! Exact-mass database hits are only chemically plausible for some retention
//! times: a triacylglycerol does not elute in the lysophospholipid region.
//! [`IdentityValidator`] accepts a (query, identity) pair when the first
//! validation rule whose RT window contains the query's RT also finds its
//! class substring in the identity name.

mod validator;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use validator::IdentityValidator;

/// Anything that can name a compound
pub trait CompoundIdentity {
    /// Display name, e.g. `"TAG 54:3"` or `"GPCho 34:1"`
    fn compound_name(&self) -> &str;
}

impl CompoundIdentity for str {
    fn compound_name(&self) -> &str {
        self
    }
}

impl CompoundIdentity for String {
    fn compound_name(&self) -> &str {
        self
    }
}

impl<T: CompoundIdentity + ?Sized> CompoundIdentity for &T {
    fn compound_name(&self) -> &str {
        (**self).compound_name()
    }
}

/// Property key under which an identity exposes its name
pub const PROPERTY_NAME: &str = "Name";

/// A named identity with free-form string properties (formula, ID, URL, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleCompoundIdentity {
    /// Compound name
    pub name: String,

    /// Additional properties by key
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl SimpleCompoundIdentity {
    /// Create an identity with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Add a property (builder style)
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Property value; `"Name"` always resolves to the compound name
    pub fn property(&self, key: &str) -> Option<&str> {
        if key == PROPERTY_NAME {
            return Some(&self.name);
        }
        self.properties.get(key).map(String::as_str)
    }
}

impl CompoundIdentity for SimpleCompoundIdentity {
    fn compound_name(&self) -> &str {
        &self.name
    }
}
