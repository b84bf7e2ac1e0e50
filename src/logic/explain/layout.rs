//! Feature Layout
//!
//! Ordered feature names of the attribution tensor's feature axis.
//! The order MUST match the column order the explainer was fed.
//!
//! The layout hash (CRC32 over the names, in order) goes into every batch
//! report so two runs can be checked for layout compatibility.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureLayout {
    names: Vec<String>,
}

impl FeatureLayout {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get feature name by index
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Get feature index by name (O(n) but features are few)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        for name in &self.names {
            hasher.update(name.as_bytes());
            hasher.update(&[0]); // Separator
        }
        hasher.finalize()
    }

    pub fn is_compatible(&self, hash: u32) -> bool {
        self.hash() == hash
    }
}
