//! Query-layer configuration
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! # Cap transitive walks and ancestor climbs (unbounded when absent)
//! max_traversal_depth = 64
//! # Memoized ancestor chains, 0 disables the cache
//! ancestor_cache_capacity = 4096
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning knobs for [`PolicyManager`](crate::PolicyManager) queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Maximum number of hops for transitive queries
    ///
    /// `None` keeps traversal unbounded, which assumes an acyclic hierarchy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_traversal_depth: Option<usize>,

    /// Capacity of the ancestor chain cache (0 disables caching)
    pub ancestor_cache_capacity: usize,
}

impl PolicyConfig {
    pub const DEFAULT_ANCESTOR_CACHE_CAPACITY: usize = 1024;

    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Set the traversal depth cap
    pub fn with_max_traversal_depth(mut self, depth: usize) -> Self {
        self.max_traversal_depth = Some(depth);
        self
    }

    /// Set the ancestor cache capacity
    pub fn with_ancestor_cache_capacity(mut self, capacity: usize) -> Self {
        self.ancestor_cache_capacity = capacity;
        self
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            max_traversal_depth: None,
            ancestor_cache_capacity: Self::DEFAULT_ANCESTOR_CACHE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolicyError;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(PolicyConfig::from_toml("").unwrap(), PolicyConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let config = PolicyConfig::from_toml(
            "max_traversal_depth = 16\nancestor_cache_capacity = 0\n",
        )
        .unwrap();

        assert_eq!(config.max_traversal_depth, Some(16));
        assert_eq!(config.ancestor_cache_capacity, 0);
    }

    #[test]
    fn test_invalid_document() {
        let err = PolicyConfig::from_toml("max_traversal_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, PolicyError::Config(_)));
    }

    #[test]
    fn test_builder_methods() {
        let config = PolicyConfig::default()
            .with_max_traversal_depth(8)
            .with_ancestor_cache_capacity(32);

        assert_eq!(config.max_traversal_depth, Some(8));
        assert_eq!(config.ancestor_cache_capacity, 32);
    }
}
