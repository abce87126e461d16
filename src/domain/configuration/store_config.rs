//! Feature store backend settings.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Section;
use crate::domain::ConfigError;

/// Backend configuration for a feature store.
///
/// Used both for the online store and for the store a batch job targets;
/// the two are decoded independently from their own subtrees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Logical store identifier.
    pub name: String,
    /// Backend discriminator selecting the store client implementation.
    #[serde(rename = "type")]
    pub store_type: String,
    /// Connection pool upper bound for pool-based backends.
    pub redis_pool_max_size: i32,
    /// Idle connection upper bound for pool-based backends.
    pub redis_pool_max_idle: i32,
    /// Backend-specific settings.
    pub options: BTreeMap<String, String>,
}

impl StoreConfig {
    pub fn decode(section: &Section<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            name: section.string("name")?,
            store_type: section.string("type")?,
            redis_pool_max_size: section.int("redisPoolMaxSize")?,
            redis_pool_max_idle: section.int("redisPoolMaxIdle")?,
            options: section.string_map("options")?,
        })
    }

    /// Look up a backend option by key.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}
