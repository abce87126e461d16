//! Serving process configuration root.

use serde::Serialize;

use super::{Section, StoreConfig};
use crate::domain::ConfigError;

/// Root prefix under which every serving key lives.
pub const DEFAULT_PREFIX: &str = "feast";

/// Nested keys named by a root prefix: `app.feast` selects `app` then `feast`.
///
/// Empty segments are skipped, so an empty prefix names the document root.
pub fn prefix_segments(prefix: &str) -> Vec<&str> {
    prefix.split('.').filter(|segment| !segment.is_empty()).collect()
}

/// Process-wide configuration, decoded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServingConfig {
    /// Declared release version, informational.
    pub version: String,
    /// Control-plane hostname.
    pub core_host: String,
    /// Control-plane port.
    pub core_port: i32,
    /// Online store backend.
    pub store: StoreConfig,
    /// Batch and export job settings.
    pub jobs: JobConfig,
    /// Distributed tracing settings.
    pub tracing: TracingConfig,
}

impl ServingConfig {
    /// Decode the configuration from the section holding the root prefix.
    pub fn decode(section: &Section<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            version: section.string("version")?,
            core_host: section.string("coreHost")?,
            core_port: section.int("corePort")?,
            store: StoreConfig::decode(&section.child("store")?)?,
            jobs: JobConfig::decode(&section.child("jobs")?)?,
            tracing: TracingConfig::decode(&section.child("tracing")?)?,
        })
    }
}

/// Batch and export job settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    /// URI or path where job inputs and outputs are staged.
    pub staging_location: String,
    /// Store the job reads from and writes to.
    pub store: StoreConfig,
}

impl JobConfig {
    pub fn decode(section: &Section<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            staging_location: section.string("stagingLocation")?,
            store: StoreConfig::decode(&section.child("store")?)?,
        })
    }
}

/// Distributed tracing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingConfig {
    pub enabled: bool,
    pub tracer_name: String,
    pub service_name: String,
}

impl TracingConfig {
    pub fn decode(section: &Section<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: section.boolean("enabled")?,
            tracer_name: section.string("tracerName")?,
            service_name: section.string("serviceName")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn decode(value: Value) -> Result<ServingConfig, ConfigError> {
        let Value::Object(map) = value else { panic!("expected object") };
        ServingConfig::decode(&Section::new(DEFAULT_PREFIX, vec![&map]))
    }

    #[test]
    fn empty_document_decodes_to_zero_values() {
        let map = Map::new();
        let config = ServingConfig::decode(&Section::new(DEFAULT_PREFIX, vec![&map])).unwrap();

        assert_eq!(config, ServingConfig::default());
        assert_eq!(config.core_host, "");
        assert_eq!(config.core_port, 0);
        assert!(!config.tracing.enabled);
        assert!(config.store.options.is_empty());
        assert!(config.jobs.store.options.is_empty());
    }

    #[test]
    fn decodes_reference_document() {
        let config = decode(json!({
            "coreHost": "core.internal",
            "corePort": 6565,
            "store": { "type": "redis", "redisPoolMaxSize": 16 },
            "tracing": { "enabled": true, "serviceName": "serving" }
        }))
        .unwrap();

        assert_eq!(config.core_host, "core.internal");
        assert_eq!(config.core_port, 6565);
        assert_eq!(config.store.store_type, "redis");
        assert_eq!(config.store.redis_pool_max_size, 16);
        assert_eq!(config.store.redis_pool_max_idle, 0);
        assert!(config.tracing.enabled);
        assert_eq!(config.tracing.service_name, "serving");
        assert_eq!(config.tracing.tracer_name, "");
        assert_eq!(config.jobs.staging_location, "");
    }

    #[test]
    fn job_store_is_independent_of_online_store() {
        let config = decode(json!({
            "store": { "type": "A", "options": { "host": "online" } },
            "jobs": {
                "stagingLocation": "gs://bucket/staging",
                "store": { "type": "B" }
            }
        }))
        .unwrap();

        assert_eq!(config.store.store_type, "A");
        assert_eq!(config.jobs.store.store_type, "B");
        assert_eq!(config.jobs.staging_location, "gs://bucket/staging");
        assert_eq!(config.store.option("host"), Some("online"));
        assert!(config.jobs.store.options.is_empty());
    }

    #[test]
    fn non_numeric_port_is_a_type_mismatch() {
        let err = decode(json!({ "corePort": "not-a-number" })).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::TypeMismatch { key, expected: "integer", .. } if key == "feast.corePort"
        ));
    }

    #[test]
    fn scalar_in_place_of_section_is_a_type_mismatch() {
        let err = decode(json!({ "jobs": { "store": 5 } })).unwrap_err();
        assert_eq!(err.key(), Some("feast.jobs.store"));

        let err = decode(json!({ "tracing": "on" })).unwrap_err();
        assert_eq!(err.key(), Some("feast.tracing"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = decode(json!({
            "coreHost": "core",
            "grpcPort": 6566,
            "store": { "ttl": "1h" },
            "logging": { "level": "debug" }
        }))
        .unwrap();

        assert_eq!(config.core_host, "core");
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn serializes_with_original_key_names() {
        let config = ServingConfig {
            core_host: "core".to_string(),
            jobs: JobConfig { staging_location: "/tmp".to_string(), ..Default::default() },
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["coreHost"], "core");
        assert_eq!(value["corePort"], 0);
        assert_eq!(value["jobs"]["stagingLocation"], "/tmp");
        assert_eq!(value["tracing"]["tracerName"], "");
    }
}
