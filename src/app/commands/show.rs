//! Render the effective configuration.

use serde_json::{Map, Value};

use crate::domain::{AppError, ServingConfig, StoreConfig, prefix_segments};

use super::SourceOptions;

/// Mask printed in place of secret option values.
pub const REDACTED: &str = "********";

/// Option key fragments treated as secrets.
const SECRET_MARKERS: [&str; 4] = ["password", "secret", "token", "credential"];

/// Output format for the effective configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl RenderFormat {
    pub fn name(self) -> &'static str {
        match self {
            RenderFormat::Yaml => "yaml",
            RenderFormat::Json => "json",
            RenderFormat::Toml => "toml",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub sources: SourceOptions,
    pub format: RenderFormat,
}

/// Load the configuration and render it with secret options masked.
pub fn execute(options: &ShowOptions) -> Result<String, AppError> {
    let config = options.sources.loader().load()?;
    render(&redact(&config), &options.sources.prefix, options.format)
}

/// Serialize `config` nested under `prefix`, so the output loads back unchanged.
pub fn render(
    config: &ServingConfig,
    prefix: &str,
    format: RenderFormat,
) -> Result<String, AppError> {
    let failed = |details: String| AppError::Render { format: format.name(), details };
    let config = serde_json::to_value(config).map_err(|e| failed(e.to_string()))?;
    let document = prefix_segments(prefix).into_iter().rev().fold(config, |inner, segment| {
        Value::Object(Map::from_iter([(segment.to_string(), inner)]))
    });
    let rendered = match format {
        RenderFormat::Yaml => serde_yaml::to_string(&document).map_err(|e| e.to_string()),
        RenderFormat::Json => serde_json::to_string_pretty(&document)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
        RenderFormat::Toml => toml::to_string(&document).map_err(|e| e.to_string()),
    };
    rendered.map_err(failed)
}

/// Copy of `config` with secret-looking option values masked in both stores.
pub fn redact(config: &ServingConfig) -> ServingConfig {
    let mut redacted = config.clone();
    redact_store(&mut redacted.store);
    redact_store(&mut redacted.jobs.store);
    redacted
}

fn redact_store(store: &mut StoreConfig) {
    for (key, value) in store.options.iter_mut() {
        if is_secret_key(key) {
            *value = REDACTED.to_string();
        }
    }
}

fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SECRET_MARKERS.iter().any(|marker| key.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SourceFormat;
    use crate::app::ConfigLoader;

    fn sample() -> ServingConfig {
        let mut config = ServingConfig {
            version: "0.3.2".to_string(),
            core_host: "core.internal".to_string(),
            core_port: 6565,
            ..Default::default()
        };
        config.store.store_type = "redis".to_string();
        config.store.redis_pool_max_size = 16;
        config.store.options.insert("host".to_string(), "localhost".to_string());
        config.store.options.insert("Redis-Password".to_string(), "hunter2".to_string());
        config.jobs.staging_location = "gs://feast/staging".to_string();
        config.jobs.store.options.insert("auth_token".to_string(), "abc".to_string());
        config.tracing.enabled = true;
        config
    }

    #[test]
    fn redact_masks_secret_options_only() {
        let redacted = redact(&sample());
        assert_eq!(redacted.store.option("host"), Some("localhost"));
        assert_eq!(redacted.store.option("Redis-Password"), Some(REDACTED));
        assert_eq!(redacted.jobs.store.option("auth_token"), Some(REDACTED));
        assert_eq!(redacted.core_host, "core.internal");
    }

    #[test]
    fn rendered_output_loads_back_in_every_format() {
        let config = sample();
        for (render_format, source_format) in [
            (RenderFormat::Yaml, SourceFormat::Yaml),
            (RenderFormat::Json, SourceFormat::Json),
            (RenderFormat::Toml, SourceFormat::Toml),
        ] {
            let text = render(&config, "feast", render_format).unwrap();
            let reloaded =
                ConfigLoader::new().document(source_format, "rendered", text).load().unwrap();
            assert_eq!(reloaded, config, "format {}", render_format.name());
        }
    }

    #[test]
    fn yaml_output_uses_original_key_names() {
        let text = render(&sample(), "feast", RenderFormat::Yaml).unwrap();
        assert!(text.starts_with("feast:"));
        assert!(text.contains("coreHost: core.internal"));
        assert!(text.contains("type: redis"));
        assert!(text.contains("stagingLocation: gs://feast/staging"));
    }

    #[test]
    fn dotted_prefix_renders_nested_mappings() {
        let config = sample();
        let text = render(&config, "app.feast", RenderFormat::Yaml).unwrap();
        assert!(text.starts_with("app:\n  feast:\n"));

        let reloaded = ConfigLoader::new()
            .with_prefix("app.feast")
            .document(SourceFormat::Yaml, "rendered", text)
            .load()
            .unwrap();
        assert_eq!(reloaded, config);
    }
}
