//! Environment variable source.
//!
//! `FEAST_STORE_REDISPOOLMAXSIZE=16` binds to `feast.store.redisPoolMaxSize`:
//! the prefix is stripped, the remaining segments are lowercased and nested.
//! A dotted prefix such as `app.feast` reads `APP_FEAST_*` into `app.feast`.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{ConfigError, prefix_segments};
use crate::ports::ConfigSource;

/// Configuration read from environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Read the process environment when the loader runs.
    pub fn process() -> Self {
        Self { vars: None }
    }

    /// Use a fixed set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()) }
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        if let Some(vars) = &self.vars {
            return vars.clone();
        }
        std::env::vars_os()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    let name = match key {
                        Ok(key) => key,
                        Err(raw) => raw.to_string_lossy().into_owned(),
                    };
                    warn!(variable = %name, "skipping non UTF-8 environment variable");
                    None
                }
            })
            .collect()
    }
}

impl ConfigSource for EnvSource {
    fn origin(&self) -> String {
        "environment".to_string()
    }

    fn read(&self, prefix: &str) -> Result<Map<String, Value>, ConfigError> {
        let prefix_path = prefix_segments(prefix);
        if prefix_path.is_empty() {
            debug!("no root prefix; environment variables are not bound");
            return Ok(Map::new());
        }
        let var_prefix = format!("{}_", env_prefix(&prefix_path));
        let mut vars: Vec<(String, String)> = self
            .snapshot()
            .into_iter()
            .filter(|(key, _)| key.starts_with(&var_prefix))
            .collect();
        vars.sort();

        let mut tree = Map::new();
        for (key, value) in vars {
            let segments: Vec<String> = key[var_prefix.len()..]
                .split('_')
                .filter(|segment| !segment.is_empty())
                .map(str::to_ascii_lowercase)
                .collect();
            if segments.is_empty() {
                continue;
            }
            insert_path(&mut tree, &segments, value, &key);
        }

        if tree.is_empty() {
            return Ok(tree);
        }
        let root = prefix_path.iter().rev().fold(tree, |inner, segment| {
            Map::from_iter([(segment.to_string(), Value::Object(inner))])
        });
        Ok(root)
    }
}

/// Environment spelling of a root prefix: `app.feast` -> `APP_FEAST`.
fn env_prefix(segments: &[&str]) -> String {
    segments
        .join("_")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

/// Insert `value` under nested `segments`; nested keys win over scalars.
fn insert_path(tree: &mut Map<String, Value>, segments: &[String], value: String, var: &str) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut cursor = tree;
    for segment in parents {
        let entry = cursor.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            warn!(variable = var, "environment value is shadowed by nested variables; dropping it");
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        cursor = next;
    }
    if cursor.get(last).is_some_and(Value::is_object) {
        warn!(variable = var, "environment value is shadowed by nested variables; dropping it");
        return;
    }
    cursor.insert(last.clone(), Value::String(value));
}
