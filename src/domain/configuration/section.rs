//! Typed view over one subtree of the layered configuration documents.
//!
//! A `Section` holds the mappings found at the same path in every loaded
//! source, ordered from lowest to highest precedence. Field readers resolve
//! keys with relaxed binding and coerce the raw value into the declared type.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::ConfigError;

/// A nested mapping addressed by its dotted key path.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    path: String,
    layers: Vec<&'a Map<String, Value>>,
}

impl<'a> Section<'a> {
    /// Create a section at `path` over `layers`, lowest precedence first.
    pub fn new(path: impl Into<String>, layers: Vec<&'a Map<String, Value>>) -> Self {
        Self { path: path.into(), layers }
    }

    /// Dotted key path of this section (empty for the document root).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Dotted key path of `field` inside this section.
    pub fn key_path(&self, field: &str) -> String {
        if self.path.is_empty() { field.to_string() } else { format!("{}.{}", self.path, field) }
    }

    /// Read a string field; absent values decode to `""`.
    pub fn string(&self, field: &str) -> Result<String, ConfigError> {
        match self.lookup(field) {
            None => Ok(String::new()),
            Some(value) => {
                scalar_text(value).ok_or_else(|| self.mismatch(field, "string", value))
            }
        }
    }

    /// Read a 32-bit integer field; absent values decode to `0`.
    pub fn int(&self, field: &str) -> Result<i32, ConfigError> {
        let Some(value) = self.lookup(field) else {
            return Ok(0);
        };
        let parsed = match value {
            Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(text) => text.trim().parse::<i32>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.mismatch(field, "integer", value))
    }

    /// Read a boolean field; absent values decode to `false`.
    pub fn boolean(&self, field: &str) -> Result<bool, ConfigError> {
        let Some(value) = self.lookup(field) else {
            return Ok(false);
        };
        let parsed = match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => match number.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            Value::String(text) => parse_flag(text),
            _ => None,
        };
        parsed.ok_or_else(|| self.mismatch(field, "boolean", value))
    }

    /// Open the nested section stored under `field`.
    ///
    /// Mappings found under the field in every layer are kept, so nested
    /// sections merge across sources. Absent fields yield an empty section.
    pub fn child(&self, field: &str) -> Result<Section<'a>, ConfigError> {
        let mut layers = Vec::new();
        for layer in self.layers.iter().copied() {
            for (_, value) in matching_entries(layer, field) {
                match value {
                    Value::Null => {}
                    Value::Object(map) => layers.push(map),
                    other => return Err(self.mismatch(field, "mapping", other)),
                }
            }
        }
        Ok(Section::new(self.key_path(field), layers))
    }

    /// Read a string-to-string mapping; absent values decode to an empty map.
    ///
    /// Keys are taken verbatim. Entries from later layers replace earlier
    /// ones with the same key, and nested mappings flatten into dotted keys.
    pub fn string_map(&self, field: &str) -> Result<BTreeMap<String, String>, ConfigError> {
        let path = self.key_path(field);
        let mut entries = BTreeMap::new();
        for layer in self.layers.iter().copied() {
            for (_, value) in matching_entries(layer, field) {
                match value {
                    Value::Null => {}
                    Value::Object(map) => flatten_into(&mut entries, None, map, &path)?,
                    other => {
                        return Err(ConfigError::type_mismatch(path.clone(), "mapping", other));
                    }
                }
            }
        }
        Ok(entries)
    }

    /// Highest-precedence non-null value bound to `field`.
    fn lookup(&self, field: &str) -> Option<&'a Value> {
        self.layers.iter().copied().rev().find_map(|layer| {
            let mut matches: Vec<&'a Value> =
                matching_entries(layer, field).map(|(_, value)| value).collect();
            matches.retain(|value| !value.is_null());
            matches.pop()
        })
    }

    fn mismatch(&self, field: &str, expected: &'static str, value: &Value) -> ConfigError {
        ConfigError::type_mismatch(self.key_path(field), expected, value)
    }
}

/// Entries of `map` whose key binds to `field`, in document order.
fn matching_entries<'m, 'f>(
    map: &'m Map<String, Value>,
    field: &'f str,
) -> impl Iterator<Item = (&'m String, &'m Value)> + use<'m, 'f> {
    map.iter().filter(move |(key, _)| relaxed_eq(key, field))
}

/// Compare keys ignoring ASCII case, `-` and `_`.
pub(crate) fn relaxed_eq(candidate: &str, field: &str) -> bool {
    fn canonical(key: &str) -> impl Iterator<Item = char> + '_ {
        key.chars().filter(|c| *c != '-' && *c != '_').map(|c| c.to_ascii_lowercase())
    }
    canonical(candidate).eq(canonical(field))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn flatten_into(
    entries: &mut BTreeMap<String, String>,
    parent: Option<&str>,
    map: &Map<String, Value>,
    path: &str,
) -> Result<(), ConfigError> {
    for (key, value) in map {
        let full_key = match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Null => {}
            Value::Object(nested) => flatten_into(entries, Some(&full_key), nested, path)?,
            Value::Array(_) => {
                return Err(ConfigError::type_mismatch(
                    format!("{path}.{full_key}"),
                    "string",
                    value,
                ));
            }
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    entries.insert(full_key, text);
                }
            }
        }
    }
    Ok(())
}
