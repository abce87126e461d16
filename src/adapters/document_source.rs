//! File and in-memory document sources (YAML, JSON, TOML).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

use crate::domain::ConfigError;
use crate::ports::ConfigSource;

/// Text format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
    Toml,
}

impl SourceFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yml" | "yaml" => Some(SourceFormat::Yaml),
            "json" => Some(SourceFormat::Json),
            "toml" => Some(SourceFormat::Toml),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::Yaml => "yaml",
            SourceFormat::Json => "json",
            SourceFormat::Toml => "toml",
        }
    }

    /// Parse `text` into a format-neutral tree.
    ///
    /// Whitespace-only documents parse as `Value::Null` in every format.
    pub fn parse(self, text: &str) -> Result<Value, String> {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        match self {
            SourceFormat::Yaml => {
                serde_yaml::from_str(text).map(|Tree(value)| value).map_err(|e| e.to_string())
            }
            SourceFormat::Json => {
                serde_json::from_str(text).map(|Tree(value)| value).map_err(|e| e.to_string())
            }
            SourceFormat::Toml => {
                let table: toml::Table = toml::from_str(text).map_err(|e| e.to_string())?;
                Ok(toml_to_json(toml::Value::Table(table)))
            }
        }
    }
}

/// A configuration document held in memory.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    origin: String,
    format: SourceFormat,
    text: String,
}

impl DocumentSource {
    pub fn new<O: Into<String>, T: Into<String>>(format: SourceFormat, origin: O, text: T) -> Self {
        Self { origin: origin.into(), format, text: text.into() }
    }
}

impl ConfigSource for DocumentSource {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn read(&self, _prefix: &str) -> Result<Map<String, Value>, ConfigError> {
        parse_root(self.format, &self.origin, &self.text)
    }
}

/// A configuration document read from disk when the loader runs.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for FileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self, _prefix: &str) -> Result<Map<String, Value>, ConfigError> {
        let origin = self.origin();
        let format = SourceFormat::from_path(&self.path).ok_or_else(|| {
            ConfigError::source_unavailable(
                &origin,
                "unsupported file extension (expected .yml, .yaml, .json or .toml)",
            )
        })?;
        let text = fs::read_to_string(&self.path)
            .map_err(|err| ConfigError::source_unavailable(&origin, err.to_string()))?;
        parse_root(format, &origin, &text)
    }
}

fn parse_root(
    format: SourceFormat,
    origin: &str,
    text: &str,
) -> Result<Map<String, Value>, ConfigError> {
    let value = format.parse(text).map_err(|details| {
        ConfigError::source_unavailable(origin, format!("invalid {}: {}", format.name(), details))
    })?;
    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::source_unavailable(origin, "document root must be a mapping")),
    }
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(number) => Value::Number(number.into()),
        toml::Value::Float(number) => float_value(number),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let entries = table.into_iter().map(|(key, value)| (key, toml_to_json(value)));
            Value::Object(entries.collect())
        }
    }
}

/// NaN and the infinities have no JSON number form; they keep their text so
/// that integer fields reject them and string fields read them verbatim.
fn float_value(number: f64) -> Value {
    Number::from_f64(number).map(Value::Number).unwrap_or_else(|| Value::String(number.to_string()))
}

/// Format-neutral tree deserialized straight from a YAML or JSON document.
///
/// A key repeated within one mapping moves to the position of its last
/// occurrence, so later spellings of a field take precedence.
struct Tree(Value);

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor).map(Tree)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, sequence or mapping")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(float_value(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Tree::deserialize(deserializer).map(|Tree(value)| value)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Tree(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Map::new();
        while let Some(Tree(key)) = map.next_key()? {
            let key = match key {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Null => "null".to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(de::Error::custom("mapping keys must be scalars"));
                }
            };
            let Tree(value) = map.next_value()?;
            entries.shift_remove(&key);
            entries.insert(key, value);
        }
        Ok(Value::Object(entries))
    }
}
