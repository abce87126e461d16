use serde_json::Value;
use thiserror::Error;

/// Failure while decoding the serving configuration.
///
/// Both variants are fatal at startup; the message names the offending key
/// or source so the operator can fix it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A source value cannot be coerced into the declared field type.
    #[error("Invalid value for '{key}': expected {expected}, found {found}")]
    TypeMismatch { key: String, expected: &'static str, found: String },

    /// A configuration source cannot be read or parsed.
    #[error("Configuration source '{origin}' is unavailable: {reason}")]
    SourceUnavailable { origin: String, reason: String },
}

impl ConfigError {
    pub fn type_mismatch<K: Into<String>>(key: K, expected: &'static str, value: &Value) -> Self {
        ConfigError::TypeMismatch { key: key.into(), expected, found: describe(value) }
    }

    pub fn source_unavailable<O: Into<String>, R: Into<String>>(origin: O, reason: R) -> Self {
        ConfigError::SourceUnavailable { origin: origin.into(), reason: reason.into() }
    }

    /// Dotted key path of a type mismatch.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::TypeMismatch { key, .. } => Some(key),
            ConfigError::SourceUnavailable { .. } => None,
        }
    }
}

/// Library-wide error type for the command-line surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be decoded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The effective configuration could not be rendered.
    #[error("Failed to render configuration as {format}: {details}")]
    Render { format: &'static str, details: String },
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => format!("boolean {flag}"),
        Value::Number(number) => format!("number {number}"),
        Value::String(text) => format!("string {text:?}"),
        Value::Array(_) => "sequence".to_string(),
        Value::Object(_) => "mapping".to_string(),
    }
}
