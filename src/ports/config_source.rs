//! Configuration source port.
//!
//! A source turns one external location (a file, in-memory text, the process
//! environment) into a format-neutral document tree. Key binding and type
//! coercion happen later, in `domain::configuration`.

use serde_json::{Map, Value};

use crate::domain::ConfigError;

/// Port for reading one layer of configuration.
pub trait ConfigSource {
    /// Human-readable origin used in diagnostics (file path, `environment`).
    fn origin(&self) -> String;

    /// Read the whole document as a root mapping.
    ///
    /// `prefix` is the root key the caller will select; sources that are not
    /// documents (the environment) use it to pick and nest their entries.
    fn read(&self, prefix: &str) -> Result<Map<String, Value>, ConfigError>;
}
