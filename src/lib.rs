//! feast-serving-config: configuration schema and loader for the feature serving process.
//!
//! Settings live under a single root key (`feast` by default) in YAML, JSON
//! or TOML documents, optionally overridden by `FEAST_*` environment
//! variables. Decoding produces an immutable [`ServingConfig`] that the rest
//! of the process reads by reference.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

pub use adapters::{DocumentSource, EnvSource, FileSource, SourceFormat};
pub use app::commands::show::{RenderFormat, redact, render};
pub use app::{ConfigLoader, load_config};
pub use domain::{
    AppError, ConfigError, DEFAULT_PREFIX, JobConfig, Section, ServingConfig, StoreConfig,
    TracingConfig,
};
pub use ports::ConfigSource;
