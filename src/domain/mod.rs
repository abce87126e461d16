pub mod configuration;
pub mod error;

pub use configuration::{
    DEFAULT_PREFIX, JobConfig, Section, ServingConfig, StoreConfig, TracingConfig, prefix_segments,
};
pub use error::{AppError, ConfigError};
