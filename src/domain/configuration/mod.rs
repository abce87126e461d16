pub mod section;
pub mod serving_config;
pub mod store_config;

pub use section::Section;
pub use serving_config::{
    DEFAULT_PREFIX, JobConfig, ServingConfig, TracingConfig, prefix_segments,
};
pub use store_config::StoreConfig;
