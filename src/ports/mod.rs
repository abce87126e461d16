mod config_source;

pub use config_source::ConfigSource;
