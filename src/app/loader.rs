//! Layered configuration loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::{DocumentSource, EnvSource, FileSource, SourceFormat};
use crate::domain::{ConfigError, DEFAULT_PREFIX, Section, ServingConfig, prefix_segments};
use crate::ports::ConfigSource;

/// Builder that layers configuration sources and decodes the result.
///
/// Sources are applied in the order they are added; later sources override
/// earlier ones field by field.
pub struct ConfigLoader {
    prefix: String,
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader with the default `feast` prefix and no sources.
    pub fn new() -> Self {
        Self { prefix: DEFAULT_PREFIX.to_string(), sources: Vec::new() }
    }

    /// Select keys under a different root prefix.
    ///
    /// A dotted prefix such as `app.feast` walks nested mappings.
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Add a YAML, JSON or TOML file, chosen by extension.
    pub fn file<P: Into<PathBuf>>(self, path: P) -> Self {
        self.source(FileSource::new(path))
    }

    /// Add in-memory document text.
    pub fn document<O: Into<String>, T: Into<String>>(
        self,
        format: SourceFormat,
        origin: O,
        text: T,
    ) -> Self {
        self.source(DocumentSource::new(format, origin, text))
    }

    /// Add the process environment.
    pub fn env(self) -> Self {
        self.source(EnvSource::process())
    }

    /// Add a fixed set of environment-style variables.
    pub fn env_vars<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.source(EnvSource::from_vars(vars))
    }

    /// Add any source implementation.
    pub fn source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Read every source and decode the serving configuration.
    ///
    /// Fails on the first unreadable source or mistyped value; no partial
    /// configuration is returned.
    pub fn load(&self) -> Result<ServingConfig, ConfigError> {
        let mut documents = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let document = source.read(&self.prefix)?;
            debug!(origin = %source.origin(), keys = document.len(), "read configuration source");
            documents.push(document);
        }

        let mut section = Section::new("", documents.iter().collect());
        for segment in prefix_segments(&self.prefix) {
            section = section.child(segment)?;
        }
        let config = ServingConfig::decode(&section)?;
        debug!(
            prefix = %self.prefix,
            sources = self.sources.len(),
            store_type = %config.store.store_type,
            "decoded serving configuration"
        );
        Ok(config)
    }
}

/// Load the configuration from `paths` in order, then the process environment.
pub fn load_config<P: AsRef<Path>>(paths: &[P]) -> Result<ServingConfig, ConfigError> {
    let mut loader = ConfigLoader::new();
    for path in paths {
        let path: &Path = path.as_ref();
        loader = loader.file(path);
    }
    loader.env().load()
}
