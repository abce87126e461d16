pub mod check;
pub mod show;

use std::path::PathBuf;

use crate::app::ConfigLoader;
use crate::domain::DEFAULT_PREFIX;

/// Where a command reads its configuration from.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Documents applied in order, later files overriding earlier ones.
    pub files: Vec<PathBuf>,
    /// Apply `<PREFIX>_*` environment variables after the files.
    pub use_env: bool,
    /// Root key selecting the serving settings.
    pub prefix: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { files: Vec::new(), use_env: true, prefix: DEFAULT_PREFIX.to_string() }
    }
}

impl SourceOptions {
    pub fn loader(&self) -> ConfigLoader {
        let loader = self
            .files
            .iter()
            .fold(ConfigLoader::new().with_prefix(self.prefix.as_str()), |loader, path| {
                loader.file(path.as_path())
            });
        if self.use_env { loader.env() } else { loader }
    }
}
