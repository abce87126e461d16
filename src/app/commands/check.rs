use crate::domain::{ConfigError, ServingConfig};

use super::SourceOptions;

/// Result of a successful configuration check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub config: ServingConfig,
    pub sources: usize,
}

pub fn execute(options: &SourceOptions) -> Result<CheckOutcome, ConfigError> {
    let config = options.loader().load()?;
    let sources = options.files.len() + usize::from(options.use_env);
    Ok(CheckOutcome { config, sources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options_for(files: Vec<std::path::PathBuf>) -> SourceOptions {
        SourceOptions { files, use_env: false, ..Default::default() }
    }

    #[test]
    fn checks_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("application.yml");
        fs::write(&path, "feast:\n  coreHost: core\n  corePort: 6565\n").unwrap();

        let outcome = execute(&options_for(vec![path])).unwrap();
        assert_eq!(outcome.sources, 1);
        assert_eq!(outcome.config.core_port, 6565);
    }

    #[test]
    fn reports_type_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("application.json");
        fs::write(&path, r#"{ "feast": { "tracing": { "enabled": "sometimes" } } }"#).unwrap();

        let err = execute(&options_for(vec![path])).unwrap_err();
        assert_eq!(err.key(), Some("feast.tracing.enabled"));
    }

    #[test]
    fn reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = execute(&options_for(vec![dir.path().join("nope.toml")])).unwrap_err();
        assert!(matches!(err, ConfigError::SourceUnavailable { .. }));
    }
}
