use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const REFERENCE_YAML: &str = r#"
server:
  port: 8080
feast:
  version: 0.3.2
  coreHost: core.internal
  corePort: 6565
  store:
    name: serving
    type: redis
    options:
      host: localhost
      port: 6379
      password: hunter2
    redisPoolMaxSize: 16
  jobs:
    stagingLocation: gs://feast/staging
    store:
      type: bigquery
  tracing:
    enabled: true
    tracerName: jaeger
    serviceName: serving
"#;

/// Write a serving config file under `dir`.
pub(crate) fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write serving config");
    path
}
