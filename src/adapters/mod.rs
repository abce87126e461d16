mod document_source;
mod env_source;

pub use document_source::{DocumentSource, FileSource, SourceFormat};
pub use env_source::EnvSource;
