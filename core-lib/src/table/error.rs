use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an instruction table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read instruction table {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed instruction table: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
