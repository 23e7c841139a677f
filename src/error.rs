use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[source] envy::Error),
    #[error("invalid allowed origin {origin:?}")]
    InvalidOrigin { origin: String },
}
