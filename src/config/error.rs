use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a configuration document.
///
/// Loading is the only fallible operation; lookups on a loaded document
/// never error, they produce `None` instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
