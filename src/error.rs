use std::{io, path::PathBuf};

use thiserror::Error;

/// Rejection of a nearest-neighbour query before any work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid coordinates")]
    InvalidCoordinates,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data sources configured")]
    NoSources,
    #[error("data file {} does not exist", .0.display())]
    Missing(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;
