use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("workload size must be positive")]
    EmptyWorkload,

    #[error("failed to prepare {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("sled: {0}")]
    Sled(#[from] sled::Error),

    #[error("fjall: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("redb: {0}")]
    Redb(#[from] redb::Error),

    #[error("timed out after {timeout:?} waiting for the lock on {}", path.display())]
    LockTimeout { path: PathBuf, timeout: Duration },

    #[error("key {0:?} not found")]
    KeyNotFound(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
