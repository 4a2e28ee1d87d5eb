//! Uniform set/get contract over the embedded stores under test.
//!
//! Each adapter opens its store with synchronous writes, so a `set` returns
//! only after the store reports the write as persisted. [`StoreGuard`] owns an
//! open handle together with its directory and removes both on every exit
//! path.

mod fjall_store;
mod redb_store;
mod sled_store;

use std::fmt;
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::error::{Error, Result};

pub use fjall_store::FjallStore;
pub use redb_store::RedbStore;
pub use sled_store::SledStore;

const REMOVE_ATTEMPTS: u32 = 3;
const REMOVE_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Options every adapter honours when opening.
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    /// Persist each write to stable storage before `set` returns.
    pub sync_writes: bool,
    /// Upper bound on waiting for a file lock left by another handle.
    pub lock_timeout: Duration,
}

impl OpenOptions {
    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            sync_writes: config.sync_writes,
            lock_timeout: config.lock_timeout,
        }
    }
}

pub trait KvStore {
    fn kind(&self) -> StoreKind;

    /// Write one key inside the store's native write path.
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Read one key inside the store's native read path.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Flush outstanding state and release the handle.
    fn close(self: Box<Self>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Sled,
    Fjall,
    Redb,
}

impl StoreKind {
    /// Stores in the order the suite runs them.
    pub const ALL: [StoreKind; 3] = [StoreKind::Sled, StoreKind::Fjall, StoreKind::Redb];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sled => "sled",
            Self::Fjall => "fjall",
            Self::Redb => "redb",
        }
    }

    /// Display name used in benchmark ids, e.g. `Sled-Set`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sled => "Sled",
            Self::Fjall => "Fjall",
            Self::Redb => "Redb",
        }
    }

    /// Open the store rooted at `dir`, which must already exist.
    pub fn open(&self, dir: &Path, options: OpenOptions) -> Result<Box<dyn KvStore>> {
        Ok(match self {
            Self::Sled => Box::new(SledStore::open(dir, options)?),
            Self::Fjall => Box::new(FjallStore::open(dir, options)?),
            Self::Redb => Box::new(RedbStore::open(dir, options)?),
        })
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Scoped handle
// ---------------------------------------------------------------------------

/// An open store plus the directory it owns.
///
/// Dropping the guard closes the store and deletes the directory. Use
/// [`StoreGuard::finish`] to observe errors from that teardown.
pub struct StoreGuard {
    kind: StoreKind,
    path: PathBuf,
    store: Option<Box<dyn KvStore>>,
    released: bool,
}

impl StoreGuard {
    pub fn open(kind: StoreKind, config: &BenchConfig) -> Result<Self> {
        let path = config.store_path(kind);
        prepare_dir(&path)?;

        // The guard exists before the store so a failed open still cleans up.
        let mut guard = Self {
            kind,
            path,
            store: None,
            released: false,
        };
        let store = kind.open(&guard.path, OpenOptions::from_config(config))?;
        debug!(store = kind.label(), path = %guard.path.display(), "opened store");
        guard.store = Some(store);
        Ok(guard)
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the store and remove its directory, reporting the first failure.
    pub fn finish(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let closed = match self.store.take() {
            Some(store) => store.close(),
            None => Ok(()),
        };
        let removed = remove_dir(&self.path);
        debug!(store = self.kind.label(), path = %self.path.display(), "released store");
        closed.and(removed)
    }
}

impl Deref for StoreGuard {
    type Target = dyn KvStore;

    fn deref(&self) -> &Self::Target {
        match &self.store {
            Some(store) => store.as_ref(),
            None => unreachable!("store accessed after release"),
        }
    }
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(store = self.kind.label(), error = %e, "cleanup failed");
        }
    }
}

fn prepare_dir(path: &Path) -> Result<()> {
    if path.exists() {
        info!(path = %path.display(), "directory already exists");
    }
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

fn remove_dir(path: &Path) -> Result<()> {
    // Store background threads can still be closing files right after close.
    let mut attempt = 1;
    loop {
        match fs::remove_dir_all(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) if attempt < REMOVE_ATTEMPTS => {
                debug!(path = %path.display(), error = %e, attempt, "retrying removal");
                thread::sleep(REMOVE_RETRY_INTERVAL);
                attempt += 1;
            }
            Err(e) => return Err(Error::io(path, e)),
        }
    }
}
