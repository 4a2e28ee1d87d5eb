use std::path::Path;

use super::{KvStore, OpenOptions, StoreKind};
use crate::error::Result;

/// sled tree in its own directory.
///
/// Background flushing is disabled; with `sync_writes` every insert is
/// followed by an explicit flush.
pub struct SledStore {
    db: sled::Db,
    sync_writes: bool,
}

impl SledStore {
    pub fn open(dir: &Path, options: OpenOptions) -> Result<Self> {
        let db = sled::Config::new()
            .path(dir)
            .flush_every_ms(None)
            .open()?;
        Ok(Self {
            db,
            sync_writes: options.sync_writes,
        })
    }
}

impl KvStore for SledStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Sled
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db.insert(key, value)?;
        if self.sync_writes {
            self.db.flush()?;
        }
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
