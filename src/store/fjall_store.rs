use std::path::Path;

use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};

use super::{KvStore, OpenOptions, StoreKind};
use crate::error::Result;
use crate::logging;

const PARTITION_NAME: &str = "benchmark";

/// fjall keyspace with a single partition.
///
/// fjall is chatty through the `log` facade, so opening one installs the
/// store log bridge, which only lets errors through.
pub struct FjallStore {
    keyspace: Keyspace,
    items: PartitionHandle,
    sync_writes: bool,
}

impl FjallStore {
    pub fn open(dir: &Path, options: OpenOptions) -> Result<Self> {
        logging::install_store_log_bridge();

        let keyspace = Config::new(dir).open()?;
        let items = keyspace.open_partition(PARTITION_NAME, PartitionCreateOptions::default())?;
        Ok(Self {
            keyspace,
            items,
            sync_writes: options.sync_writes,
        })
    }
}

impl KvStore for FjallStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Fjall
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.items.insert(key, value)?;
        if self.sync_writes {
            self.keyspace.persist(PersistMode::SyncAll)?;
        }
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.items.get(key)?.map(|v| v.to_vec()))
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}
