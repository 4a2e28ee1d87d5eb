use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use redb::{Database, DatabaseError, Durability, TableDefinition};

use super::{KvStore, OpenOptions, StoreKind};
use crate::error::{Error, Result};

const DB_FILE: &str = "db";
const TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("benchmark");
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// redb database file `<dir>/db` holding one table.
pub struct RedbStore {
    db: Database,
    durability: Durability,
}

impl RedbStore {
    pub fn open(dir: &Path, options: OpenOptions) -> Result<Self> {
        let path = dir.join(DB_FILE);
        let db = create_with_timeout(&path, options.lock_timeout)?;

        let durability = if options.sync_writes {
            Durability::Immediate
        } else {
            Durability::Eventual
        };
        let store = Self { db, durability };
        store.create_table()?;
        Ok(store)
    }

    fn create_table(&self) -> Result<(), redb::Error> {
        let txn = self.db.begin_write()?;
        txn.open_table(TABLE)?;
        txn.commit()?;
        Ok(())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), redb::Error> {
        let mut txn = self.db.begin_write()?;
        txn.set_durability(self.durability);
        {
            let mut table = txn.open_table(TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, redb::Error> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TABLE)?;
        let value = table.get(key)?.map(|v| v.value().to_vec());
        Ok(value)
    }
}

/// Retry while another handle holds the file, up to `timeout`.
fn create_with_timeout(path: &Path, timeout: Duration) -> Result<Database> {
    let deadline = Instant::now() + timeout;
    loop {
        match Database::create(path) {
            Ok(db) => return Ok(db),
            Err(DatabaseError::DatabaseAlreadyOpen) if Instant::now() < deadline => {
                thread::sleep(LOCK_RETRY_INTERVAL);
            }
            Err(DatabaseError::DatabaseAlreadyOpen) => {
                return Err(Error::LockTimeout {
                    path: path.to_path_buf(),
                    timeout,
                })
            }
            Err(e) => return Err(redb::Error::from(e).into()),
        }
    }
}

impl KvStore for RedbStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Redb
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        Ok(self.put(key, value)?)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.read(key)?)
    }

    fn close(self: Box<Self>) -> Result<()> {
        drop(self.db);
        Ok(())
    }
}
