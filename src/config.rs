//! Benchmark configuration.
//!
//! Every knob the suite reads lives here, so tests can shrink the dataset and
//! point the stores at a temporary root without touching process state.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::store::StoreKind;

pub const DEFAULT_NUM_ITEMS: usize = 100_000;
pub const DEFAULT_KEY_PREFIX: &str = "key";
pub const DEFAULT_VALUE_SIZE: usize = 100;
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_SAMPLE_SIZE: usize = 10;
pub const DEFAULT_LOG_FILTER: &str = "info,store_lib=error";

#[derive(Debug, Clone, Serialize)]
pub struct BenchConfig {
    /// Number of generated key/value pairs.
    pub num_items: usize,
    pub key_prefix: String,
    /// Length of every generated value in bytes.
    pub value_size: usize,
    /// Directory the per-store paths are resolved against.
    pub root: PathBuf,
    pub sled_path: PathBuf,
    pub fjall_path: PathBuf,
    pub redb_path: PathBuf,
    /// Persist every write before the operation returns.
    pub sync_writes: bool,
    /// How long redb waits for a file lock held by a stale handle.
    pub lock_timeout: Duration,
    /// Criterion sample count per sub-benchmark.
    pub sample_size: usize,
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            num_items: DEFAULT_NUM_ITEMS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            value_size: DEFAULT_VALUE_SIZE,
            root: PathBuf::from("."),
            sled_path: PathBuf::from("sled.db"),
            fjall_path: PathBuf::from("fjall.db"),
            redb_path: PathBuf::from("redb.db"),
            sync_writes: true,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            sample_size: DEFAULT_SAMPLE_SIZE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl BenchConfig {
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_num_items(mut self, num_items: usize) -> Self {
        self.num_items = num_items;
        self
    }

    pub fn with_value_size(mut self, value_size: usize) -> Self {
        self.value_size = value_size;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Directory owned by `kind` for the duration of its sub-benchmark.
    pub fn store_path(&self, kind: StoreKind) -> PathBuf {
        let relative = match kind {
            StoreKind::Sled => &self.sled_path,
            StoreKind::Fjall => &self.fjall_path,
            StoreKind::Redb => &self.redb_path,
        };
        self.root.join(relative)
    }
}
