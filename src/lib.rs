//! Set/get throughput benchmarks for embedded key-value stores.
//!
//! A scrambled Zipfian dataset is generated once and replayed against sled,
//! fjall and redb, each opened with synchronous writes. The criterion entry
//! point lives in `benches/databases.rs`; everything it drives is here so
//! tests can run the same phases on small datasets.

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod schema;
pub mod store;
pub mod units;
pub mod workload;

pub use config::BenchConfig;
pub use driver::{run_store, Phase, PhaseStats, StoreBench, StoreReport};
pub use error::{Error, Result};
pub use store::{KvStore, StoreGuard, StoreKind};
pub use workload::{generate, generate_with_rng, Dataset};
