//! Shared test utilities: temporary roots and small seeded datasets.

#![allow(dead_code)]

use std::collections::HashMap;

use embedded_kv_benchmarks::{generate_with_rng, BenchConfig, Dataset};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

pub const SMALL_ITEMS: usize = 300;

/// A config rooted in a fresh temporary directory. Keep the `TempDir` alive.
pub fn temp_config(num_items: usize) -> (TempDir, BenchConfig) {
    let dir = TempDir::new().unwrap();
    let config = BenchConfig::default()
        .with_root(dir.path())
        .with_num_items(num_items);
    (dir, config)
}

pub fn seeded_dataset(config: &BenchConfig, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(config, &mut rng).unwrap()
}

/// Value a store must hold for each key after writing indices `0..=last`.
pub fn latest_values(dataset: &Dataset, last: usize) -> HashMap<&str, &[u8]> {
    let mut latest = HashMap::new();
    for idx in 0..=last {
        latest.insert(dataset.key(idx), dataset.value(idx));
    }
    latest
}

/// Entries left under the temporary root.
pub fn leftovers(config: &BenchConfig) -> Vec<String> {
    std::fs::read_dir(&config.root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}
