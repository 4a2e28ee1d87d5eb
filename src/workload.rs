//! Synthetic dataset generation with a scrambled Zipfian key distribution.
//!
//! Keys follow the YCSB scrambled Zipfian: a Zipfian sample drawn over a very
//! large item space is FNV-hashed and folded into `[0, count)`, so hot keys are
//! spread across the keyspace instead of clustering at the low indices. Keys
//! repeat on purpose; values are independent random buffers.

use rand::Rng;

use crate::config::BenchConfig;
use crate::error::{Error, Result};

/// Skew constant used by YCSB.
pub const ZIPFIAN_CONSTANT: f64 = 0.99;

/// Item space of the inner Zipfian, large enough that the folded output is
/// insensitive to `count`.
const SCRAMBLE_ITEM_COUNT: u64 = 10_000_000_000;

/// zeta(SCRAMBLE_ITEM_COUNT, ZIPFIAN_CONSTANT), precomputed.
const SCRAMBLE_ZETAN: f64 = 26.46902820178302;

// ---------------------------------------------------------------------------
// Zipfian generators
// ---------------------------------------------------------------------------

/// Zipfian distribution over `[0, num_items)`, most popular item first.
pub struct ZipfianGenerator {
    num_items: u64,
    theta: f64,
    zeta_n: f64,
    alpha: f64,
    eta: f64,
}

impl ZipfianGenerator {
    pub fn new(num_items: u64, theta: f64) -> Self {
        let zeta_n = zeta(num_items, theta);
        Self::with_zeta(num_items, theta, zeta_n)
    }

    fn with_zeta(num_items: u64, theta: f64, zeta_n: f64) -> Self {
        let zeta_2 = zeta(2, theta);
        let alpha = 1.0 / (1.0 - theta);
        let eta = (1.0 - (2.0 / num_items as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);

        Self {
            num_items,
            theta,
            zeta_n,
            alpha,
            eta,
        }
    }

    pub fn next<R: Rng>(&self, rng: &mut R) -> u64 {
        let u: f64 = rng.random();
        let uz = u * self.zeta_n;

        if uz < 1.0 {
            0
        } else if uz < 1.0 + 0.5_f64.powf(self.theta) {
            1
        } else {
            let spread = self.num_items as f64 * (self.eta * u - self.eta + 1.0).powf(self.alpha);
            (spread as u64).min(self.num_items - 1)
        }
    }
}

/// Zipfian over `[0, item_count)` with the popular items scattered.
pub struct ScrambledZipfian {
    item_count: u64,
    inner: ZipfianGenerator,
}

impl ScrambledZipfian {
    pub fn new(item_count: u64) -> Self {
        assert!(item_count > 0, "scrambled zipfian needs a non-empty range");
        Self {
            item_count,
            inner: ZipfianGenerator::with_zeta(
                SCRAMBLE_ITEM_COUNT,
                ZIPFIAN_CONSTANT,
                SCRAMBLE_ZETAN,
            ),
        }
    }

    pub fn next<R: Rng>(&self, rng: &mut R) -> u64 {
        fnv_hash(self.inner.next(rng)) % self.item_count
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Keys and values generated once per run and shared by every store.
#[derive(Debug, Clone)]
pub struct Dataset {
    keys: Vec<String>,
    values: Vec<Vec<u8>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn values(&self) -> &[Vec<u8>] {
        &self.values
    }

    pub fn key(&self, idx: usize) -> &str {
        &self.keys[idx]
    }

    pub fn value(&self, idx: usize) -> &[u8] {
        &self.values[idx]
    }
}

/// Generate the suite's dataset from an OS-seeded RNG.
pub fn generate(config: &BenchConfig) -> Result<Dataset> {
    let mut rng = rand::rng();
    generate_with_rng(config, &mut rng)
}

pub fn generate_with_rng<R: Rng>(config: &BenchConfig, rng: &mut R) -> Result<Dataset> {
    let count = config.num_items;
    if count == 0 {
        return Err(Error::EmptyWorkload);
    }

    let zipfian = ScrambledZipfian::new(count as u64);
    let mut keys = Vec::with_capacity(count);
    let mut values = Vec::with_capacity(count);

    for _ in 0..count {
        keys.push(format_key(&config.key_prefix, zipfian.next(rng)));
        let mut value = vec![0u8; config.value_size];
        rng.fill_bytes(&mut value);
        values.push(value);
    }

    Ok(Dataset { keys, values })
}

pub fn format_key(prefix: &str, index: u64) -> String {
    format!("{prefix}{index}")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute the generalized harmonic number H_{n,theta}.
fn zeta(n: u64, theta: f64) -> f64 {
    let mut sum = 0.0;
    for i in 0..n {
        sum += 1.0 / ((i + 1) as f64).powf(theta);
    }
    sum
}

/// 64-bit FNV-1a with the sign bit cleared.
fn fnv_hash(mut val: u64) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for _ in 0..8 {
        hash ^= val & 0xFF;
        hash = hash.wrapping_mul(0x100000001b3);
        val >>= 8;
    }
    hash & (i64::MAX as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fnv_hash_is_deterministic_and_positive() {
        assert_eq!(fnv_hash(0), fnv_hash(0));
        assert_ne!(fnv_hash(0), fnv_hash(1));
        for v in [0, 1, 42, u64::MAX] {
            assert!(fnv_hash(v) <= i64::MAX as u64);
        }
    }

    #[test]
    fn zipfian_favours_low_ranks() {
        let mut rng = StdRng::seed_from_u64(7);
        let zipf = ZipfianGenerator::new(1000, ZIPFIAN_CONSTANT);
        let mut counts = vec![0u32; 1000];
        for _ in 0..20_000 {
            counts[zipf.next(&mut rng) as usize] += 1;
        }
        assert!(counts[0] > counts[10]);
        assert!(counts[0] > counts[999]);
    }

    #[test]
    fn scrambled_zipfian_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for count in [1u64, 2, 17, 1000] {
            let zipf = ScrambledZipfian::new(count);
            for _ in 0..1000 {
                assert!(zipf.next(&mut rng) < count);
            }
        }
    }

    #[test]
    fn scrambled_zipfian_repeats_hot_keys() {
        let mut rng = StdRng::seed_from_u64(3);
        let zipf = ScrambledZipfian::new(10_000);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10_000 {
            seen.insert(zipf.next(&mut rng));
        }
        assert!(seen.len() < 10_000);
    }

    #[test]
    fn empty_workload_is_rejected() {
        let config = BenchConfig::default().with_num_items(0);
        assert!(matches!(generate(&config), Err(Error::EmptyWorkload)));
    }
}
