//! Timed set/get phases against one store.
//!
//! A phase runs `n` iterations chosen by the caller (criterion's
//! `iter_custom` count, the equivalent of `b.N`) and returns the wall-clock
//! time of the loop. The Set phase walks the dataset in order, wrapping
//! around; the Get phase reads back indices below the last one written.

use std::time::{Duration, Instant};

use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::store::{KvStore, StoreGuard, StoreKind};
use crate::workload::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Set,
    Get,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Set, Phase::Get];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Set => "Set",
            Self::Get => "Get",
        }
    }
}

/// Running totals for one phase across every timed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseStats {
    pub iterations: u64,
    pub elapsed: Duration,
}

impl PhaseStats {
    fn record(&mut self, iterations: u64, elapsed: Duration) {
        self.iterations += iterations;
        self.elapsed += elapsed;
    }

    /// Mean latency per operation.
    pub fn mean(&self) -> Option<Duration> {
        if self.iterations == 0 {
            return None;
        }
        let nanos = self.elapsed.as_nanos() / u128::from(self.iterations);
        Some(Duration::from_nanos(nanos as u64))
    }

    pub fn ops_per_sec(&self) -> Option<f64> {
        if self.iterations == 0 || self.elapsed.is_zero() {
            return None;
        }
        Some(self.iterations as f64 / self.elapsed.as_secs_f64())
    }
}

/// Outcome of one store's sub-benchmark.
#[derive(Debug, Clone)]
pub struct StoreReport {
    pub kind: StoreKind,
    pub set: PhaseStats,
    pub get: PhaseStats,
    pub last_set_idx: usize,
}

impl StoreReport {
    pub fn phase(&self, phase: Phase) -> &PhaseStats {
        match phase {
            Phase::Set => &self.set,
            Phase::Get => &self.get,
        }
    }
}

/// One open store, the shared dataset, and the phase bookkeeping.
pub struct StoreBench<'a> {
    store: StoreGuard,
    dataset: &'a Dataset,
    last_set_idx: usize,
    set: PhaseStats,
    get: PhaseStats,
}

impl<'a> StoreBench<'a> {
    pub fn open(kind: StoreKind, config: &BenchConfig, dataset: &'a Dataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(Error::EmptyWorkload);
        }
        Ok(Self {
            store: StoreGuard::open(kind, config)?,
            dataset,
            last_set_idx: 0,
            set: PhaseStats::default(),
            get: PhaseStats::default(),
        })
    }

    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    pub fn store(&self) -> &dyn KvStore {
        &*self.store
    }

    /// Index written by the final iteration of the latest Set batch.
    pub fn last_set_idx(&self) -> usize {
        self.last_set_idx
    }

    pub fn run_set(&mut self, iterations: u64) -> Result<Duration> {
        let len = self.dataset.len() as u64;
        let start = Instant::now();
        for i in 0..iterations {
            let idx = (i % len) as usize;
            self.store
                .set(self.dataset.key(idx).as_bytes(), self.dataset.value(idx))?;
            self.last_set_idx = idx;
        }
        let elapsed = start.elapsed();
        self.set.record(iterations, elapsed);
        Ok(elapsed)
    }

    /// Read keys `[0, last_set_idx)` round-robin.
    ///
    /// Every key read here was written by an earlier Set batch, so a store
    /// answering `None` is reported as [`Error::KeyNotFound`] even though
    /// none of the stores treats a missing key as an error itself.
    pub fn run_get(&mut self, iterations: u64) -> Result<Duration> {
        // A single Set iteration leaves last_set_idx at 0.
        let divisor = self.last_set_idx.max(1) as u64;
        let start = Instant::now();
        for i in 0..iterations {
            let key = self.dataset.key((i % divisor) as usize);
            if self.store.get(key.as_bytes())?.is_none() {
                return Err(Error::KeyNotFound(key.to_string()));
            }
        }
        let elapsed = start.elapsed();
        self.get.record(iterations, elapsed);
        Ok(elapsed)
    }

    /// Close the store, remove its files and hand back the totals.
    pub fn finish(self) -> Result<StoreReport> {
        let report = StoreReport {
            kind: self.store.kind(),
            set: self.set,
            get: self.get,
            last_set_idx: self.last_set_idx,
        };
        self.store.finish()?;
        Ok(report)
    }
}

/// Run one complete sub-benchmark outside criterion.
pub fn run_store(
    kind: StoreKind,
    config: &BenchConfig,
    dataset: &Dataset,
    set_iterations: u64,
    get_iterations: u64,
) -> Result<StoreReport> {
    let mut bench = StoreBench::open(kind, config, dataset)?;
    bench.run_set(set_iterations)?;
    bench.run_get(get_iterations)?;
    bench.finish()
}
