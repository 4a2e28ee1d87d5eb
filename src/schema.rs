//! Benchmark result types written to and read from `results/*.json`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level benchmark report written to a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Metadata about this run (hardware, git, timestamp).
    pub metadata: RunMetadata,
    /// Individual benchmark results.
    pub results: Vec<BenchmarkResult>,
}

/// Metadata captured at the start of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// ISO 8601 timestamp of the run start.
    pub timestamp: String,
    /// Short git commit hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    /// Whether the working tree had uncommitted changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
    /// Crate version of the harness that produced the file.
    pub harness_version: String,
    pub hardware: HardwareInfo,
}

/// Hardware information for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareInfo {
    pub cpu: String,
    /// Number of logical cores.
    pub cores: usize,
    /// Total RAM in GB.
    pub ram_gb: u64,
    pub os: String,
    pub arch: String,
}

/// One phase of one store, e.g. `Databases/Sled/Sled-Set`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub benchmark: String,
    /// Store label (`sled`, `fjall`, `redb`).
    pub store: String,
    /// `Set` or `Get`.
    pub phase: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    pub metrics: BenchmarkMetrics,
}

/// Figures derived from the timing loop's totals. Missing ones are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops_per_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_ns: Option<u64>,
    /// Iterations measured across all samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ns: Option<u64>,
}

// ---------------------------------------------------------------------------
// Report comparison
// ---------------------------------------------------------------------------

/// Which figure a [`Delta`] was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeltaBasis {
    MeanNs { base: u64, candidate: u64 },
    OpsPerSec { base: f64, candidate: f64 },
}

/// Change of one benchmark between two reports. Positive `pct` is worse
/// for latency and better for throughput.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub benchmark: String,
    pub basis: DeltaBasis,
    pub pct: f64,
}

impl Delta {
    /// `faster`, `slower` or `~same`, with a 1% dead band.
    pub fn verdict(&self) -> &'static str {
        let improvement = match self.basis {
            DeltaBasis::MeanNs { .. } => -self.pct,
            DeltaBasis::OpsPerSec { .. } => self.pct,
        };
        if improvement > 1.0 {
            "faster"
        } else if improvement < -1.0 {
            "slower"
        } else {
            "~same"
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Comparison {
    pub deltas: Vec<Delta>,
    pub only_base: usize,
    pub only_candidate: usize,
}

/// Match results by benchmark name, preferring mean latency over throughput.
pub fn compare_reports(base: &BenchmarkReport, candidate: &BenchmarkReport) -> Comparison {
    let base_map: HashMap<&str, &BenchmarkResult> = base
        .results
        .iter()
        .map(|r| (r.benchmark.as_str(), r))
        .collect();

    let mut comparison = Comparison::default();
    let mut matched = 0usize;
    for cand in &candidate.results {
        let Some(prev) = base_map.get(cand.benchmark.as_str()) else {
            comparison.only_candidate += 1;
            continue;
        };
        matched += 1;
        if let Some(delta) = delta(&cand.benchmark, &prev.metrics, &cand.metrics) {
            comparison.deltas.push(delta);
        }
    }
    comparison.only_base = base.results.len().saturating_sub(matched);
    comparison
}

fn delta(name: &str, base: &BenchmarkMetrics, cand: &BenchmarkMetrics) -> Option<Delta> {
    let (basis, pct) = if let (Some(b), Some(c)) = (base.mean_ns, cand.mean_ns) {
        (
            DeltaBasis::MeanNs { base: b, candidate: c },
            percent_change(b as f64, c as f64),
        )
    } else if let (Some(b), Some(c)) = (base.ops_per_sec, cand.ops_per_sec) {
        (
            DeltaBasis::OpsPerSec { base: b, candidate: c },
            percent_change(b, c),
        )
    } else {
        return None;
    };
    Some(Delta {
        benchmark: name.to_string(),
        basis,
        pct,
    })
}

fn percent_change(base: f64, candidate: f64) -> f64 {
    if base > 0.0 {
        (candidate - base) / base * 100.0
    } else {
        0.0
    }
}
