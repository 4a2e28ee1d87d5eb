//! Result recorder for saving benchmark results to JSON files.
//!
//! Creates JSON files in the `results/` directory following the schema in
//! `embedded_kv_benchmarks::schema`.

use super::{read_cpu_model, read_total_ram_gb};
use embedded_kv_benchmarks::schema::*;
use embedded_kv_benchmarks::{BenchConfig, Phase, StoreReport};

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Accumulates benchmark results and writes them to a JSON file.
pub struct ResultRecorder {
    category: String,
    parameters: HashMap<String, serde_json::Value>,
    metadata: RunMetadata,
    results: Vec<BenchmarkResult>,
}

impl ResultRecorder {
    /// Captures metadata (hardware, git, timestamp) at construction time.
    pub fn new(category: &str, config: &BenchConfig) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("num_items".into(), serde_json::json!(config.num_items));
        parameters.insert("key_prefix".into(), serde_json::json!(config.key_prefix));
        parameters.insert("value_size".into(), serde_json::json!(config.value_size));
        parameters.insert("sync_writes".into(), serde_json::json!(config.sync_writes));
        parameters.insert("distribution".into(), serde_json::json!("scrambled_zipfian"));

        Self {
            category: category.to_string(),
            parameters,
            metadata: RunMetadata {
                timestamp: timestamp_now(),
                git_commit: git_output(&["rev-parse", "--short", "HEAD"]),
                git_branch: git_output(&["rev-parse", "--abbrev-ref", "HEAD"]),
                git_dirty: git_output(&["status", "--porcelain"]).map(|out| !out.is_empty()),
                harness_version: env!("CARGO_PKG_VERSION").to_string(),
                hardware: capture_hardware(),
            },
            results: Vec::new(),
        }
    }

    /// Record both phases of a finished store. Phases that never ran are skipped.
    pub fn record_store(&mut self, report: &StoreReport) {
        for phase in Phase::ALL {
            let stats = report.phase(phase);
            if stats.iterations == 0 {
                continue;
            }
            let name = report.kind.name();
            self.results.push(BenchmarkResult {
                benchmark: format!("Databases/{}/{}-{}", name, name, phase.label()),
                store: report.kind.label().to_string(),
                phase: phase.label().to_string(),
                parameters: self.parameters.clone(),
                metrics: BenchmarkMetrics {
                    ops_per_sec: stats.ops_per_sec(),
                    mean_ns: stats.mean().map(|d| d.as_nanos() as u64),
                    iterations: Some(stats.iterations),
                    elapsed_ns: Some(stats.elapsed.as_nanos() as u64),
                },
            });
        }
    }

    /// Write all accumulated results to a JSON file in `results/`.
    ///
    /// File naming: `<category>-<timestamp>-<commit>.json`
    pub fn save(self) -> io::Result<PathBuf> {
        let report = BenchmarkReport {
            schema_version: 1,
            metadata: self.metadata.clone(),
            results: self.results,
        };

        let commit = self
            .metadata
            .git_commit
            .as_deref()
            .unwrap_or("unknown");
        let ts = self.metadata.timestamp.replace(':', "-");
        let filename = format!("{}-{}-{}.json", self.category, ts, commit);

        let results_dir = PathBuf::from("results");
        std::fs::create_dir_all(&results_dir)?;
        let path = results_dir.join(&filename);

        let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
        std::fs::write(&path, json)?;

        eprintln!("Results saved to {}", path.display());
        Ok(path)
    }
}

/// UTC wall clock at second precision, e.g. `2026-10-19T08:15:02Z`.
fn timestamp_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(0)
        .unwrap_or(now)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Trimmed stdout of a successful `git` invocation.
fn git_output(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn capture_hardware() -> HardwareInfo {
    HardwareInfo {
        cpu: read_cpu_model(),
        cores: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(0),
        ram_gb: read_total_ram_gb(),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}
