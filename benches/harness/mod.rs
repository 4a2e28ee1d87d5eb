//! Shared helpers for the bench targets: hardware capture and report tables.

pub mod recorder;

use embedded_kv_benchmarks::units::{format_count, format_ns};
use embedded_kv_benchmarks::{BenchConfig, Phase, StoreReport};

pub fn read_cpu_model() -> String {
    std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|l| l.starts_with("model name"))
                .and_then(|l| l.split(':').nth(1))
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn read_total_ram_gb() -> u64 {
    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|l| l.starts_with("MemTotal:"))
                .and_then(|l| l.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok())
        })
        .map(|kb| kb / (1024 * 1024))
        .unwrap_or(0)
}

pub fn print_hardware_info() {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(0);
    eprintln!(
        "Hardware: {} | {} cores | {} GB RAM | {}/{}",
        read_cpu_model(),
        cores,
        read_total_ram_gb(),
        std::env::consts::OS,
        std::env::consts::ARCH,
    );
}

pub fn print_suite_header(config: &BenchConfig) {
    eprintln!();
    eprintln!("=== Embedded KV Benchmark ===");
    eprintln!(
        "  items={}  prefix={:?}  value={}B  sync_writes={}",
        format_count(config.num_items as u64),
        config.key_prefix,
        config.value_size,
        config.sync_writes,
    );
    eprintln!();
}

pub fn print_store_report(report: &StoreReport) {
    eprintln!(
        "  {:<12} {:>12}  {:>12}  {:>12}",
        "Benchmark", "iterations", "ops/sec", "mean"
    );
    eprintln!("  {}", "-".repeat(54));
    for phase in Phase::ALL {
        let stats = report.phase(phase);
        let (Some(mean), Some(ops)) = (stats.mean(), stats.ops_per_sec()) else {
            continue;
        };
        eprintln!(
            "  {:<12} {:>12}  {:>12}  {:>12}",
            format!("{}-{}", report.kind.name(), phase.label()),
            format_count(stats.iterations),
            format_count(ops as u64),
            format_ns(mean.as_nanos() as u64),
        );
    }
    eprintln!();
}
