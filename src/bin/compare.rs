//! Benchmark comparison tool.
//!
//! Compares two result files from `results/` and prints the mean latency delta
//! for every benchmark present in both, falling back to ops/sec.
//!
//! Usage: `cargo run --bin bench-compare -- <baseline.json> <candidate.json>`

use embedded_kv_benchmarks::schema::{compare_reports, BenchmarkReport, DeltaBasis};
use embedded_kv_benchmarks::units::{format_count, format_ns};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <baseline.json> <candidate.json>", args[0]);
        std::process::exit(1);
    }

    let baseline = load_report(&args[1]);
    let candidate = load_report(&args[2]);

    eprintln!("Baseline: {} ({})", args[1], baseline.metadata.timestamp);
    eprintln!("Candidate: {} ({})", args[2], candidate.metadata.timestamp);
    eprintln!();

    println!(
        "{:<32} | {:>14} | {:>14} | {:>18}",
        "Benchmark", "Base", "New", "Delta"
    );
    println!("{}", "-".repeat(86));

    let comparison = compare_reports(&baseline, &candidate);
    for delta in &comparison.deltas {
        let (base, cand) = match delta.basis {
            DeltaBasis::MeanNs { base, candidate } => (format_ns(base), format_ns(candidate)),
            DeltaBasis::OpsPerSec { base, candidate } => (
                format!("{} ops/s", format_count(base as u64)),
                format!("{} ops/s", format_count(candidate as u64)),
            ),
        };
        println!(
            "{:<32} | {:>14} | {:>14} | {:>+7.1}% ({})",
            delta.benchmark,
            base,
            cand,
            delta.pct,
            delta.verdict(),
        );
    }

    println!("{}", "-".repeat(86));
    println!(
        "Compared: {} | Baseline only: {} | Candidate only: {}",
        comparison.deltas.len(),
        comparison.only_base,
        comparison.only_candidate
    );
}

fn load_report(path: &str) -> BenchmarkReport {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path, e);
        std::process::exit(1);
    })
}
