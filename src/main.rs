//! # Message Benchmark Stats - Main Entry Point
//!
//! Reads the samples collected by a publish/subscribe benchmark run and prints
//! the throughput report.
//!
//! 1. **Parse arguments**: input document, name override, CSV output
//! 2. **Initialize logging**: colored diagnostics on stderr via tracing
//! 3. **Load samples**: validate the JSON sample document
//! 4. **Report**: print the report on stdout and optionally save the CSV
//!
//! Errors are reported through `anyhow::Result` with file context.

use anyhow::Result;
use clap::Parser;
use msg_bench_stats::{
    cli::{Args, ReportConfig},
    logging,
    results::{load_sample_set, write_csv},
    utils::format_duration_ns,
    Measurement,
};
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ReportConfig::from(&args);

    logging::init(&config.log_filter, config.color)?;
    debug!("Configuration: {:?}", config);

    let bench = load_sample_set(&config.input)?.into_benchmark(config.name.as_deref());
    let overall = bench.overall();
    info!(
        "Aggregating {} samples for run {} at {} ({} msgs over {})",
        bench.pubs().len() + bench.subs().len(),
        bench.run_id(),
        bench.created_at().format("%Y-%m-%d %H:%M:%S UTC"),
        overall.msg_cnt(),
        format_duration_ns(overall.duration())
    );

    print!("{}", bench.report()?);

    if let Some(ref csv_path) = config.csv {
        write_csv(csv_path, &bench)?;
    }

    Ok(())
}
