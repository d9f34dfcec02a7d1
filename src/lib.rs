//! # Message Benchmark Statistics Library
//!
//! The statistics-aggregation core of a message-throughput benchmark. Each
//! publisher or subscriber worker records a [`Sample`] of its run; samples are
//! gathered into [`SampleGroup`]s that compute combined totals and per-sample
//! rate statistics, and a [`Benchmark`] renders the final report.
//!
//! ## Architecture Overview
//!
//! - `sample`: the immutable per-worker record and the shared `Measurement` accessors
//! - `sample_group`: aggregation, merging and rate statistics
//! - `benchmark`: publisher/subscriber report and CSV export
//! - `results`: JSON sample input and CSV file output for the report binary
//! - `cli`: command-line parsing and report configuration
//! - `utils`: stateless number, byte and duration formatting
//!
//! ## Usage Example
//!
//! ```rust
//! use msg_bench_stats::{Sample, SampleGroup};
//!
//! # fn main() -> Result<(), msg_bench_stats::StatsError> {
//! let second = 1_000_000_000;
//! let mut group = SampleGroup::new();
//! group.add_sample(Sample::new(100, 128, 0, second)?);
//! group.add_sample(Sample::new(200, 128, 0, second)?);
//! group.add_sample(Sample::new(300, 128, 0, second)?);
//!
//! assert_eq!(
//!     group.statistics()?,
//!     "min 100 | avg 200 | max 300 | stddev 81.65 msgs"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Aggregation is a single-threaded reduction run after the workers finish.
//! Workers each own their `Sample` and hand it over by value; `add_sample`
//! takes `&mut self`, so a group cannot be fed from two threads without
//! external synchronization.

/// Publisher/subscriber benchmark report
///
/// Holds one `SampleGroup` per side of a run and renders:
/// - The combined and per-group throughput lines
/// - Per-sample lines and the rate statistics line
/// - A CSV export of every sample
pub mod benchmark;

/// Command-line interface and configuration
pub mod cli;

/// Error type for the statistics core
pub mod error;

/// Diagnostic log formatting for the report binary
pub mod logging;

/// Sample document input and CSV output
pub mod results;

/// Per-worker measurement records
pub mod sample;

/// Sample aggregation and rate statistics
pub mod sample_group;

/// Number, byte and duration formatting helpers
pub mod utils;

pub use benchmark::Benchmark;
pub use cli::{Args, ReportConfig};
pub use error::StatsError;
pub use results::SampleSet;
pub use sample::{Measurement, Sample};
pub use sample_group::SampleGroup;

/// The current version of the crate, populated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Benchmark name used when neither the CLI nor the input provides one
    pub const BENCHMARK_NAME: &str = "NATS";

    /// Log filter used when `RUST_LOG` is unset and `--verbose` is off
    pub const LOG_FILTER: &str = "info";
}
