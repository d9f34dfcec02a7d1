//! # Benchmark Report Module
//!
//! A [`Benchmark`] is one named publish/subscribe run. Publisher workers add
//! their samples to the `pubs` group and subscriber workers to the `subs`
//! group; once every worker has finished, the benchmark renders the console
//! report and the CSV export.
//!
//! ## Report Layout
//!
//! ```text
//! NATS Pub/Sub stats: 1,999,560 msgs/sec ~ 244.09 MiB/sec
//!  Pub stats: 999,780 msgs/sec ~ 122.04 MiB/sec
//!   [1] 504,104 msgs/sec ~ 61.54 MiB/sec (50000 msgs)
//!   [2] 499,890 msgs/sec ~ 61.02 MiB/sec (50000 msgs)
//!   min 499,890 | avg 501,997 | max 504,104 | stddev 2,107.00 msgs
//!  Sub stats: 999,780 msgs/sec ~ 122.04 MiB/sec
//! ```
//!
//! The combined header only appears when both groups hold samples, and the
//! per-sample lines and statistics line only when a group has more than one
//! sample.

use crate::error::Result;
use crate::sample::{Measurement, Sample};
use crate::sample_group::SampleGroup;
use crate::utils::generate_run_id;
use std::fmt::{self, Write};

/// CSV column header written before the per-sample rows.
pub const CSV_HEADER: &str =
    "#RunID, ClientID, MsgCount, MsgBytes, MsgsPerSec, BytesPerSec, DurationSecs";

/// A named benchmark run with publisher and subscriber sample groups
#[derive(Debug, Clone)]
pub struct Benchmark {
    name: String,
    run_id: String,
    created_at: chrono::DateTime<chrono::Utc>,
    pubs: SampleGroup,
    subs: SampleGroup,
}

impl Benchmark {
    /// Create an empty benchmark with a fresh run id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run_id: generate_run_id(),
            created_at: chrono::Utc::now(),
            pubs: SampleGroup::new(),
            subs: SampleGroup::new(),
        }
    }

    /// Name shown in the report header
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier written in the `RunID` column of the CSV export
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// When the run was created, in UTC
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    /// Publisher samples
    pub fn pubs(&self) -> &SampleGroup {
        &self.pubs
    }

    /// Subscriber samples
    pub fn subs(&self) -> &SampleGroup {
        &self.subs
    }

    /// Record a finished publisher worker
    pub fn add_pub_sample(&mut self, sample: Sample) {
        self.pubs.add_sample(sample);
    }

    /// Record a finished subscriber worker
    pub fn add_sub_sample(&mut self, sample: Sample) {
        self.subs.add_sample(sample);
    }

    /// Aggregate over every publisher and subscriber sample
    pub fn overall(&self) -> Sample {
        *SampleGroup::merge([&self.pubs, &self.subs]).summary()
    }

    /// Render the multi-line console report
    ///
    /// Returns an empty string when neither group has samples.
    pub fn report(&self) -> Result<String> {
        let mut out = String::new();
        let both = self.pubs.has_samples() && self.subs.has_samples();
        let indent = if both { " " } else { "" };

        if both {
            writeln!(out, "{} Pub/Sub stats: {}", self.name, self.overall())?;
        }
        self.report_group(&mut out, "Pub", &self.pubs, indent, both)?;
        self.report_group(&mut out, "Sub", &self.subs, indent, both)?;

        Ok(out)
    }

    fn report_group(
        &self,
        out: &mut String,
        label: &str,
        group: &SampleGroup,
        indent: &str,
        both: bool,
    ) -> Result<()> {
        if !group.has_samples() {
            return Ok(());
        }

        let title = if both {
            String::new()
        } else {
            format!("{} ", self.name)
        };
        writeln!(out, "{}{}{} stats: {}", indent, title, label, group)?;

        if group.len() > 1 {
            for (i, sample) in group.samples().iter().enumerate() {
                writeln!(
                    out,
                    "{} [{}] {} ({} msgs)",
                    indent,
                    i + 1,
                    sample,
                    sample.job_msg_cnt()
                )?;
            }
            writeln!(out, "{} {}", indent, group.statistics()?)?;
        }

        Ok(())
    }

    /// Render every sample as CSV, publishers first
    ///
    /// Client ids are `P<n>` for publishers and `S<n>` for subscribers,
    /// numbered from 1 within each group.
    pub fn csv(&self) -> String {
        CsvExport(self).to_string()
    }
}

/// CSV view of a benchmark's samples
struct CsvExport<'a>(&'a Benchmark);

impl fmt::Display for CsvExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bench = self.0;
        writeln!(f, "{}", CSV_HEADER)?;

        let pubs = bench.pubs.samples().iter().enumerate().map(|(i, s)| ('P', i + 1, s));
        let subs = bench.subs.samples().iter().enumerate().map(|(i, s)| ('S', i + 1, s));

        for (side, n, sample) in pubs.chain(subs) {
            writeln!(
                f,
                "{},{}{},{},{},{},{:.6},{:.6}",
                bench.run_id,
                side,
                n,
                sample.msg_cnt(),
                sample.msg_bytes(),
                sample.rate(),
                sample.throughput(),
                sample.seconds()
            )?;
        }

        Ok(())
    }
}
