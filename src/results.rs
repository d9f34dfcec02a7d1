use crate::{benchmark::Benchmark, sample::Sample};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Samples collected by the workers of one benchmark run
///
/// This is the JSON document accepted by the report binary. Each sample needs
/// its span and `msg_cnt`; `msg_size` lets the payload byte counts be derived
/// when `msg_bytes` and `io_bytes` are not recorded:
///
/// ```json
/// {
///   "name": "NATS",
///   "pubs": [{ "start": 0, "end": 1000000000, "msg_cnt": 100000, "msg_size": 128 }],
///   "subs": []
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleSet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pubs: Vec<Sample>,
    #[serde(default)]
    pub subs: Vec<Sample>,
}

impl SampleSet {
    /// Build a benchmark from the collected samples
    ///
    /// `name_override` takes precedence over the document's own name, which in
    /// turn takes precedence over [`crate::defaults::BENCHMARK_NAME`].
    pub fn into_benchmark(self, name_override: Option<&str>) -> Benchmark {
        let name = name_override
            .map(str::to_string)
            .or(self.name)
            .unwrap_or_else(|| crate::defaults::BENCHMARK_NAME.to_string());

        let mut bench = Benchmark::new(name);
        for sample in self.pubs {
            bench.add_pub_sample(sample);
        }
        for sample in self.subs {
            bench.add_sub_sample(sample);
        }
        bench
    }
}

/// Read and validate a sample document from `path`
pub fn load_sample_set(path: &Path) -> Result<SampleSet> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read samples from {:?}", path))?;
    let set: SampleSet = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse samples in {:?}", path))?;

    debug!(
        "Loaded {} publisher and {} subscriber samples from {:?}",
        set.pubs.len(),
        set.subs.len(),
        path
    );
    if set.pubs.is_empty() && set.subs.is_empty() {
        warn!("No samples found in {:?}", path);
    }

    Ok(set)
}

/// Write the benchmark's CSV export to `path`, replacing any existing file
pub fn write_csv(path: &Path, bench: &Benchmark) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to create CSV file {:?}", path))?;

    file.write_all(bench.csv().as_bytes())?;
    file.flush()?;

    info!("Saved metric data in CSV file {:?}", path);
    Ok(())
}
