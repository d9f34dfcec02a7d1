use clap::Parser;
use std::path::PathBuf;

/// Message Benchmark Stats - Summarize publisher/subscriber throughput samples
#[derive(Parser, Debug, Clone, Default)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// JSON file with the collected publisher and subscriber samples
    #[clap(value_name = "INPUT")]
    pub input: PathBuf,

    /// Benchmark name shown in the report (overrides the name in the input)
    #[clap(short = 'n', long)]
    pub name: Option<String>,

    /// Save per-sample metrics to this CSV file
    #[clap(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Verbose output
    #[clap(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored log output
    #[clap(long, default_value_t = false)]
    pub no_color: bool,
}

/// Configuration for producing a report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub name: Option<String>,
    pub csv: Option<PathBuf>,
    pub log_filter: String,
    pub color: bool,
}

impl From<&Args> for ReportConfig {
    fn from(args: &Args) -> Self {
        Self {
            input: args.input.clone(),
            name: args.name.clone(),
            csv: args.csv.clone(),
            log_filter: if args.verbose {
                "debug".to_string()
            } else {
                crate::defaults::LOG_FILTER.to_string()
            },
            color: !args.no_color,
        }
    }
}
