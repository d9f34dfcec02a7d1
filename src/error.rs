use std::fmt;
use thiserror::Error;

/// Errors raised by the statistics core.
///
/// The core is pure arithmetic over in-memory data, so the failures are
/// malformed samples, statistics requested from a group with no members, and
/// a failed write while rendering a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// `avg_rate`, `std_dev` and `statistics` are undefined without samples.
    #[error("sample group is empty; rate statistics are undefined")]
    EmptyGroup,

    /// A sample whose end timestamp precedes its start timestamp.
    #[error("invalid sample span: end {end} precedes start {start}")]
    InvalidSpan { start: u64, end: u64 },

    /// Writing a report into its output buffer failed.
    #[error("failed to render report")]
    Format(#[from] fmt::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
