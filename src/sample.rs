//! # Sample Records
//!
//! A [`Sample`] is the immutable record of one worker's measured run: when it
//! started and ended, and how many messages and bytes it moved. The
//! [`Measurement`] trait is the accessor contract shared by single samples and
//! by [`SampleGroup`](crate::SampleGroup) aggregates, so both expose the same
//! derived rate and throughput figures.
//!
//! Timestamps are nanoseconds from any monotonic origin; only differences are
//! ever used.

use crate::error::{Result, StatsError};
use crate::utils::{format_grouped, human_bytes};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp units per second.
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Read accessors shared by [`Sample`] and [`SampleGroup`](crate::SampleGroup)
///
/// Implementors provide the raw counters; the rate and throughput figures are
/// derived from them identically for every implementor.
pub trait Measurement {
    /// Start timestamp in nanoseconds.
    fn start(&self) -> u64;

    /// End timestamp in nanoseconds.
    fn end(&self) -> u64;

    /// Messages counted on the connection (in + out).
    fn msg_cnt(&self) -> u64;

    /// Bytes counted on the connection (in + out).
    fn io_bytes(&self) -> u64;

    /// Messages the job was asked to move.
    fn job_msg_cnt(&self) -> u64;

    /// Payload bytes the job was asked to move.
    fn msg_bytes(&self) -> u64;

    /// Span covered by the measurement, in nanoseconds.
    fn duration(&self) -> u64 {
        self.end().saturating_sub(self.start())
    }

    /// Span covered by the measurement, in seconds.
    fn seconds(&self) -> f64 {
        self.duration() as f64 / NANOS_PER_SECOND as f64
    }

    /// Messages per second over `[start, end]`, truncated to an integer
    ///
    /// A zero-length span yields 0 rather than an infinite rate.
    fn rate(&self) -> u64 {
        let duration = self.duration();
        if duration == 0 {
            return 0;
        }
        let rate =
            u128::from(self.msg_cnt()) * u128::from(NANOS_PER_SECOND) / u128::from(duration);
        u64::try_from(rate).unwrap_or(u64::MAX)
    }

    /// Payload bytes per second over `[start, end]`; 0 for a zero-length span.
    fn throughput(&self) -> f64 {
        let seconds = self.seconds();
        if seconds > 0.0 {
            self.msg_bytes() as f64 / seconds
        } else {
            0.0
        }
    }
}

/// One worker's measured run
///
/// Constructed through [`Sample::new`] or deserialization, both of which reject
/// an `end` earlier than `start`. Fields are private so a constructed sample
/// cannot be altered afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SampleRecord")]
pub struct Sample {
    start: u64,
    end: u64,
    msg_cnt: u64,
    io_bytes: u64,
    job_msg_cnt: u64,
    msg_bytes: u64,
}

impl Sample {
    /// Create a sample for a job of `job_msg_cnt` messages of `msg_size` bytes
    ///
    /// The connection counters default to the job's own figures; use
    /// [`Sample::with_io_stats`] when the worker measured them separately.
    pub fn new(job_msg_cnt: u64, msg_size: u64, start: u64, end: u64) -> Result<Self> {
        if end < start {
            return Err(StatsError::InvalidSpan { start, end });
        }
        let msg_bytes = job_msg_cnt.saturating_mul(msg_size);

        Ok(Self {
            start,
            end,
            msg_cnt: job_msg_cnt,
            io_bytes: msg_bytes,
            job_msg_cnt,
            msg_bytes,
        })
    }

    /// Replace the connection counters with measured in + out totals.
    pub fn with_io_stats(mut self, msg_cnt: u64, io_bytes: u64) -> Self {
        self.msg_cnt = msg_cnt;
        self.io_bytes = io_bytes;
        self
    }

    /// Widen this record so it also covers `other`, summing the counters.
    ///
    /// `first` marks the record as holding no data yet, in which case the span
    /// is taken from `other` before the min/max update.
    pub(crate) fn absorb(&mut self, other: &Sample, first: bool) {
        if first {
            self.start = other.start;
            self.end = other.end;
        }
        self.io_bytes = self.io_bytes.saturating_add(other.io_bytes);
        self.job_msg_cnt = self.job_msg_cnt.saturating_add(other.job_msg_cnt);
        self.msg_cnt = self.msg_cnt.saturating_add(other.msg_cnt);
        self.msg_bytes = self.msg_bytes.saturating_add(other.msg_bytes);
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }
}

impl Measurement for Sample {
    fn start(&self) -> u64 {
        self.start
    }

    fn end(&self) -> u64 {
        self.end
    }

    fn msg_cnt(&self) -> u64 {
        self.msg_cnt
    }

    fn io_bytes(&self) -> u64 {
        self.io_bytes
    }

    fn job_msg_cnt(&self) -> u64 {
        self.job_msg_cnt
    }

    fn msg_bytes(&self) -> u64 {
        self.msg_bytes
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} msgs/sec ~ {}/sec",
            format_grouped(self.rate()),
            human_bytes(self.throughput(), false)
        )
    }
}

/// Wire shape of a sample before span validation
///
/// Only the span and `msg_cnt` are required. Missing counters are derived the
/// way [`Sample::new`] derives them: `job_msg_cnt` from `msg_cnt`, `msg_bytes`
/// from `job_msg_cnt * msg_size`, and `io_bytes` from `msg_bytes`.
#[derive(Deserialize)]
struct SampleRecord {
    start: u64,
    end: u64,
    msg_cnt: u64,
    #[serde(default)]
    msg_size: u64,
    io_bytes: Option<u64>,
    job_msg_cnt: Option<u64>,
    msg_bytes: Option<u64>,
}

impl TryFrom<SampleRecord> for Sample {
    type Error = StatsError;

    fn try_from(record: SampleRecord) -> Result<Self> {
        if record.end < record.start {
            return Err(StatsError::InvalidSpan {
                start: record.start,
                end: record.end,
            });
        }
        let job_msg_cnt = record.job_msg_cnt.unwrap_or(record.msg_cnt);
        let msg_bytes = record
            .msg_bytes
            .unwrap_or_else(|| job_msg_cnt.saturating_mul(record.msg_size));

        Ok(Self {
            start: record.start,
            end: record.end,
            msg_cnt: record.msg_cnt,
            io_bytes: record.io_bytes.unwrap_or(msg_bytes),
            job_msg_cnt,
            msg_bytes,
        })
    }
}
