//! # Sample Groups
//!
//! A [`SampleGroup`] collects the samples of many workers and reduces them to
//! combined totals plus rate statistics. Rate statistics are computed from each
//! member's own [`rate`](Measurement::rate), so every sample weighs the same
//! regardless of its length or volume. The aggregate totals live in a summary
//! [`Sample`] held by the group and exposed through [`Measurement`].

use crate::error::{Result, StatsError};
use crate::sample::{Measurement, Sample};
use crate::utils::{format_grouped, format_grouped_f64};
use std::fmt;

/// An ordered collection of samples with running aggregate totals
///
/// The group's span grows to cover every member (`start` is the smallest
/// member start, `end` the largest member end) and the counters are sums over
/// all members. Members are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleGroup {
    samples: Vec<Sample>,
    summary: Sample,
}

impl SampleGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group holding every sample of `groups`, in order
    ///
    /// Samples are absorbed through [`SampleGroup::add_sample`], so the merged
    /// totals equal those of adding each sample individually.
    pub fn merge<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = &'a SampleGroup>,
    {
        let mut merged = Self::new();
        for group in groups {
            for sample in &group.samples {
                merged.add_sample(*sample);
            }
        }
        merged
    }

    /// Add a sample to the group
    pub fn add_sample(&mut self, sample: Sample) {
        let first = self.samples.is_empty();
        self.samples.push(sample);
        self.summary.absorb(&sample, first);
    }

    /// Member samples in insertion order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Aggregate record covering every member
    pub fn summary(&self) -> &Sample {
        &self.summary
    }

    /// Number of member samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the group has no members
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the group holds any sample
    ///
    /// Callers check this before [`avg_rate`](Self::avg_rate),
    /// [`std_dev`](Self::std_dev) or [`statistics`](Self::statistics), which
    /// fail on an empty group.
    pub fn has_samples(&self) -> bool {
        !self.is_empty()
    }

    /// Smallest member rate, or 0 for an empty group
    pub fn min_rate(&self) -> u64 {
        self.samples.iter().map(Sample::rate).min().unwrap_or(0)
    }

    /// Largest member rate, or 0 for an empty group
    pub fn max_rate(&self) -> u64 {
        self.samples.iter().map(Sample::rate).max().unwrap_or(0)
    }

    /// Arithmetic mean of member rates, truncated to an integer
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyGroup`] when the group has no samples.
    pub fn avg_rate(&self) -> Result<u64> {
        if self.samples.is_empty() {
            return Err(StatsError::EmptyGroup);
        }
        let sum: u128 = self.samples.iter().map(|s| u128::from(s.rate())).sum();
        let avg = sum / self.samples.len() as u128;
        // The mean of u64 values always fits back into a u64
        Ok(u64::try_from(avg).unwrap_or(u64::MAX))
    }

    /// Population standard deviation of member rates around
    /// [`avg_rate`](Self::avg_rate)
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyGroup`] when the group has no samples.
    pub fn std_dev(&self) -> Result<f64> {
        let avg = self.avg_rate()? as f64;
        let sum: f64 = self
            .samples
            .iter()
            .map(|s| (s.rate() as f64 - avg).powi(2))
            .sum();
        let variance = sum / self.samples.len() as f64;
        Ok(variance.sqrt())
    }

    /// One-line rate summary
    ///
    /// Rendered as `min <N> | avg <N> | max <N> | stddev <N.NN> msgs` with
    /// `,` thousands separators and two decimals on the deviation.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyGroup`] when the group has no samples.
    pub fn statistics(&self) -> Result<String> {
        let avg = self.avg_rate()?;
        let std_dev = self.std_dev()?;
        Ok(format!(
            "min {} | avg {} | max {} | stddev {} msgs",
            format_grouped(self.min_rate()),
            format_grouped(avg),
            format_grouped(self.max_rate()),
            format_grouped_f64(std_dev)
        ))
    }
}

impl Measurement for SampleGroup {
    fn start(&self) -> u64 {
        self.summary.start()
    }

    fn end(&self) -> u64 {
        self.summary.end()
    }

    fn msg_cnt(&self) -> u64 {
        self.summary.msg_cnt()
    }

    fn io_bytes(&self) -> u64 {
        self.summary.io_bytes()
    }

    fn job_msg_cnt(&self) -> u64 {
        self.summary.job_msg_cnt()
    }

    fn msg_bytes(&self) -> u64 {
        self.summary.msg_bytes()
    }
}

impl fmt::Display for SampleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.summary, f)
    }
}

impl Extend<Sample> for SampleGroup {
    fn extend<T: IntoIterator<Item = Sample>>(&mut self, iter: T) {
        for sample in iter {
            self.add_sample(sample);
        }
    }
}

impl FromIterator<Sample> for SampleGroup {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        let mut group = Self::new();
        group.extend(iter);
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::NANOS_PER_SECOND;

    /// Sample moving `msg_cnt` messages of 8 bytes over `[start, end]`
    fn sample(msg_cnt: u64, start: u64, end: u64) -> Sample {
        Sample::new(msg_cnt, 8, start, end).unwrap()
    }

    /// Sample running for exactly one second at `rate` msgs/sec
    fn one_second(rate: u64, start: u64) -> Sample {
        sample(rate, start, start + NANOS_PER_SECOND)
    }

    #[test]
    fn test_empty_group() {
        let group = SampleGroup::new();

        assert!(!group.has_samples());
        assert_eq!(group.len(), 0);
        assert_eq!(group.min_rate(), 0);
        assert_eq!(group.max_rate(), 0);
        assert_eq!(group.avg_rate(), Err(StatsError::EmptyGroup));
        assert_eq!(group.std_dev(), Err(StatsError::EmptyGroup));
        assert_eq!(group.statistics(), Err(StatsError::EmptyGroup));
        assert_eq!(group.start(), 0);
        assert_eq!(group.end(), 0);
        assert_eq!(group.msg_cnt(), 0);
        assert_eq!(group.rate(), 0);
    }

    #[test]
    fn test_first_sample_sets_span() {
        let mut group = SampleGroup::new();
        group.add_sample(sample(10, 500, 900));

        assert!(group.has_samples());
        assert_eq!(group.start(), 500);
        assert_eq!(group.end(), 900);
    }

    #[test]
    fn test_span_and_totals() {
        let mut group = SampleGroup::new();
        group.add_sample(sample(10, 300, 900).with_io_stats(20, 200));
        group.add_sample(sample(5, 100, 400).with_io_stats(7, 70));
        group.add_sample(sample(1, 200, 1200).with_io_stats(3, 30));

        assert_eq!(group.start(), 100);
        assert_eq!(group.end(), 1200);
        assert_eq!(group.msg_cnt(), 30);
        assert_eq!(group.io_bytes(), 300);
        assert_eq!(group.job_msg_cnt(), 16);
        assert_eq!(group.msg_bytes(), 128);
        assert_eq!(group.duration(), 1100);
    }

    #[test]
    fn test_span_never_shrinks() {
        let mut group = SampleGroup::new();
        group.add_sample(sample(1, 100, 1000));
        group.add_sample(sample(1, 400, 600));

        assert_eq!(group.start(), 100);
        assert_eq!(group.end(), 1000);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let samples = vec![one_second(3, 30), one_second(1, 10), one_second(2, 20)];
        let group: SampleGroup = samples.iter().copied().collect();
        assert_eq!(group.samples(), samples.as_slice());
    }

    #[test]
    fn test_three_sample_statistics() {
        let group: SampleGroup = vec![one_second(100, 0), one_second(200, 0), one_second(300, 0)]
            .into_iter()
            .collect();

        assert_eq!(group.min_rate(), 100);
        assert_eq!(group.max_rate(), 300);
        assert_eq!(group.avg_rate(), Ok(200));
        let expected = ((100.0f64.powi(2) + 0.0 + 100.0f64.powi(2)) / 3.0).sqrt();
        assert!((group.std_dev().unwrap() - expected).abs() < 1e-9);
        assert!((group.std_dev().unwrap() - 81.65).abs() < 0.01);
        assert_eq!(
            group.statistics().unwrap(),
            "min 100 | avg 200 | max 300 | stddev 81.65 msgs"
        );
    }

    #[test]
    fn test_statistics_thousands_separators() {
        let group: SampleGroup = vec![one_second(1_000, 0), one_second(3_000, 0)]
            .into_iter()
            .collect();
        assert_eq!(
            group.statistics().unwrap(),
            "min 1,000 | avg 2,000 | max 3,000 | stddev 1,000.00 msgs"
        );
    }

    #[test]
    fn test_single_sample_statistics() {
        let mut group = SampleGroup::new();
        group.add_sample(sample(1000, 0, 1000));
        let rate = group.samples()[0].rate();

        assert_eq!(group.min_rate(), rate);
        assert_eq!(group.max_rate(), rate);
        assert_eq!(group.avg_rate(), Ok(rate));
        assert_eq!(group.std_dev(), Ok(0.0));
    }

    #[test]
    fn test_identical_rates_have_zero_deviation() {
        // Same rate from different spans and volumes
        let group: SampleGroup = vec![
            sample(50, 0, NANOS_PER_SECOND / 2),
            sample(100, 0, NANOS_PER_SECOND),
            sample(400, 7, 7 + 4 * NANOS_PER_SECOND),
        ]
        .into_iter()
        .collect();

        assert_eq!(group.min_rate(), 100);
        assert_eq!(group.max_rate(), 100);
        assert_eq!(group.std_dev(), Ok(0.0));
        assert_eq!(
            group.statistics().unwrap(),
            "min 100 | avg 100 | max 100 | stddev 0.00 msgs"
        );
    }

    /// Per-sample rates are averaged, not the aggregate msgs / span
    #[test]
    fn test_rates_weighted_per_sample() {
        let group: SampleGroup = vec![
            sample(100, 0, NANOS_PER_SECOND),
            sample(10_000, 0, 10 * NANOS_PER_SECOND),
        ]
        .into_iter()
        .collect();

        assert_eq!(group.avg_rate(), Ok(550));
        assert_eq!(group.rate(), 10_100 / 10);
    }

    #[test]
    fn test_avg_rate_truncates() {
        let group: SampleGroup = vec![one_second(1, 0), one_second(2, 0)]
            .into_iter()
            .collect();
        assert_eq!(group.avg_rate(), Ok(1));
    }

    #[test]
    fn test_zero_duration_member() {
        let group: SampleGroup = vec![one_second(100, 0), sample(50, 5, 5)]
            .into_iter()
            .collect();
        assert_eq!(group.min_rate(), 0);
        assert_eq!(group.max_rate(), 100);
        assert_eq!(group.avg_rate(), Ok(50));
        assert_eq!(group.std_dev(), Ok(50.0));
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let a: SampleGroup = vec![one_second(1, 0), one_second(2, 10)].into_iter().collect();
        let b: SampleGroup = vec![one_second(3, 5)].into_iter().collect();

        let merged = SampleGroup::merge([&a, &b]);
        let rates: Vec<u64> = merged.samples().iter().map(Sample::rate).collect();
        assert_eq!(rates, vec![1, 2, 3]);

        let reversed = SampleGroup::merge([&b, &a]);
        let rates: Vec<u64> = reversed.samples().iter().map(Sample::rate).collect();
        assert_eq!(rates, vec![3, 1, 2]);
    }

    #[test]
    fn test_merge_matches_individual_adds() {
        let a: SampleGroup = vec![
            sample(10, 300, 900).with_io_stats(12, 120),
            sample(20, 50, 2000),
        ]
        .into_iter()
        .collect();
        let b: SampleGroup = vec![sample(5, 10, 700), sample(1, 800, 5000).with_io_stats(9, 1)]
            .into_iter()
            .collect();

        let mut individually = SampleGroup::new();
        individually.extend(a.samples().iter().copied());
        individually.extend(b.samples().iter().copied());

        for merged in [SampleGroup::merge([&a, &b]), SampleGroup::merge([&b, &a])] {
            assert_eq!(merged.summary(), individually.summary());
            assert_eq!(merged.len(), 4);
            assert_eq!(merged.start(), 10);
            assert_eq!(merged.end(), 5000);
        }
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        let empty = SampleGroup::new();
        let merged = SampleGroup::merge([&empty, &empty]);
        assert!(!merged.has_samples());
        assert_eq!(SampleGroup::merge(std::iter::empty()), SampleGroup::new());
    }

    #[test]
    fn test_min_avg_max_ordering() {
        let mut group = SampleGroup::new();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..200 {
            // xorshift to vary counts and spans deterministically
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let start = seed % 1_000_000;
            let end = start + 1 + (seed >> 20) % 5_000_000_000;
            group.add_sample(sample((seed >> 8) % 1_000_000, start, end));

            let avg = group.avg_rate().unwrap();
            assert!(group.min_rate() <= avg);
            assert!(avg <= group.max_rate());
            assert!(group.std_dev().unwrap() >= 0.0);
        }
    }

    /// Group counters stop at u64::MAX instead of wrapping
    #[test]
    fn test_counters_saturate() {
        let huge = Sample::new(u64::MAX, 2, 0, 1).unwrap();
        assert_eq!(huge.msg_bytes(), u64::MAX);
        assert_eq!(huge.rate(), u64::MAX);

        let mut group = SampleGroup::new();
        group.add_sample(huge);
        group.add_sample(huge);

        assert_eq!(group.msg_cnt(), u64::MAX);
        assert_eq!(group.job_msg_cnt(), u64::MAX);
        assert_eq!(group.msg_bytes(), u64::MAX);
        assert_eq!(group.io_bytes(), u64::MAX);
        assert_eq!(group.min_rate(), u64::MAX);
        assert_eq!(group.max_rate(), u64::MAX);
        assert_eq!(group.avg_rate(), Ok(u64::MAX));
        assert_eq!(group.std_dev(), Ok(0.0));
        assert_eq!(
            group.statistics().unwrap(),
            "min 18,446,744,073,709,551,615 | avg 18,446,744,073,709,551,615 \
             | max 18,446,744,073,709,551,615 | stddev 0.00 msgs"
        );
    }

    #[test]
    fn test_display_uses_aggregate() {
        let group: SampleGroup = vec![one_second(1000, 0), one_second(1500, 0)]
            .into_iter()
            .collect();
        // 2,500 msgs of 8 bytes over one second
        assert_eq!(group.to_string(), "2,500 msgs/sec ~ 19.53 KiB/sec");
    }
}
