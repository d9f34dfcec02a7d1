//! # Formatting Helpers
//!
//! Stateless formatting functions shared by the statistics core and the report
//! binary. Every helper is a pure function over its arguments; no formatter
//! objects are cached between calls.
//!
//! ## Key Functionality Categories
//!
//! - **Digit grouping**: thousands separators for integer and two-decimal output
//! - **Byte scaling**: binary (KiB) or SI (kB) human-readable sizes
//! - **Durations**: nanosecond spans rendered with an appropriate unit
//! - **Identifiers**: unique run ids for CSV exports
//!
//! ## Usage Examples
//!
//! ```rust
//! use msg_bench_stats::utils::*;
//!
//! assert_eq!(format_grouped(1234567), "1,234,567");
//! assert_eq!(format_grouped_f64(81.6496), "81.65");
//! assert_eq!(human_bytes(1536.0, false), "1.50 KiB");
//! ```

use std::time::Duration;
use uuid::Uuid;

/// Generate a unique identifier for a benchmark run
///
/// Creates a UUID v4 string used as the `RunID` column of CSV exports so that
/// rows from several runs can be concatenated and still told apart.
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Insert `,` between every group of three digits of a plain digit string.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format an integer with thousands separators
///
/// ## Examples
///
/// ```rust
/// # use msg_bench_stats::utils::format_grouped;
/// assert_eq!(format_grouped(999), "999");
/// assert_eq!(format_grouped(1000), "1,000");
/// assert_eq!(format_grouped(12345678), "12,345,678");
/// ```
pub fn format_grouped(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Format a float with thousands separators and exactly two decimal places
///
/// The integer part is always written, so zero renders as `"0.00"`.
///
/// ## Examples
///
/// ```rust
/// # use msg_bench_stats::utils::format_grouped_f64;
/// assert_eq!(format_grouped_f64(0.0), "0.00");
/// assert_eq!(format_grouped_f64(1234.567), "1,234.57");
/// ```
pub fn format_grouped_f64(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(int_part), frac_part)
}

/// Format a byte count in a human-readable way
///
/// With `si` set, scales by powers of 1000 with `kB`, `MB`, ... suffixes;
/// otherwise scales by powers of 1024 with `KiB`, `MiB`, ... suffixes. Values
/// below one unit are printed as plain bytes. All values carry two decimals.
///
/// ## Examples
///
/// ```rust
/// # use msg_bench_stats::utils::human_bytes;
/// assert_eq!(human_bytes(512.0, false), "512.00 B");
/// assert_eq!(human_bytes(1536.0, false), "1.50 KiB");
/// assert_eq!(human_bytes(1500000.0, true), "1.50 MB");
/// ```
pub fn human_bytes(bytes: f64, si: bool) -> String {
    let unit: f64 = if si { 1000.0 } else { 1024.0 };
    if bytes < unit {
        return format!("{:.2} B", bytes);
    }

    let prefixes: &[u8] = if si { b"kMGTPE" } else { b"KMGTPE" };
    let exp = ((bytes.ln() / unit.ln()) as usize).clamp(1, prefixes.len());
    let prefix = prefixes[exp - 1] as char;
    let suffix = if si { "" } else { "i" };

    format!(
        "{:.2} {}{}B",
        bytes / unit.powi(exp as i32),
        prefix,
        suffix
    )
}

/// Convert nanoseconds to a human-readable duration string
///
/// ## Unit Selection Logic
///
/// - **Nanoseconds**: < 1,000 ns (e.g., "500ns")
/// - **Microseconds**: < 1,000,000 ns (e.g., "1.50μs")
/// - **Milliseconds**: < 1,000,000,000 ns (e.g., "25.75ms")
/// - **Seconds**: < 60 seconds (e.g., "5.25s")
/// - **Minutes and Hours**: For longer spans (e.g., "5m 30s", "2h 15m 30s")
pub fn format_duration_ns(ns: u64) -> String {
    let duration = Duration::from_nanos(ns);
    let total_ns = duration.as_nanos();

    if total_ns < 1_000 {
        format!("{}ns", total_ns)
    } else if total_ns < 1_000_000 {
        format!("{:.2}μs", total_ns as f64 / 1_000.0)
    } else if total_ns < 1_000_000_000 {
        format!("{:.2}ms", total_ns as f64 / 1_000_000.0)
    } else if total_ns < 60_000_000_000 {
        format!("{:.2}s", total_ns as f64 / 1_000_000_000.0)
    } else {
        let seconds = duration.as_secs();
        let minutes = seconds / 60;
        let remaining_seconds = seconds % 60;

        if minutes < 60 {
            format!("{}m {}s", minutes, remaining_seconds)
        } else {
            let hours = minutes / 60;
            let remaining_minutes = minutes % 60;
            format!("{}h {}m {}s", hours, remaining_minutes, remaining_seconds)
        }
    }
}
