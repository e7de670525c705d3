//! Reminder habit analysis.
//!
//! Every saved reminder time is appended to a [`HabitLog`]. When the same
//! 10-minute slot keeps coming back, the settings surface offers to make it
//! the default reminder time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a time bucket in seconds.
pub const BUCKET_SECS: i64 = 600;

/// Number of log entries near the modal bucket needed before a suggestion
/// is offered.
pub const MIN_SUPPORT: usize = 3;

/// Start of the bucket containing `ts`. Rounds toward negative infinity;
/// instants in the partial bucket at `i64::MIN` saturate to `i64::MIN`.
pub fn bucket_of(ts: i64) -> i64 {
    ts.div_euclid(BUCKET_SECS).saturating_mul(BUCKET_SECS)
}

/// Occurrence count per bucket, in the order buckets are first seen.
pub fn bucket_counts(timestamps: &[i64]) -> IndexMap<i64, usize> {
    let mut counts = IndexMap::new();
    for &ts in timestamps {
        *counts.entry(bucket_of(ts)).or_insert(0) += 1;
    }
    counts
}

/// The most frequent bucket. Ties go to the bucket seen first; an empty
/// input returns `fallback` unchanged.
pub fn most_common_bucket(timestamps: &[i64], fallback: i64) -> i64 {
    let mut best: Option<(i64, usize)> = None;
    for (bucket, count) in bucket_counts(timestamps) {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((bucket, count)),
        }
    }
    best.map_or(fallback, |(bucket, _)| bucket)
}

/// A proposed default reminder time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    /// Start of the modal bucket, epoch seconds.
    pub reminder_time: i64,
    /// Log entries strictly within [`BUCKET_SECS`] of `reminder_time`.
    pub supporting_entries: usize,
}

/// Suggest the modal bucket when at least [`MIN_SUPPORT`] entries fall
/// within [`BUCKET_SECS`] of it.
pub fn suggest(timestamps: &[i64], fallback: i64) -> Option<Suggestion> {
    let modal = most_common_bucket(timestamps, fallback);
    let supporting_entries = timestamps
        .iter()
        .filter(|&&ts| ts.abs_diff(modal) < BUCKET_SECS.unsigned_abs())
        .count();

    (supporting_entries >= MIN_SUPPORT).then_some(Suggestion {
        reminder_time: modal,
        supporting_entries,
    })
}

/// Ordered history of saved reminder times.
///
/// Stored as a comma-joined string. Parsing skips entries that are not
/// numbers and truncates fractional seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitLog(Vec<i64>);

impl HabitLog {
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .filter_map(|part| {
                let part = part.trim();
                part.parse::<i64>()
                    .ok()
                    .or_else(|| part.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
            })
            .collect();
        HabitLog(entries)
    }

    pub fn push(&mut self, reminder_time: i64) {
        self.0.push(reminder_time);
    }

    pub fn entries(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn suggestion(&self, fallback: i64) -> Option<Suggestion> {
        suggest(&self.0, fallback)
    }
}

impl fmt::Display for HabitLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ts) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{ts}")?;
        }
        Ok(())
    }
}
