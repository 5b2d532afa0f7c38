//! Aggregate statistics over a reflection history.

use std::collections::{BTreeSet, HashSet};

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::reflections::ReflectionRecord;

/// Entries longer than this many characters count as deep writes.
pub const DEEP_WRITE_THRESHOLD: usize = 180;

/// Statistics derived from a reflection history. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_reflections: u32,
    pub unique_moods: u32,
    pub deep_writes: u32,
    /// Longest run of consecutive calendar days with a reflection.
    pub longest_streak: u32,
}

impl Stats {
    pub fn new(
        total_reflections: u32,
        unique_moods: u32,
        deep_writes: u32,
        longest_streak: u32,
    ) -> Self {
        Self {
            total_reflections,
            unique_moods,
            deep_writes,
            longest_streak,
        }
    }
}

/// Compute statistics using the local time zone for calendar days.
pub fn compute_stats(history: &[ReflectionRecord]) -> Stats {
    compute_stats_in(history, &Local)
}

/// Compute statistics, bucketing timestamps into days of `tz`.
///
/// Records without a timestamp count toward every field except the streak.
pub fn compute_stats_in<Tz: TimeZone>(history: &[ReflectionRecord], tz: &Tz) -> Stats {
    let unique_moods: HashSet<&str> = history.iter().map(|r| r.mood.as_str()).collect();
    let deep_writes = history.iter().filter(|r| is_deep_write(&r.entry)).count();

    let days: BTreeSet<NaiveDate> = history
        .iter()
        .filter_map(|r| r.created_at)
        .map(|ts| ts.with_timezone(tz).date_naive())
        .collect();

    Stats {
        total_reflections: saturate(history.len()),
        unique_moods: saturate(unique_moods.len()),
        deep_writes: saturate(deep_writes),
        longest_streak: longest_streak(days.iter().copied()),
    }
}

/// Whether an entry is long enough to count as a deep write.
///
/// Length is measured in Unicode scalar values, so accented letters and
/// emoji count once each regardless of their UTF-8 width.
pub fn is_deep_write(entry: &str) -> bool {
    entry.chars().count() > DEEP_WRITE_THRESHOLD
}

/// Longest run of consecutive days in an ascending, deduplicated sequence.
fn longest_streak(days: impl Iterator<Item = NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        current = match previous {
            Some(prev) if day.signed_duration_since(prev).num_days() == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }

    longest
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
