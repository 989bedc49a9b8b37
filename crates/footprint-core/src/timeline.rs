//! Timeline aggregation.
//!
//! Turns a flat list of [`ActivityRecord`]s into calendar-day buckets plus
//! platform statistics. Everything here is pure and synchronous: no I/O, no
//! clocks, and the same input always yields the same output.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityRecord;
use crate::stats::PlatformStats;

/// Selection value meaning "no platform filter".
pub const ALL_PLATFORMS: &str = "all";

/// Records sharing one UTC calendar day, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub date: NaiveDate,
    pub activities: Vec<ActivityRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BucketOrder {
    /// Oldest day first.
    #[default]
    Ascending,
    /// Newest day first, as the backend serves `/users/{id}/timeline`.
    Descending,
}

impl FromStr for BucketOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown bucket order '{other}' (expected asc or desc)")),
        }
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    pub buckets: Vec<TimelineBucket>,
    pub platform_stats: PlatformStats,
    pub last_activity: Option<DateTime<Utc>>,
}

impl Timeline {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of records across every bucket.
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.buckets.iter().map(|b| b.activities.len()).sum()
    }
}

/// Groups `activities` by UTC day, oldest day first.
///
/// Within a day the input order is kept. Platform statistics cover the whole
/// input. An empty input produces an empty [`Timeline`].
#[must_use]
pub fn aggregate(activities: &[ActivityRecord]) -> Timeline {
    aggregate_with_order(activities, BucketOrder::Ascending)
}

/// Like [`aggregate`] with an explicit bucket order.
#[must_use]
pub fn aggregate_with_order(activities: &[ActivityRecord], order: BucketOrder) -> Timeline {
    let mut days: BTreeMap<NaiveDate, Vec<ActivityRecord>> = BTreeMap::new();
    for activity in activities {
        days.entry(activity.day()).or_default().push(activity.clone());
    }

    let mut buckets: Vec<TimelineBucket> = days
        .into_iter()
        .map(|(date, activities)| TimelineBucket { date, activities })
        .collect();
    if order == BucketOrder::Descending {
        buckets.reverse();
    }

    Timeline {
        buckets,
        platform_stats: PlatformStats::from_activities(activities),
        last_activity: activities.iter().map(|a| a.timestamp).max(),
    }
}

/// Platform selection applied to a timeline view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlatformFilter {
    #[default]
    All,
    Platform(String),
}

impl PlatformFilter {
    /// Interprets a user selection; [`ALL_PLATFORMS`] (any case) or an empty
    /// string means no filter.
    #[must_use]
    pub fn from_selection(selection: &str) -> Self {
        let trimmed = selection.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_PLATFORMS) {
            Self::All
        } else {
            Self::Platform(trimmed.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, activity: &ActivityRecord) -> bool {
        match self {
            Self::All => true,
            Self::Platform(p) => activity.platform == *p,
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_PLATFORMS),
            Self::Platform(p) => f.write_str(p),
        }
    }
}

/// Restricts buckets to records on the selected platform.
///
/// Buckets left without records are dropped; bucket order is unchanged.
/// [`PlatformFilter::All`] returns the buckets as given.
#[must_use]
pub fn filter_by_platform(
    buckets: &[TimelineBucket],
    filter: &PlatformFilter,
) -> Vec<TimelineBucket> {
    if *filter == PlatformFilter::All {
        return buckets.to_vec();
    }
    buckets
        .iter()
        .filter_map(|bucket| {
            let activities: Vec<ActivityRecord> = bucket
                .activities
                .iter()
                .filter(|a| filter.matches(a))
                .cloned()
                .collect();
            (!activities.is_empty()).then(|| TimelineBucket {
                date: bucket.date,
                activities,
            })
        })
        .collect()
}

/// Earliest and latest activity, with the whole-day distance between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
    pub span_days: i64,
}

/// `None` for an empty input.
#[must_use]
pub fn date_range(activities: &[ActivityRecord]) -> Option<DateRange> {
    let earliest = activities.iter().map(|a| a.timestamp).min()?;
    let latest = activities.iter().map(|a| a.timestamp).max()?;
    Some(DateRange {
        earliest,
        latest,
        span_days: (latest - earliest).num_days(),
    })
}

#[cfg(test)]
#[path = "timeline_test.rs"]
mod tests;
