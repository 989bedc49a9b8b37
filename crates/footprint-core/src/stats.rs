//! Per-platform activity counts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityRecord;

/// Mapping of platform name to record count.
///
/// Backed by a [`BTreeMap`], so iteration is in platform-name order and stable
/// across runs. Derived data; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformStats(BTreeMap<String, u64>);

impl PlatformStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts records per platform.
    #[must_use]
    pub fn from_activities(activities: &[ActivityRecord]) -> Self {
        let mut stats = Self::new();
        for activity in activities {
            stats.record(&activity.platform);
        }
        stats
    }

    pub fn record(&mut self, platform: &str) {
        *self.0.entry(platform.to_owned()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, platform: &str) -> u64 {
        self.0.get(platform).copied().unwrap_or(0)
    }

    /// Sum of all platform counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// See [`top_platform`].
    #[must_use]
    pub fn top_platform(&self) -> Option<&str> {
        top_platform(self)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for PlatformStats {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Returns the platform with the strictly highest count.
///
/// Ties go to the platform met first in iteration order, which for
/// [`PlatformStats`] is ascending by name. `None` when `stats` is empty.
#[must_use]
pub fn top_platform(stats: &PlatformStats) -> Option<&str> {
    let mut best: Option<(&str, u64)> = None;
    for (platform, count) in stats.iter() {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((platform, count)),
        }
    }
    best.map(|(platform, _)| platform)
}

/// Summary served by `GET /users/{id}/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub total_activities: u64,
    #[serde(default)]
    pub platform_stats: PlatformStats,
    #[serde(default, with = "crate::timestamp::lenient_option")]
    pub last_activity: Option<DateTime<Utc>>,
}
