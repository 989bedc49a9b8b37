//! Response envelopes accepted from the backend.
//!
//! Some endpoints answer with either a bare array or an object wrapping it;
//! both shapes are accepted and unwrapped here.

use footprint_core::TimelineBucket;
use serde::Deserialize;

use crate::logs::LogLine;

/// `GET /users/{id}/timeline`: `[...]` or `{"user_id": .., "timeline": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TimelinePayload {
    Bare(Vec<TimelineBucket>),
    Wrapped { timeline: Vec<TimelineBucket> },
}

impl TimelinePayload {
    pub(crate) fn into_buckets(self) -> Vec<TimelineBucket> {
        match self {
            Self::Bare(buckets) | Self::Wrapped { timeline: buckets } => buckets,
        }
    }
}

/// `GET /logs/recent`: `["line", ..]` or `{"logs": [{"message": .., "timestamp": ..}], ..}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecentLogsPayload {
    Bare(Vec<RecentLogEntry>),
    Wrapped {
        #[serde(default)]
        logs: Vec<RecentLogEntry>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecentLogEntry {
    Text(String),
    Entry { message: String },
}

impl RecentLogsPayload {
    pub(crate) fn into_lines(self) -> Vec<LogLine> {
        let entries = match self {
            Self::Bare(entries) | Self::Wrapped { logs: entries } => entries,
        };
        entries
            .into_iter()
            .map(|entry| match entry {
                RecentLogEntry::Text(line) | RecentLogEntry::Entry { message: line } => line,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn recent_logs_accepts_bare_strings() {
        let payload: RecentLogsPayload = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(payload.into_lines(), vec!["a", "b"]);
    }

    #[test]
    fn recent_logs_accepts_wrapped_entries() {
        let payload: RecentLogsPayload = serde_json::from_value(json!({
            "logs": [
                { "message": "INFO started", "timestamp": "2024-01-01T00:00:00" },
                { "message": "ERROR boom", "timestamp": "2024-01-01T00:00:01" }
            ],
            "total_lines": 2,
            "returned_lines": 2
        }))
        .unwrap();
        assert_eq!(payload.into_lines(), vec!["INFO started", "ERROR boom"]);
    }

    #[test]
    fn recent_logs_missing_file_is_empty() {
        let payload: RecentLogsPayload = serde_json::from_value(json!({
            "logs": [],
            "message": "Log file not found"
        }))
        .unwrap();
        assert!(payload.into_lines().is_empty());
    }

    #[test]
    fn timeline_accepts_wrapped_backend_shape() {
        let payload: TimelinePayload = serde_json::from_value(json!({
            "user_id": "octocat",
            "timeline": [{
                "date": "2024-01-02",
                "activities": [{
                    "id": 3,
                    "platform": "zhihu",
                    "url": "https://zhihu.com/p/3",
                    "title": "Answer",
                    "content_preview": "…",
                    "extracted_data": null,
                    "timestamp": "2024-01-02T09:00:00",
                    "date": "2024-01-02",
                    "time": "09:00:00"
                }]
            }]
        }))
        .unwrap();
        let buckets = payload.into_buckets();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].activities[0].id, "3");
    }
}
