//! Plain-text formatting for command output.

use chrono::{DateTime, NaiveDate, Utc};
use footprint_core::{ActivityRecord, DateRange, TimelineBucket, UserStats};

/// `Jan 2, 2024`
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Jan 2, 2024 09:00`
pub(crate) fn format_date_time(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %H:%M").to_string()
}

/// Buffer line with its 1-based position, zero-padded to four digits.
pub(crate) fn format_log_line(position: usize, line: &str) -> String {
    format!("[{:04}] {line}", position + 1)
}

/// `github` -> `Github`.
pub(crate) fn platform_label(platform: &str) -> String {
    let mut chars = platform.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Joins rendered lines, each terminated by a newline.
fn finish(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub(crate) fn render_stats(stats: &UserStats, top_platform: &str) -> String {
    let last = stats
        .last_activity
        .map_or_else(|| "N/A".to_owned(), |ts| format_date(ts.date_naive()));
    let mut lines = vec![
        format!("{:<18}{}", "Total Activities", stats.total_activities),
        format!("{:<18}{}", "Platforms", stats.platform_stats.len()),
        format!("{:<18}{top_platform}", "Top Platform"),
        format!("{:<18}{last}", "Last Activity"),
    ];
    lines.extend(
        stats
            .platform_stats
            .iter()
            .map(|(platform, count)| format!("  {:<16}{count}", platform_label(platform))),
    );
    finish(&lines)
}

/// `Jan 1, 2024 to Mar 3, 2024 (62 days)`
pub(crate) fn render_date_range(range: &DateRange) -> String {
    format!(
        "{} to {} ({} days)",
        format_date(range.earliest.date_naive()),
        format_date(range.latest.date_naive()),
        range.span_days
    )
}

fn render_activity(lines: &mut Vec<String>, activity: &ActivityRecord) {
    let title = if activity.title.is_empty() {
        "(untitled)"
    } else {
        activity.title.as_str()
    };
    lines.push(format!("  [{}] {title}", activity.platform.to_uppercase()));
    if let Some(description) = activity.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("      {description}"));
    }
    let when = format_date_time(activity.timestamp);
    lines.push(match activity.url.as_deref() {
        Some(url) => format!("      {when}  {url}"),
        None => format!("      {when}"),
    });
}

pub(crate) fn render_timeline(buckets: &[TimelineBucket]) -> String {
    if buckets.is_empty() {
        return "No activities found for the selected platform.\n".to_owned();
    }
    let mut lines = Vec::new();
    for bucket in buckets {
        let count = bucket.activities.len();
        let noun = if count == 1 { "activity" } else { "activities" };
        lines.push(format!("{} ({count} {noun})", format_date(bucket.date)));
        for activity in &bucket.activities {
            render_activity(&mut lines, activity);
        }
    }
    finish(&lines)
}

#[cfg(test)]
mod tests {
    use footprint_core::timestamp::parse_timestamp;
    use footprint_core::PlatformStats;

    use super::*;

    #[test]
    fn format_log_line_pads_position() {
        assert_eq!(format_log_line(0, "hello"), "[0001] hello");
        assert_eq!(format_log_line(41, "x"), "[0042] x");
    }

    #[test]
    fn format_date_is_short_month() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(format_date(date), "Jan 2, 2024");
    }

    #[test]
    fn platform_label_capitalises() {
        assert_eq!(platform_label("github"), "Github");
        assert_eq!(platform_label(""), "");
    }

    #[test]
    fn render_stats_shows_placeholders() {
        let stats = UserStats {
            user_id: None,
            total_activities: 0,
            platform_stats: PlatformStats::new(),
            last_activity: None,
        };
        let text = render_stats(&stats, "N/A");
        assert!(text.contains("Top Platform      N/A"));
        assert!(text.contains("Last Activity     N/A"));
    }

    #[test]
    fn render_stats_lists_platform_counts() {
        let stats = UserStats {
            user_id: Some("octocat".to_owned()),
            total_activities: 3,
            platform_stats: [("github", 2), ("zhihu", 1)].into_iter().collect(),
            last_activity: parse_timestamp("2024-01-02T09:00:00"),
        };
        assert_eq!(
            render_stats(&stats, "github"),
            "Total Activities  3\n\
             Platforms         2\n\
             Top Platform      github\n\
             Last Activity     Jan 2, 2024\n  \
             Github          2\n  \
             Zhihu           1\n"
        );
    }

    #[test]
    fn render_timeline_lists_days_and_records() {
        let activity = ActivityRecord {
            id: "1".to_owned(),
            user_id: "octocat".to_owned(),
            platform: "github".to_owned(),
            activity_type: "commit".to_owned(),
            title: "Fix parser".to_owned(),
            description: None,
            url: Some("https://github.com/x".to_owned()),
            timestamp: parse_timestamp("2024-01-01T10:00").unwrap(),
            metadata: None,
        };
        let buckets = vec![TimelineBucket {
            date: activity.day(),
            activities: vec![activity],
        }];
        let text = render_timeline(&buckets);
        assert!(text.starts_with("Jan 1, 2024 (1 activity)"));
        assert!(text.contains("[GITHUB] Fix parser"));
        assert!(text.contains("https://github.com/x"));
    }

    #[test]
    fn render_date_range_spans_days() {
        let range = DateRange {
            earliest: parse_timestamp("2024-01-01T10:00").unwrap(),
            latest: parse_timestamp("2024-01-04T09:00").unwrap(),
            span_days: 2,
        };
        assert_eq!(
            render_date_range(&range),
            "Jan 1, 2024 to Jan 4, 2024 (2 days)"
        );
    }

    #[test]
    fn render_empty_timeline() {
        assert_eq!(
            render_timeline(&[]),
            "No activities found for the selected platform.\n"
        );
    }
}
