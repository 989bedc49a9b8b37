use crate::timestamp::parse_timestamp;

use super::*;

fn record(id: &str, platform: &str, timestamp: &str) -> ActivityRecord {
    ActivityRecord {
        id: id.to_owned(),
        user_id: "octocat".to_owned(),
        platform: platform.to_owned(),
        activity_type: "post".to_owned(),
        title: format!("activity {id}"),
        description: None,
        url: None,
        timestamp: parse_timestamp(timestamp).expect("test timestamp should parse"),
        metadata: None,
    }
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("test date should parse")
}

fn ids(bucket: &TimelineBucket) -> Vec<&str> {
    bucket.activities.iter().map(|a| a.id.as_str()).collect()
}

/// rec1, rec2 on 2024-01-01 (github); rec3 on 2024-01-02 (zhihu).
fn sample() -> Vec<ActivityRecord> {
    vec![
        record("rec1", "github", "2024-01-01T10:00"),
        record("rec2", "github", "2024-01-01T12:00"),
        record("rec3", "zhihu", "2024-01-02T09:00"),
    ]
}

#[test]
fn aggregate_empty_input_yields_empty_outputs() {
    let timeline = aggregate(&[]);
    assert!(timeline.buckets.is_empty());
    assert!(timeline.platform_stats.is_empty());
    assert!(timeline.last_activity.is_none());
    assert!(date_range(&[]).is_none());
}

#[test]
fn aggregate_groups_by_day_with_stats_and_last_activity() {
    let timeline = aggregate(&sample());

    assert_eq!(timeline.buckets.len(), 2);
    assert_eq!(timeline.buckets[0].date, day("2024-01-01"));
    assert_eq!(ids(&timeline.buckets[0]), vec!["rec1", "rec2"]);
    assert_eq!(timeline.buckets[1].date, day("2024-01-02"));
    assert_eq!(ids(&timeline.buckets[1]), vec!["rec3"]);

    let expected: PlatformStats = [("github", 2), ("zhihu", 1)].into_iter().collect();
    assert_eq!(timeline.platform_stats, expected);
    assert_eq!(
        timeline.last_activity,
        parse_timestamp("2024-01-02T09:00")
    );
    assert_eq!(timeline.activity_count(), 3);
}

#[test]
fn aggregate_descending_reverses_days_only() {
    let timeline = aggregate_with_order(&sample(), BucketOrder::Descending);
    assert_eq!(timeline.buckets[0].date, day("2024-01-02"));
    assert_eq!(timeline.buckets[1].date, day("2024-01-01"));
    assert_eq!(ids(&timeline.buckets[1]), vec!["rec1", "rec2"]);
}

#[test]
fn aggregate_keeps_input_order_within_a_day() {
    // Later timestamp first: grouping must not re-sort inside the day.
    let records = vec![
        record("late", "github", "2024-01-01T23:00"),
        record("early", "github", "2024-01-01T01:00"),
    ];
    let timeline = aggregate(&records);
    assert_eq!(ids(&timeline.buckets[0]), vec!["late", "early"]);
}

#[test]
fn aggregate_day_sets_do_not_depend_on_input_order() {
    let forward = sample();
    let mut backward = sample();
    backward.reverse();
    let rotated = vec![forward[2].clone(), forward[0].clone(), forward[1].clone()];

    let as_sets = |timeline: &Timeline| -> Vec<(NaiveDate, Vec<String>)> {
        timeline
            .buckets
            .iter()
            .map(|b| {
                let mut ids: Vec<String> = b.activities.iter().map(|a| a.id.clone()).collect();
                ids.sort();
                (b.date, ids)
            })
            .collect()
    };

    let reference = as_sets(&aggregate(&forward));
    assert_eq!(as_sets(&aggregate(&backward)), reference);
    assert_eq!(as_sets(&aggregate(&rotated)), reference);
}

#[test]
fn aggregate_normalises_offsets_to_utc_days() {
    // 01:30 at +08:00 is still the previous day in UTC.
    let records = vec![record("r", "github", "2024-03-02T01:30:00+08:00")];
    let timeline = aggregate(&records);
    assert_eq!(timeline.buckets[0].date, day("2024-03-01"));
}

#[test]
fn aggregate_stats_cover_entire_input() {
    let timeline = aggregate(&sample());
    let zhihu_only = filter_by_platform(
        &timeline.buckets,
        &PlatformFilter::from_selection("zhihu"),
    );
    assert_eq!(zhihu_only.len(), 1);
    assert_eq!(timeline.platform_stats.get("github"), 2);
}

#[test]
fn filter_by_platform_drops_emptied_buckets() {
    let timeline = aggregate(&sample());
    let filtered = filter_by_platform(&timeline.buckets, &PlatformFilter::Platform("zhihu".into()));

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].date, day("2024-01-02"));
    assert_eq!(ids(&filtered[0]), vec!["rec3"]);
}

#[test]
fn filter_by_platform_restricts_mixed_buckets() {
    let records = vec![
        record("a", "github", "2024-01-01T08:00"),
        record("b", "zhihu", "2024-01-01T09:00"),
        record("c", "github", "2024-01-01T10:00"),
    ];
    let timeline = aggregate(&records);
    let filtered = filter_by_platform(&timeline.buckets, &PlatformFilter::Platform("github".into()));
    assert_eq!(ids(&filtered[0]), vec!["a", "c"]);
}

#[test]
fn filter_by_platform_all_is_identity() {
    let timeline = aggregate(&sample());
    let filtered = filter_by_platform(&timeline.buckets, &PlatformFilter::from_selection("all"));
    assert_eq!(filtered, timeline.buckets);
}

#[test]
fn filter_by_unknown_platform_is_empty() {
    let timeline = aggregate(&sample());
    let filtered = filter_by_platform(&timeline.buckets, &PlatformFilter::Platform("bing".into()));
    assert!(filtered.is_empty());
}

#[test]
fn platform_filter_from_selection() {
    assert_eq!(PlatformFilter::from_selection("ALL"), PlatformFilter::All);
    assert_eq!(PlatformFilter::from_selection(" "), PlatformFilter::All);
    assert_eq!(
        PlatformFilter::from_selection("github"),
        PlatformFilter::Platform("github".into())
    );
    assert_eq!(PlatformFilter::All.to_string(), "all");
}

#[test]
fn bucket_order_parses_short_and_long_forms() {
    assert_eq!("asc".parse::<BucketOrder>(), Ok(BucketOrder::Ascending));
    assert_eq!("Descending".parse::<BucketOrder>(), Ok(BucketOrder::Descending));
    assert!("sideways".parse::<BucketOrder>().is_err());
}

#[test]
fn date_range_spans_whole_days() {
    let range = date_range(&sample()).expect("non-empty input has a range");
    assert_eq!(range.earliest, parse_timestamp("2024-01-01T10:00").unwrap());
    assert_eq!(range.latest, parse_timestamp("2024-01-02T09:00").unwrap());
    assert_eq!(range.span_days, 0);
}

#[test]
fn bucket_shape_matches_server_timeline_json() {
    let timeline = aggregate_with_order(&sample(), BucketOrder::Descending);
    let json = serde_json::to_value(&timeline.buckets).unwrap();
    assert_eq!(json[0]["date"], "2024-01-02");
    assert_eq!(json[0]["activities"][0]["id"], "rec3");

    let round: Vec<TimelineBucket> = serde_json::from_value(json).unwrap();
    assert_eq!(round, timeline.buckets);
}
