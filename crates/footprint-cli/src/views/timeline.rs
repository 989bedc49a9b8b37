use footprint_client::FootprintClient;
use footprint_core::{
    aggregate_with_order, filter_by_platform, BucketOrder, PlatformFilter, TimelineBucket,
    UserStats,
};

use super::ViewError;

/// Where the buckets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimelineSource {
    /// Fetch raw activities and group them locally.
    Aggregated,
    /// Use the server's pre-grouped `/users/{id}/timeline`.
    Server,
}

#[derive(Debug, Default)]
pub(crate) struct TimelineState {
    pub stats: Option<UserStats>,
    pub timeline: Vec<TimelineBucket>,
    pub selected: PlatformFilter,
    pub error: Option<String>,
}

pub(crate) struct TimelineView<'a> {
    client: &'a FootprintClient,
    user_id: String,
    source: TimelineSource,
    order: BucketOrder,
    activity_limit: u32,
    state: TimelineState,
}

impl<'a> TimelineView<'a> {
    pub(crate) fn new(
        client: &'a FootprintClient,
        user_id: &str,
        source: TimelineSource,
        order: BucketOrder,
        activity_limit: u32,
    ) -> Self {
        Self {
            client,
            user_id: user_id.to_owned(),
            source,
            order,
            activity_limit,
            state: TimelineState::default(),
        }
    }

    pub(crate) fn state(&self) -> &TimelineState {
        &self.state
    }

    /// Fetches stats and buckets together; nothing changes unless both
    /// succeed.
    pub(crate) async fn load(&mut self) -> Result<(), ViewError> {
        match self.fetch().await {
            Ok((stats, timeline)) => {
                self.state.stats = Some(stats);
                self.state.timeline = timeline;
                self.state.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "timeline load failed");
                self.state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<(UserStats, Vec<TimelineBucket>), ViewError> {
        let user_id = self.user_id.as_str();
        match self.source {
            TimelineSource::Aggregated => {
                let (stats, activities) = tokio::try_join!(
                    self.client.stats(user_id),
                    self.client.activities(user_id, None, self.activity_limit),
                )?;
                let timeline = aggregate_with_order(&activities, self.order);
                tracing::debug!(
                    user_id,
                    activities = activities.len(),
                    days = timeline.buckets.len(),
                    "aggregated timeline"
                );
                Ok((stats, timeline.buckets))
            }
            TimelineSource::Server => {
                let (stats, mut buckets) = tokio::try_join!(
                    self.client.stats(user_id),
                    self.client.timeline(user_id),
                )?;
                sort_buckets(&mut buckets, self.order);
                Ok((stats, buckets))
            }
        }
    }

    pub(crate) fn select_platform(&mut self, selection: &str) {
        self.state.selected = PlatformFilter::from_selection(selection);
    }

    /// Buckets after applying the selected platform filter.
    pub(crate) fn filtered(&self) -> Vec<TimelineBucket> {
        filter_by_platform(&self.state.timeline, &self.state.selected)
    }

    /// Display value for the busiest platform, `"N/A"` without stats.
    pub(crate) fn top_platform(&self) -> &str {
        self.state
            .stats
            .as_ref()
            .and_then(|s| s.platform_stats.top_platform())
            .unwrap_or("N/A")
    }
}

fn sort_buckets(buckets: &mut [TimelineBucket], order: BucketOrder) {
    match order {
        BucketOrder::Ascending => buckets.sort_by_key(|b| b.date),
        BucketOrder::Descending => buckets.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}
