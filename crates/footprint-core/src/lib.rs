//! Domain model, timeline aggregation, and configuration shared by the
//! footprint client crates.

pub mod activity;
pub mod app_config;
pub mod config;
pub mod stats;
pub mod timeline;
pub mod timestamp;

use thiserror::Error;

pub use activity::{ActivityRecord, CrawlRequest, DEFAULT_PLATFORMS, DEFAULT_SEARCH_ENGINES};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use stats::{top_platform, PlatformStats, UserStats};
pub use timeline::{
    aggregate, aggregate_with_order, date_range, filter_by_platform, BucketOrder, DateRange,
    PlatformFilter, Timeline, TimelineBucket,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
