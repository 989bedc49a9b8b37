use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Platforms requested when a crawl does not name any.
pub const DEFAULT_PLATFORMS: &[&str] = &["github", "zhihu"];

/// Search engines requested when a crawl does not name any.
pub const DEFAULT_SEARCH_ENGINES: &[&str] = &["google", "bing"];

/// A single timestamped activity collected for a user.
///
/// Records are immutable once received; identity is [`ActivityRecord::id`].
/// Deserialization accepts the backend's storage shape as well as the
/// documented one: numeric ids, `content` or `content_preview` in place of
/// `description`, and `extracted_data` in place of `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub platform: String,
    #[serde(default)]
    pub activity_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(
        default,
        alias = "content",
        alias = "content_preview",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(with = "crate::timestamp::lenient")]
    pub timestamp: DateTime<Utc>,
    #[serde(
        default,
        alias = "extracted_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ActivityRecord {
    /// The UTC calendar day this record falls on.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Body of `POST /crawl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub user_id: String,
    pub platforms: Vec<String>,
    pub search_engines: Vec<String>,
}

impl CrawlRequest {
    /// Builds a crawl request, substituting [`DEFAULT_PLATFORMS`] and
    /// [`DEFAULT_SEARCH_ENGINES`] for empty selections. The user id is trimmed.
    #[must_use]
    pub fn new(user_id: &str, platforms: Vec<String>, search_engines: Vec<String>) -> Self {
        let or_defaults = |given: Vec<String>, defaults: &[&str]| {
            if given.is_empty() {
                defaults.iter().map(|s| (*s).to_owned()).collect()
            } else {
                given
            }
        };
        Self {
            user_id: user_id.trim().to_owned(),
            platforms: or_defaults(platforms, DEFAULT_PLATFORMS),
            search_engines: or_defaults(search_engines, DEFAULT_SEARCH_ENGINES),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
