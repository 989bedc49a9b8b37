#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin every request path is resolved against.
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Line count requested from `/logs/recent` on load and refresh.
    pub recent_log_lines: u32,
    /// Default `limit` for `/users/{id}/activities`.
    pub activity_limit: u32,
    /// Messages the log stream may queue ahead of its consumer.
    pub stream_channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_owned(),
            log_level: "info".to_owned(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: "footprint/0.1 (timeline-client)".to_owned(),
            recent_log_lines: 100,
            activity_limit: 100,
            stream_channel_capacity: 256,
        }
    }
}
