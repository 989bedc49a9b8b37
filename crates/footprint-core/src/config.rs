use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent ones take the [`AppConfig::default`]
/// value. Decoupled from the real environment so tests can use a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let api_base_url = parse_base_url(
        "FOOTPRINT_API_BASE_URL",
        &or_default("FOOTPRINT_API_BASE_URL", &defaults.api_base_url),
    )?;
    let log_level = or_default("FOOTPRINT_LOG_LEVEL", &defaults.log_level);
    let user_agent = or_default("FOOTPRINT_USER_AGENT", &defaults.user_agent);

    let request_timeout_secs: u64 = parse_num(
        "FOOTPRINT_REQUEST_TIMEOUT_SECS",
        &or_default(
            "FOOTPRINT_REQUEST_TIMEOUT_SECS",
            &defaults.request_timeout_secs.to_string(),
        ),
    )?;
    let connect_timeout_secs: u64 = parse_num(
        "FOOTPRINT_CONNECT_TIMEOUT_SECS",
        &or_default(
            "FOOTPRINT_CONNECT_TIMEOUT_SECS",
            &defaults.connect_timeout_secs.to_string(),
        ),
    )?;
    let recent_log_lines: u32 = parse_num(
        "FOOTPRINT_RECENT_LOG_LINES",
        &or_default(
            "FOOTPRINT_RECENT_LOG_LINES",
            &defaults.recent_log_lines.to_string(),
        ),
    )?;
    let activity_limit: u32 = parse_num(
        "FOOTPRINT_ACTIVITY_LIMIT",
        &or_default(
            "FOOTPRINT_ACTIVITY_LIMIT",
            &defaults.activity_limit.to_string(),
        ),
    )?;
    let stream_channel_capacity: usize = parse_num(
        "FOOTPRINT_STREAM_CHANNEL_CAPACITY",
        &or_default(
            "FOOTPRINT_STREAM_CHANNEL_CAPACITY",
            &defaults.stream_channel_capacity.to_string(),
        ),
    )?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FOOTPRINT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if connect_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FOOTPRINT_CONNECT_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if stream_channel_capacity == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FOOTPRINT_STREAM_CHANNEL_CAPACITY".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        api_base_url,
        log_level,
        request_timeout_secs,
        connect_timeout_secs,
        user_agent,
        recent_log_lines,
        activity_limit,
        stream_channel_capacity,
    })
}

fn parse_num<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Accepts `http://` and `https://` origins; trailing slashes are stripped.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{raw}' must start with http:// or https://"),
        })?;
    if host.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{raw}' has no host"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
