mod commands;
mod render;
mod views;

use clap::{Parser, Subcommand};
use footprint_client::FootprintClient;
use footprint_core::BucketOrder;
use tracing_subscriber::EnvFilter;

use crate::views::TimelineSource;

#[derive(Debug, Parser)]
#[command(name = "footprint-cli")]
#[command(about = "Timeline, profile and live log client for the footprint backend")]
struct Cli {
    /// Backend origin; overrides `FOOTPRINT_API_BASE_URL`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check backend liveness.
    Health,
    /// Start collecting data for a user.
    Crawl {
        user_id: String,
        /// Platform to collect from (repeatable; default github and zhihu).
        #[arg(long = "platform")]
        platforms: Vec<String>,
        /// Search engine to query (repeatable; default google and bing).
        #[arg(long = "engine")]
        search_engines: Vec<String>,
    },
    /// List raw activity records.
    Activities {
        user_id: String,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show per-platform statistics.
    Stats { user_id: String },
    /// Show the date-grouped activity timeline.
    Timeline {
        user_id: String,
        /// Platform filter; `all` shows everything.
        #[arg(long, default_value = "all")]
        platform: String,
        /// Day order: `asc` or `desc`.
        #[arg(long, default_value = "desc")]
        order: BucketOrder,
        /// Use the server's grouping instead of aggregating locally.
        #[arg(long)]
        server: bool,
    },
    /// Show (or regenerate) a user's profile.
    Profile {
        user_id: String,
        #[arg(long)]
        generate: bool,
    },
    /// Print recent log lines, optionally following the live stream.
    Logs {
        #[arg(long)]
        lines: Option<u32>,
        #[arg(long, short)]
        follow: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = footprint_core::load_app_config()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = FootprintClient::new(&config)?;
    tracing::debug!(base_url = %client.base_url(), "client ready");

    match cli.command {
        Commands::Health => commands::run_health(&client).await,
        Commands::Crawl {
            user_id,
            platforms,
            search_engines,
        } => commands::run_crawl(&client, &user_id, platforms, search_engines).await,
        Commands::Activities {
            user_id,
            platform,
            limit,
        } => {
            commands::run_activities(
                &client,
                &user_id,
                platform.as_deref(),
                limit.unwrap_or(config.activity_limit),
            )
            .await
        }
        Commands::Stats { user_id } => commands::run_stats(&client, &user_id).await,
        Commands::Timeline {
            user_id,
            platform,
            order,
            server,
        } => {
            let source = if server {
                TimelineSource::Server
            } else {
                TimelineSource::Aggregated
            };
            commands::run_timeline(&client, &config, &user_id, &platform, order, source).await
        }
        Commands::Profile { user_id, generate } => {
            commands::run_profile(&client, &user_id, generate).await
        }
        Commands::Logs { lines, follow } => {
            commands::run_logs(
                &client,
                &config,
                lines.unwrap_or(config.recent_log_lines),
                follow,
            )
            .await
        }
    }
}
