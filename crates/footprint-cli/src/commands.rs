//! Command handlers: drive a view, print its state.

use footprint_client::{FootprintClient, StreamEvent};
use footprint_core::{date_range, AppConfig, BucketOrder};

use crate::render;
use crate::views::{LogsView, ProfileView, SubmitView, TimelineSource, TimelineView};

pub(crate) async fn run_health(client: &FootprintClient) -> anyhow::Result<()> {
    let health = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

pub(crate) async fn run_crawl(
    client: &FootprintClient,
    user_id: &str,
    platforms: Vec<String>,
    search_engines: Vec<String>,
) -> anyhow::Result<()> {
    let message = SubmitView::new(client)
        .submit(user_id, platforms, search_engines)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("{message}");
    Ok(())
}

pub(crate) async fn run_activities(
    client: &FootprintClient,
    user_id: &str,
    platform: Option<&str>,
    limit: u32,
) -> anyhow::Result<()> {
    let activities = client.activities(user_id, platform, limit).await?;
    if activities.is_empty() {
        println!("no activities found for {user_id}");
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&activities)?);
    Ok(())
}

pub(crate) async fn run_stats(client: &FootprintClient, user_id: &str) -> anyhow::Result<()> {
    let stats = client.stats(user_id).await?;
    let top = stats.platform_stats.top_platform().unwrap_or("N/A");
    print!("{}", render::render_stats(&stats, top));
    Ok(())
}

pub(crate) async fn run_timeline(
    client: &FootprintClient,
    config: &AppConfig,
    user_id: &str,
    platform: &str,
    order: BucketOrder,
    source: TimelineSource,
) -> anyhow::Result<()> {
    let mut view = TimelineView::new(client, user_id, source, order, config.activity_limit);
    if view.load().await.is_err() {
        let message = view.state().error.clone().unwrap_or_default();
        anyhow::bail!(message);
    }
    view.select_platform(platform);

    println!("Timeline for {user_id}");
    println!();
    if let Some(stats) = &view.state().stats {
        print!("{}", render::render_stats(stats, view.top_platform()));
        println!();
    }
    let buckets = view.filtered();
    let activities: Vec<_> = buckets
        .iter()
        .flat_map(|b| b.activities.iter().cloned())
        .collect();
    if let Some(range) = date_range(&activities) {
        println!("{:<18}{}", "Active", render::render_date_range(&range));
        println!();
    }
    print!("{}", render::render_timeline(&buckets));
    Ok(())
}

pub(crate) async fn run_profile(
    client: &FootprintClient,
    user_id: &str,
    generate: bool,
) -> anyhow::Result<()> {
    let mut view = ProfileView::new(client, user_id);
    let result = if generate {
        view.generate().await
    } else {
        view.load().await
    };
    if result.is_err() {
        let message = view.error().unwrap_or("Error loading profile").to_owned();
        anyhow::bail!(message);
    }
    if let Some(profile) = view.profile() {
        println!("{}", serde_json::to_string_pretty(profile)?);
    }
    Ok(())
}

/// Prints the recent snapshot, then with `follow` tails the live stream until
/// Ctrl-C or until the stream is lost.
pub(crate) async fn run_logs(
    client: &FootprintClient,
    config: &AppConfig,
    lines: u32,
    follow: bool,
) -> anyhow::Result<()> {
    let mut view = LogsView::new(client.clone(), lines, config.stream_channel_capacity);
    if let Err(e) = view.refresh().await {
        // A live tail is still useful without the snapshot.
        if !follow {
            anyhow::bail!(e.user_message());
        }
        eprintln!("warning: {}", e.user_message());
    }

    if view.buffer().is_empty() && !follow {
        println!("No logs available");
        return Ok(());
    }
    for (position, line) in view.buffer().lines().iter().enumerate() {
        println!("{}", render::format_log_line(position, line));
    }
    if !follow {
        return Ok(());
    }

    view.toggle_live();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let event = tokio::select! {
            result = &mut ctrl_c => {
                result?;
                None
            }
            event = view.pump() => event,
        };

        match event {
            Some(StreamEvent::Connected) => tracing::info!("live log stream connected"),
            Some(StreamEvent::Appended { position, .. }) => {
                if let Some(line) = view.buffer().lines().get(position) {
                    println!("{}", render::format_log_line(position, line));
                }
            }
            Some(StreamEvent::Lost(_)) => {
                eprintln!(
                    "{}",
                    view.error().unwrap_or("Lost connection to log stream")
                );
                break;
            }
            None => break,
        }
    }

    if view.is_live() {
        view.toggle_live();
    }
    Ok(())
}
