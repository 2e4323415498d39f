#![forbid(unsafe_code)]

//! Command-line pipeline that finds a channel's most-watched long-form
//! videos and exports the comments of the longest among them to CSV.
//!
//! The defaults reproduce the original one-shot Wimbledon run; every knob is
//! still overridable so the same binary works for any channel. Partial API
//! failures degrade to best-effort output with a printed warning instead of
//! aborting the run.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use wimby_tools::catalog::{fetch_channel_videos, rank_videos};
use wimby_tools::comments::collect_comments;
use wimby_tools::config::{
    AnalyzerConfig, DEFAULT_DATA_DIR, DEFAULT_MIN_DURATION_SECS, DEFAULT_TOP_COUNT, load_api_key,
};
use wimby_tools::error::FetchStatus;
use wimby_tools::export::write_comments_csv;
use wimby_tools::youtube::YouTubeClient;

#[derive(Parser, Debug)]
#[command(
    name = "analyze_channel",
    about = "Export the comments of a channel's longest top-viewed video to CSV"
)]
struct Cli {
    #[arg(default_value = "Wimbledon", help = "Channel name to search for")]
    channel: String,
    #[arg(
        long = "top",
        default_value_t = DEFAULT_TOP_COUNT,
        value_name = "N",
        help = "How many top-viewed videos to consider"
    )]
    top: usize,
    #[arg(
        long = "min-duration",
        default_value_t = DEFAULT_MIN_DURATION_SECS,
        value_name = "SECONDS",
        help = "Ignore videos at or below this duration"
    )]
    min_duration: u64,
    #[arg(
        long = "max-comments",
        value_name = "COUNT",
        help = "Stop after collecting this many comments"
    )]
    max_comments: Option<usize>,
    #[arg(
        long = "data-dir",
        default_value = DEFAULT_DATA_DIR,
        value_name = "PATH",
        help = "Directory the CSV file is written to"
    )]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AnalyzerConfig {
        top_count: cli.top,
        min_duration_secs: cli.min_duration,
        data_dir: cli.data_dir.clone(),
        ..AnalyzerConfig::default()
    };

    let api_key = load_api_key()?;
    let client = YouTubeClient::new(api_key);

    println!("Fetching {} channel data...", cli.channel);
    let channel_id = client.find_channel_id(&cli.channel)?;
    let playlist_id = client.uploads_playlist(&channel_id)?;

    println!("Fetching videos...");
    let catalog = fetch_channel_videos(&client, &cfg, &playlist_id);
    if let FetchStatus::Aborted(cause) = &catalog.status {
        eprintln!(
            "Warning: video listing is incomplete ({cause}); continuing with {} videos",
            catalog.items.len()
        );
    }

    let ranked = rank_videos(catalog.items, cfg.top_count);
    let Some(target) = ranked.first() else {
        println!("No videos found meeting criteria");
        return Ok(());
    };

    println!();
    println!(
        "Fetching comments for: {} ({})",
        target.title, target.duration_display
    );
    let comments = collect_comments(&client, &cfg, &target.id, cli.max_comments);
    if let FetchStatus::Aborted(cause) = &comments.status {
        eprintln!("Warning: comment collection stopped early ({cause})");
    }

    let file_name = csv_file_name(&cli.channel, &target.id);
    let saved = write_comments_csv(&comments.items, &cfg.data_dir, &file_name)?;
    println!(
        "Saved {} comments to {}",
        comments.items.len(),
        saved.display()
    );

    Ok(())
}

/// Deterministic output name: lowercased channel slug plus the video id.
fn csv_file_name(channel: &str, video_id: &str) -> String {
    let slug: String = channel
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{slug}_comments_{video_id}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_matches_the_original_layout() {
        assert_eq!(
            csv_file_name("Wimbledon", "dQw4w9WgXcQ"),
            "wimbledon_comments_dQw4w9WgXcQ.csv"
        );
    }

    #[test]
    fn file_name_slugifies_awkward_channel_names() {
        assert_eq!(
            csv_file_name("Roland Garros!", "abc"),
            "roland_garros__comments_abc.csv"
        );
    }

    #[test]
    fn cli_defaults_mirror_the_original_run() {
        let cli = Cli::parse_from(["analyze_channel"]);
        assert_eq!(cli.channel, "Wimbledon");
        assert_eq!(cli.top, 30);
        assert_eq!(cli.min_duration, 60);
        assert_eq!(cli.max_comments, None);
        assert_eq!(cli.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn cli_accepts_overrides() {
        let cli = Cli::parse_from([
            "analyze_channel",
            "US Open",
            "--top",
            "5",
            "--max-comments",
            "250",
            "--data-dir",
            "/tmp/out",
        ]);
        assert_eq!(cli.channel, "US Open");
        assert_eq!(cli.top, 5);
        assert_eq!(cli.max_comments, Some(250));
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/out"));
    }
}
