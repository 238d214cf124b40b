//! Plain-text summary of the report sections that are not drawn.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;
use tunelog_common::{format_count, Result, TunelogError};
use tunelog_stats::types::BucketStats;
use tunelog_stats::AggregatedReport;

/// Formats the overview, peak hours, rankings, weekday split, special days
/// and skip rates as plain text.
pub fn render_summary(report: &AggregatedReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_sections(&mut out, report);
    out
}

fn write_sections(out: &mut String, report: &AggregatedReport) -> std::fmt::Result {
    let overview = &report.overview;
    writeln!(out, "Listening summary")?;
    writeln!(out, "=================")?;
    writeln!(out, "Plays:          {}", format_count(overview.total_plays))?;
    writeln!(out, "Minutes:        {}", format_count(overview.total_minutes))?;
    writeln!(out, "Hours:          {:.1}", overview.total_hours)?;
    writeln!(out, "Days:           {:.2}", overview.total_days)?;
    writeln!(out, "Unique artists: {}", format_count(overview.unique_artists as u64))?;
    writeln!(out, "Unique tracks:  {}", format_count(overview.unique_tracks as u64))?;

    writeln!(out)?;
    writeln!(out, "Peak hours")?;
    writeln!(out, "----------")?;
    writeln!(out, "{}", report.peak_hours.description)?;
    if !report.peak_hours.top_hours.is_empty() {
        let hours: Vec<String> = report.peak_hours.top_hours.iter().map(|h| format!("{h}:00")).collect();
        writeln!(out, "Busiest: {}", hours.join(", "))?;
    }

    if !report.top_artists.is_empty() {
        writeln!(out)?;
        writeln!(out, "Top artists")?;
        writeln!(out, "-----------")?;
        for (rank, artist) in report.top_artists.iter().enumerate() {
            writeln!(
                out,
                "{:>2}. {} ({} min, {} plays, {}% of #1)",
                rank + 1,
                artist.artist,
                format_count(artist.minutes),
                format_count(artist.plays),
                artist.pct
            )?;
        }
    }

    if !report.top_tracks.is_empty() {
        writeln!(out)?;
        writeln!(out, "Top tracks")?;
        writeln!(out, "----------")?;
        for (rank, track) in report.top_tracks.iter().enumerate() {
            writeln!(
                out,
                "{:>2}. {} by {} ({} min, {} plays)",
                rank + 1,
                track.track,
                track.artist,
                format_count(track.minutes),
                format_count(track.plays)
            )?;
        }
    }

    let split = &report.weekday_vs_weekend;
    if split.weekday.total_plays + split.weekend.total_plays > 0 {
        writeln!(out)?;
        writeln!(out, "Weekday vs weekend")?;
        writeln!(out, "------------------")?;
        write_bucket(out, "Weekday", &split.weekday)?;
        write_bucket(out, "Weekend", &split.weekend)?;
    }

    if !report.special_days.is_empty() {
        writeln!(out)?;
        writeln!(out, "Special days")?;
        writeln!(out, "------------")?;
        for activity in report.special_days.values() {
            writeln!(
                out,
                "{}: {} plays, {} min",
                activity.date,
                format_count(activity.plays),
                format_count(activity.minutes)
            )?;
        }
    }

    if !report.skipped_tracks.is_empty() {
        writeln!(out)?;
        writeln!(out, "Most skipped")?;
        writeln!(out, "------------")?;
        for track in &report.skipped_tracks {
            writeln!(
                out,
                "{} by {}: {}% ({} of {} plays)",
                track.track, track.artist, track.skip_rate, track.skipped, track.total_plays
            )?;
        }
    }

    let meta = &report.metadata;
    writeln!(out)?;
    writeln!(out, "Source: {} ({})", meta.data_source, meta.timezone)?;
    writeln!(
        out,
        "Skips: {}; rates need at least {} plays",
        meta.skip_definition, meta.min_plays_for_skip_rate
    )?;
    Ok(())
}

fn write_bucket(out: &mut String, name: &str, bucket: &BucketStats) -> std::fmt::Result {
    write!(
        out,
        "{name}: {:.1} h/day, {:.1} plays/day over {} days",
        bucket.avg_hours_per_day, bucket.avg_plays_per_day, bucket.days_count
    )?;
    if let Some(top) = bucket.top_artists.first() {
        write!(out, ", mostly {}", top.artist)?;
    }
    writeln!(out)
}

/// Writes [`render_summary`] to `path`, creating parent directories.
pub fn write_summary(report: &AggregatedReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_summary(report)).map_err(|e| {
        TunelogError::with_source(format!("failed to write summary {}", path.display()), e)
    })?;
    info!("Wrote summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunelog_common::test_utils::*;
    use tunelog_config::AggregationSettings;
    use tunelog_stats::build_report;

    #[test]
    fn test_summary_of_sample_report() {
        let report = build_report(&sample_history(), &AggregationSettings::default()).unwrap();
        let text = render_summary(&report);

        assert!(text.contains("Plays:          6"));
        assert!(text.contains("Minutes:        22"));
        assert!(text.contains(" 1. A (8 min, 3 plays"));
        assert!(text.contains(" 1. Alpha by A"));
        assert!(text.contains(&report.peak_hours.description));
        assert!(text.contains("Source: Spotify Extended Streaming History (America/Los_Angeles)"));
        assert!(!text.contains("Most skipped"));
        assert!(!text.contains("Special days"));
    }

    #[test]
    fn test_summary_lists_special_days() {
        let events = vec![play(mock_timestamp(2025, 12, 25, 18, 0, 0), "Feliz Navidad", "José Feliciano", 180_000)];
        let report = build_report(&events, &AggregationSettings::default()).unwrap();
        let text = render_summary(&report);

        assert!(text.contains("Navidad: 1 plays, 3 min"));
        assert!(text.contains("Feliz Navidad by José Feliciano"));
    }

    #[test]
    fn test_summary_of_empty_report() {
        let report = build_report(&[], &AggregationSettings::default()).unwrap();
        let text = render_summary(&report);

        assert!(text.contains("Plays:          0"));
        assert!(text.contains("No listening activity"));
        assert!(!text.contains("Top artists"));
        assert!(!text.contains("Weekday vs weekend"));
    }
}
