//! Integration tests for the tunelog-render crate.
//!
//! Drawing goes through the font stack, so tests that rasterize text are
//! ignored unless system fonts are available.

use std::fs;
use tunelog_common::test_utils::{create_temp_dir, mock_timestamp, play, sample_history, PlayEventBuilder};
use tunelog_config::{AggregationSettings, ImageFormat, RenderSettings};
use tunelog_render::{chart_specs, render_report, write_summary, ChartKind};
use tunelog_stats::{build_report, AggregatedReport};

fn sample_report() -> AggregatedReport {
    build_report(&sample_history(), &AggregationSettings::default()).unwrap()
}

#[test]
fn test_summary_written_from_stored_report() {
    let dir = create_temp_dir();
    let report_path = dir.path().join("report.json");
    sample_report().write_to(&report_path).unwrap();

    let report = AggregatedReport::read_from(&report_path).unwrap();
    let summary_path = dir.path().join("out").join("summary.txt");
    write_summary(&report, &summary_path).unwrap();

    let text = fs::read_to_string(&summary_path).unwrap();
    assert!(text.starts_with("Listening summary"));
    assert!(text.contains("Top artists"));
}

#[test]
fn test_skipped_tracks_become_a_chart() {
    let mut events = Vec::new();
    for day in 1..=12 {
        events.push(
            PlayEventBuilder::at(mock_timestamp(2025, 3, day, 20, 0, 0))
                .track("Again", "Loop")
                .ms(30_000)
                .skipped(day % 2 == 0)
                .build(),
        );
    }
    let report = build_report(&events, &AggregationSettings::default()).unwrap();
    let specs = chart_specs(&report, 28);

    let skipped = specs.iter().find(|s| s.name == "skipped_tracks").unwrap();
    match &skipped.kind {
        ChartKind::Ranking(bars) => {
            assert_eq!(bars.len(), 1);
            assert_eq!(bars[0].value, 50.0);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn test_render_report_rejects_bad_colors_before_writing() {
    let dir = create_temp_dir();
    let settings = RenderSettings {
        output_dir: dir.path().join("charts"),
        background_color: "#12345".to_string(),
        ..RenderSettings::default()
    };

    assert!(render_report(&sample_report(), &settings).is_err());
    assert!(!settings.output_dir.exists());
}

#[test]
#[ignore = "requires system fonts"]
fn test_render_report_png() {
    let dir = create_temp_dir();
    let settings = RenderSettings {
        output_dir: dir.path().join("charts"),
        format: ImageFormat::Png,
        width: 640,
        height: 400,
        ..RenderSettings::default()
    };

    let written = render_report(&sample_report(), &settings).unwrap();

    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"top_artists.png".to_string()));
    assert!(names.contains(&"hourly_heatmap.png".to_string()));
    assert_eq!(names.last().map(String::as_str), Some("summary.txt"));
    for path in &written {
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
}

#[test]
#[ignore = "requires system fonts"]
fn test_render_report_svg_keeps_non_ascii_labels() {
    let dir = create_temp_dir();
    let events = vec![
        play(mock_timestamp(2025, 5, 5, 19, 0, 0), "La Bamba", "Ritchie Valens", 120_000),
        play(mock_timestamp(2025, 5, 5, 20, 0, 0), "Bésame Mucho", "Consuelo Velázquez", 200_000),
    ];
    let report = build_report(&events, &AggregationSettings::default()).unwrap();
    let settings = RenderSettings {
        output_dir: dir.path().to_path_buf(),
        format: ImageFormat::Svg,
        ..RenderSettings::default()
    };

    render_report(&report, &settings).unwrap();

    let svg = fs::read_to_string(dir.path().join("top_artists.svg")).unwrap();
    assert!(svg.contains("Consuelo Velázquez"));
}
