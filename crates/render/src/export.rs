//! Saving the usage chart as an SVG image.

use chrono::{DateTime, Local};
use memtrack_core::{Result, TrackerError};
use memtrack_theme::Palette;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 45.0;
const MARGIN_BOTTOM: f64 = 30.0;

/// `memory_usage_20260101_120000.svg`
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("memory_usage_{}.svg", now.format("%Y%m%d_%H%M%S"))
}

/// Draw `series` into an SVG document, with `capacity` slots along the x-axis.
pub fn render_svg(series: &[f64], capacity: usize, palette: &Palette) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x_of = |i: usize| MARGIN_LEFT + plot_w * i as f64 / capacity.max(1) as f64;
    let y_of = |v: f64| MARGIN_TOP + plot_h * (1.0 - v.clamp(0.0, 100.0) / 100.0);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        palette.background.to_hex()
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{plot_w}" height="{plot_h}" fill="{}"/>"#,
        palette.plot_background.to_hex()
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="28" fill="{}" font-size="17" text-anchor="middle" font-family="sans-serif">Memory Usage (Last {capacity} samples)</text>"#,
        WIDTH / 2.0,
        palette.title.to_hex()
    );

    // Grid and y-axis ticks every 20%.
    for pct in (0..=100).step_by(20) {
        let y = y_of(pct as f64);
        let _ = writeln!(
            svg,
            r#"  <line x1="{MARGIN_LEFT}" y1="{y}" x2="{}" y2="{y}" stroke="{}" stroke-width="0.5" stroke-dasharray="4 4"/>"#,
            WIDTH - MARGIN_RIGHT,
            palette.grid.to_hex()
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" fill="{}" font-size="11" text-anchor="end" font-family="sans-serif">{pct}</text>"#,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            palette.axis.to_hex()
        );
    }

    // Left and bottom spines.
    let axis = palette.axis.to_hex();
    let bottom = MARGIN_TOP + plot_h;
    let _ = writeln!(
        svg,
        r#"  <path d="M{MARGIN_LEFT},{MARGIN_TOP} L{MARGIN_LEFT},{bottom} L{},{bottom}" fill="none" stroke="{axis}"/>"#,
        WIDTH - MARGIN_RIGHT
    );

    let skip = series.len().saturating_sub(capacity);
    let points = series
        .iter()
        .skip(skip)
        .enumerate()
        .map(|(i, v)| format!("{:.1},{:.1}", x_of(i), y_of(*v)))
        .collect::<Vec<_>>()
        .join(" ");
    if !points.is_empty() {
        let _ = writeln!(
            svg,
            r#"  <polyline points="{points}" fill="none" stroke="{}" stroke-width="3" stroke-opacity="0.9" stroke-linejoin="round"/>"#,
            palette.accent.to_hex()
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the chart to `target`. A directory target gets a timestamped file name.
/// Returns the path actually written.
pub fn export_svg(
    series: &[f64],
    capacity: usize,
    palette: &Palette,
    target: &Path,
) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(default_file_name(Local::now()))
    } else {
        target.to_path_buf()
    };

    std::fs::write(&path, render_svg(series, capacity, palette))
        .map_err(|e| TrackerError::Export(format!("cannot write '{}': {e}", path.display())))?;

    tracing::info!("Graph saved as {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_is_timestamped() {
        let when = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(default_file_name(when), "memory_usage_20260304_050607.svg");
    }

    #[test]
    fn svg_uses_palette_and_series() {
        let svg = render_svg(&[0.0, 100.0], 30, &Palette::DARK);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(&Palette::DARK.accent.to_hex()));
        assert!(svg.contains(&Palette::DARK.plot_background.to_hex()));
        assert!(svg.contains("Memory Usage (Last 30 samples)"));
        assert!(svg.contains(r#"points="50.0,270.0 71.0,45.0""#), "{svg}");
    }

    #[test]
    fn empty_series_has_no_line() {
        let svg = render_svg(&[], 30, &Palette::LIGHT);
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn export_into_directory_picks_a_name() {
        let dir = std::env::temp_dir().join(format!("memtrack-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = export_svg(&[12.0, 34.0], 30, &Palette::DARK, &dir).unwrap();
        assert!(path.starts_with(&dir));
        assert!(path.extension().is_some_and(|e| e == "svg"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<polyline"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn export_to_unwritable_path_fails() {
        let err = export_svg(&[], 30, &Palette::DARK, Path::new("/nonexistent/dir/out.svg"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Export(_)));
    }
}
