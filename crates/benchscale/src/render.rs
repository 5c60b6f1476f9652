// Dweve Benchscale - Benchmark Scaling Reports
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scaling chart rendering.
//!
//! Produces one PNG per benchmark column of the pivot table and one overview
//! PNG overlaying every benchmark. Thread counts missing from a column break
//! the line instead of being interpolated over.

use crate::aggregate::PivotTable;
use crate::error::{ReportError, Result};
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the combined chart.
pub const OVERVIEW_FILE: &str = "overview_scaling.png";

/// Title of the combined chart.
pub const OVERVIEW_TITLE: &str = "Scaling behavior";

/// X axis label.
pub const X_LABEL: &str = "Threads";

/// Y axis label.
pub const Y_LABEL: &str = "Avg time (s)";

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 20;
const LABEL_FONT_SIZE: u32 = 14;
const MARKER_SIZE: u32 = 4;
const LINE_WIDTH: u32 = 2;

/// Series colors, cycled when there are more benchmarks than entries.
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

fn series_color(index: usize) -> RGBColor {
    COLORS[index % COLORS.len()]
}

/// Chart file name for a benchmark: slashes become underscores.
///
/// # Examples
///
/// ```
/// use benchscale::render::chart_file_name;
///
/// assert_eq!(chart_file_name("BM_Put/10000"), "BM_Put_10000_scaling.png");
/// ```
pub fn chart_file_name(benchmark: &str) -> String {
    format!("{}_scaling.png", benchmark.replace('/', "_"))
}

/// Paths of the charts written by [`render_charts`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedCharts {
    /// One chart per benchmark, in column order.
    pub benchmarks: Vec<PathBuf>,
    /// The combined chart.
    pub overview: PathBuf,
}

impl RenderedCharts {
    /// Every written file, overview last.
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        self.benchmarks
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.overview.as_path()))
    }
}

/// A curve to draw: contiguous runs of measured points.
struct Curve<'a> {
    label: &'a str,
    color: RGBColor,
    segments: Vec<Vec<(f64, f64)>>,
}

impl Curve<'_> {
    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.segments.iter().flatten().copied()
    }
}

/// Splits a column aligned to the thread axis into runs without gaps.
fn segments(column: &[(u64, Option<f64>)]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &(threads, value) in column {
        match value.filter(|v| v.is_finite()) {
            Some(v) => current.push((threads as f64, v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Widens `[lo, hi]` by a margin so markers at the edges stay visible.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    if span > 0.0 {
        let pad = span * 0.05;
        (lo - pad)..(hi + pad)
    } else if lo != 0.0 {
        let pad = lo.abs() * 0.1;
        (lo - pad)..(hi + pad)
    } else {
        (lo - 1.0)..(hi + 1.0)
    }
}

/// Axis ranges for a chart. The x axis spans `thread_range`, the full row
/// axis of the pivot table, when given; otherwise the plotted points.
fn axis_ranges(
    curves: &[Curve<'_>],
    thread_range: Option<(u64, u64)>,
) -> (Range<f64>, Range<f64>) {
    let mut x: Option<(f64, f64)> = thread_range.map(|(lo, hi)| (lo as f64, hi as f64));
    let mut y: Option<(f64, f64)> = None;
    for (px, py) in curves.iter().flat_map(|curve| curve.points()) {
        x = Some(x.map_or((px, px), |(lo, hi)| (lo.min(px), hi.max(px))));
        y = Some(y.map_or((py, py), |(lo, hi)| (lo.min(py), hi.max(py))));
    }
    let (x_lo, x_hi) = x.unwrap_or((0.0, 1.0));
    let (y_lo, y_hi) = y.unwrap_or((0.0, 1.0));
    (padded(x_lo, x_hi), padded(y_lo, y_hi))
}

fn format_threads(value: &f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn format_seconds(value: &f64) -> String {
    format!("{:.2e}", value)
}

/// Draws one chart with the given curves and writes it to `path`.
fn draw_chart(
    path: &Path,
    size: (u32, u32),
    title: &str,
    curves: &[Curve<'_>],
    thread_range: Option<(u64, u64)>,
    legend: bool,
) -> Result<()> {
    let fail = |e: &dyn std::fmt::Display| ReportError::render_error(path, e);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let (x_range, y_range) = axis_ranges(curves, thread_range);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, TITLE_FONT_SIZE))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .x_label_formatter(&format_threads)
        .y_label_formatter(&format_seconds)
        .label_style((FONT, LABEL_FONT_SIZE))
        .light_line_style(RGBColor(235, 235, 235).stroke_width(1))
        .draw()
        .map_err(|e| fail(&e))?;

    for curve in curves {
        let color = curve.color;
        for segment in &curve.segments {
            chart
                .draw_series(LineSeries::new(
                    segment.iter().copied(),
                    color.stroke_width(LINE_WIDTH),
                ))
                .map_err(|e| fail(&e))?;
        }

        let markers = chart
            .draw_series(
                curve
                    .points()
                    .map(|point| Circle::new(point, MARKER_SIZE, color.filled())),
            )
            .map_err(|e| fail(&e))?;
        if legend {
            markers.label(curve.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
        }
    }

    if legend && !curves.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT, LABEL_FONT_SIZE))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| fail(&e))?;
    }

    root.present().map_err(|e| fail(&e))?;
    debug!(path = %path.display(), "wrote chart");
    Ok(())
}

/// Renders the per-benchmark charts and the overview into `output_dir`.
///
/// The directory is created if it does not exist yet.
///
/// # Errors
///
/// - [`ReportError::Io`] if the directory cannot be created
/// - [`ReportError::Render`] if drawing or encoding a chart fails
pub fn render_charts(
    pivot: &PivotTable,
    output_dir: &Path,
    size: (u32, u32),
) -> Result<RenderedCharts> {
    fs::create_dir_all(output_dir).map_err(|e| ReportError::io_error(output_dir, e))?;

    let curves: Vec<Curve<'_>> = pivot
        .benchmarks()
        .enumerate()
        .map(|(index, benchmark)| Curve {
            label: benchmark,
            color: series_color(index),
            segments: segments(&pivot.column(benchmark)),
        })
        .collect();
    let thread_range = pivot.thread_range();

    let mut rendered = RenderedCharts::default();
    for curve in &curves {
        let path = output_dir.join(chart_file_name(curve.label));
        let single = Curve {
            label: curve.label,
            color: series_color(0),
            segments: curve.segments.clone(),
        };
        draw_chart(
            &path,
            size,
            curve.label,
            std::slice::from_ref(&single),
            thread_range,
            false,
        )?;
        rendered.benchmarks.push(path);
    }

    if curves.is_empty() {
        warn!("no mean rows to plot, overview will be empty");
    }
    let overview = output_dir.join(OVERVIEW_FILE);
    draw_chart(&overview, size, OVERVIEW_TITLE, &curves, thread_range, true)?;
    rendered.overview = overview;

    info!(
        charts = rendered.benchmarks.len() + 1,
        dir = %output_dir.display(),
        "rendered scaling charts"
    );
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_file_name() {
        assert_eq!(chart_file_name("X"), "X_scaling.png");
        assert_eq!(chart_file_name("BM_Put/10000"), "BM_Put_10000_scaling.png");
        assert_eq!(chart_file_name("a/b/c"), "a_b_c_scaling.png");
    }

    #[test]
    fn test_segments_break_on_gaps() {
        let column = vec![
            (1, Some(1.0)),
            (2, Some(2.0)),
            (4, None),
            (8, Some(8.0)),
        ];
        let runs = segments(&column);
        assert_eq!(runs, vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(8.0, 8.0)]]);
    }

    #[test]
    fn test_segments_skip_non_finite() {
        let column = vec![(1, Some(f64::NAN)), (2, Some(2.0))];
        assert_eq!(segments(&column), vec![vec![(2.0, 2.0)]]);
        assert!(segments(&[]).is_empty());
    }

    #[test]
    fn test_padded_ranges() {
        let range = padded(0.0, 10.0);
        assert!(range.start < 0.0 && range.end > 10.0);

        let range = padded(2.0, 2.0);
        assert!(range.start < 2.0 && range.end > 2.0);

        let range = padded(0.0, 0.0);
        assert_eq!(range, -1.0..1.0);
    }

    #[test]
    fn test_axis_ranges_cover_all_curves() {
        let curves = vec![
            Curve {
                label: "a",
                color: series_color(0),
                segments: vec![vec![(1.0, 0.5), (2.0, 0.25)]],
            },
            Curve {
                label: "b",
                color: series_color(1),
                segments: vec![vec![(8.0, 4.0)]],
            },
        ];
        let (x, y) = axis_ranges(&curves, None);
        assert!(x.start < 1.0 && x.end > 8.0);
        assert!(y.start < 0.25 && y.end > 4.0);
    }

    #[test]
    fn test_x_axis_spans_all_thread_counts() {
        let curves = vec![Curve {
            label: "a",
            color: series_color(0),
            segments: vec![vec![(2.0, 0.5), (4.0, 0.25)]],
        }];
        let (x, _) = axis_ranges(&curves, Some((1, 16)));
        assert!(x.start < 1.0 && x.end > 16.0);

        let (x, y) = axis_ranges(&[], Some((1, 8)));
        assert!(x.start < 1.0 && x.end > 8.0);
        assert!(y.start < 0.0 && y.end > 1.0);
    }

    #[test]
    fn test_format_threads() {
        assert_eq!(format_threads(&4.0), "4");
        assert_eq!(format_threads(&1.5), "1.5");
    }

    #[test]
    fn test_colors_cycle() {
        assert_eq!(series_color(0).rgb(), series_color(COLORS.len()).rgb());
    }
}
