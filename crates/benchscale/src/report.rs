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

//! Pipeline entry points.
//!
//! [`build_pivot`] runs discovery, ingestion, normalization, and aggregation.
//! [`run`] adds rendering, the optional exports, and the interactive
//! overview.

use crate::aggregate::PivotTable;
use crate::config::ReportConfig;
use crate::discovery::discover;
use crate::error::Result;
use crate::ingest::ingest;
use crate::normalize::{normalize, TimeScale};
use crate::render::{render_charts, RenderedCharts};
use crate::reporters::export::{write_pivot_csv, write_pivot_json};
use crate::viewer::{self, ShowOutcome};
use std::path::PathBuf;
use tracing::info;

/// Result of the data stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotReport {
    /// Discovered result files, in ingestion order.
    pub files: Vec<PathBuf>,
    /// Rows read across all files.
    pub record_count: usize,
    /// Mean rows that made it into the pivot table.
    pub mean_rows: usize,
    /// Rows dropped because they are not means.
    pub non_mean_rows: usize,
    /// Mean rows kept without a `real_time` value.
    pub missing_time_rows: usize,
    /// Unit conversion applied to every row.
    pub time_scale: TimeScale,
    /// Mean seconds per (benchmark, threads).
    pub pivot: PivotTable,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingReport {
    /// Data stage results.
    pub summary: PivotReport,
    /// Written chart files.
    pub charts: RenderedCharts,
    /// What happened when presenting the overview, if it was requested.
    pub shown: Option<ShowOutcome>,
}

/// Discovers, reads, normalizes, and aggregates the result files.
///
/// # Errors
///
/// Any stage error aborts the run; see [`crate::ReportError`].
pub fn build_pivot(config: &ReportConfig) -> Result<PivotReport> {
    let files = discover(config)?;
    let records = ingest(&files)?;
    let normalized = normalize(&records)?;
    let pivot = PivotTable::from_records(&normalized.records);

    Ok(PivotReport {
        files,
        record_count: records.len(),
        mean_rows: normalized.records.len(),
        non_mean_rows: normalized.non_mean_rows,
        missing_time_rows: normalized.missing_time_rows,
        time_scale: normalized.time_scale,
        pivot,
    })
}

/// Runs the whole report: data stages, charts, exports, and the overview.
///
/// # Example
///
/// ```no_run
/// use benchscale::{run, ReportConfig};
///
/// let report = run(&ReportConfig::default().with_show(false))?;
/// println!("{} benchmarks", report.summary.pivot.benchmark_count());
/// # Ok::<(), benchscale::ReportError>(())
/// ```
pub fn run(config: &ReportConfig) -> Result<ScalingReport> {
    let summary = build_pivot(config)?;
    let charts = render_charts(&summary.pivot, &config.plots_dir(), config.chart_size)?;

    if let Some(path) = &config.pivot_csv {
        write_pivot_csv(&summary.pivot, path)?;
        info!(path = %path.display(), "exported pivot table");
    }
    if let Some(path) = &config.pivot_json {
        write_pivot_json(&summary.pivot, path)?;
        info!(path = %path.display(), "exported pivot table");
    }

    let shown = config.show.then(|| viewer::show(&charts.overview));

    Ok(ScalingReport {
        summary,
        charts,
        shown,
    })
}
