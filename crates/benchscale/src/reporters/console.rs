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

//! Console reporter for scaling results.

use crate::aggregate::PivotTable;
use crate::report::ScalingReport;
use colored::Colorize;
use std::fmt::Write;

const MISSING: &str = "-";

/// Formats the pivot table as aligned text: one row per thread count, one
/// column per benchmark, times in seconds.
///
/// # Examples
///
/// ```
/// use benchscale::aggregate::PivotTable;
/// use benchscale::reporters::format_pivot;
///
/// assert_eq!(format_pivot(&PivotTable::default()), "(no mean rows)\n");
/// ```
pub fn format_pivot(pivot: &PivotTable) -> String {
    if pivot.is_empty() {
        return "(no mean rows)\n".to_string();
    }

    let header: Vec<&str> = std::iter::once("threads").chain(pivot.benchmarks()).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for threads in pivot.threads() {
        let mut row = vec![threads.to_string()];
        for benchmark in pivot.benchmarks() {
            row.push(
                pivot
                    .get(benchmark, threads)
                    .map(|v| format!("{:.3e}", v))
                    .unwrap_or_else(|| MISSING.to_string()),
            );
        }
        rows.push(row);
    }

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    write_row(&mut out, header.iter().copied(), &widths);
    for row in &rows {
        write_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Prints the run summary and the pivot table to stdout.
pub fn print_summary(report: &ScalingReport) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "SCALING REPORT".bright_blue().bold());
    println!("{}", "=".repeat(60));
    println!("Files: {}", report.summary.files.len());
    println!(
        "Records: {} ({} mean, {} other)",
        report.summary.record_count, report.summary.mean_rows, report.summary.non_mean_rows
    );
    if report.summary.missing_time_rows > 0 {
        println!(
            "{} {} mean rows without real_time",
            "Warning:".yellow().bold(),
            report.summary.missing_time_rows
        );
    }
    println!("Time scale: {}", report.summary.time_scale);

    println!("\n{}", "Avg time (s):".bold());
    print!("{}", format_pivot(&report.summary.pivot));

    println!("\n{}", "Charts:".bold());
    for path in report.charts.all() {
        println!("  {}", path.display());
    }
    println!("{}\n", "=".repeat(60));
}
