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

//! Aggregation of normalized records into the scaling pivot table.

use crate::normalize::NormalizedRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// One populated cell of the pivot table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotCell {
    /// Benchmark name (column).
    pub benchmark: String,
    /// Thread count (row).
    pub threads: u64,
    /// Mean time in seconds.
    pub real_time_s: f64,
}

/// Mean time per (benchmark, threads), laid out as a threads x benchmark table.
///
/// Rows are thread counts in ascending order, columns are benchmark names in
/// lexicographic order. Combinations that never occurred are absent rather
/// than zero. A combination whose rows all lack a finite time keeps its place
/// on both axes but has no cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    columns: BTreeMap<String, BTreeMap<u64, f64>>,
    threads: BTreeSet<u64>,
}

impl PivotTable {
    /// Groups records by (benchmark, threads) and averages `real_time_s`.
    ///
    /// Missing and non-finite times are left out of both the sum and the
    /// count. Sums are accumulated in input order, so identical input always
    /// yields bit-identical means.
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let mut groups: BTreeMap<(&str, u64), (f64, usize)> = BTreeMap::new();
        for record in records {
            let entry = groups
                .entry((record.benchmark.as_str(), record.threads))
                .or_insert((0.0, 0));
            if let Some(value) = record.real_time_s.filter(|v| v.is_finite()) {
                entry.0 += value;
                entry.1 += 1;
            }
        }

        let mut table = PivotTable::default();
        for ((benchmark, threads), (sum, count)) in groups {
            let column = table.columns.entry(benchmark.to_string()).or_default();
            if count > 0 {
                column.insert(threads, sum / count as f64);
            }
            table.threads.insert(threads);
        }

        info!(
            benchmarks = table.columns.len(),
            cells = table.cell_count(),
            "aggregated pivot table"
        );
        table
    }

    /// Benchmark names in column order.
    pub fn benchmarks(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Thread counts in row order.
    pub fn threads(&self) -> impl Iterator<Item = u64> + '_ {
        self.threads.iter().copied()
    }

    /// Mean time for one cell, if that combination was measured.
    pub fn get(&self, benchmark: &str, threads: u64) -> Option<f64> {
        self.columns.get(benchmark)?.get(&threads).copied()
    }

    /// Smallest and largest thread count on the row axis.
    pub fn thread_range(&self) -> Option<(u64, u64)> {
        Some((*self.threads.first()?, *self.threads.last()?))
    }

    /// Column values aligned to the full thread axis, `None` where absent.
    pub fn column(&self, benchmark: &str) -> Vec<(u64, Option<f64>)> {
        self.threads()
            .map(|threads| (threads, self.get(benchmark, threads)))
            .collect()
    }

    /// All populated cells, column by column.
    pub fn cells(&self) -> Vec<PivotCell> {
        self.columns
            .iter()
            .flat_map(|(benchmark, column)| {
                column.iter().map(move |(&threads, &real_time_s)| PivotCell {
                    benchmark: benchmark.clone(),
                    threads,
                    real_time_s,
                })
            })
            .collect()
    }

    /// Number of benchmark columns.
    pub fn benchmark_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of populated cells.
    pub fn cell_count(&self) -> usize {
        self.columns.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no benchmark column at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(benchmark: &str, threads: u64, seconds: f64) -> NormalizedRecord {
        rec_opt(benchmark, threads, Some(seconds))
    }

    fn rec_opt(benchmark: &str, threads: u64, seconds: Option<f64>) -> NormalizedRecord {
        NormalizedRecord {
            name: format!("{}/threads:{}_mean", benchmark, threads),
            benchmark: benchmark.to_string(),
            threads,
            real_time_s: seconds,
            source_file: "bench_test.csv".to_string(),
        }
    }

    #[test]
    fn test_mean_per_group() {
        let records = vec![rec("X", 1, 1.0), rec("X", 1, 3.0), rec("X", 2, 5.0)];
        let pivot = PivotTable::from_records(&records);
        assert_eq!(pivot.get("X", 1), Some(2.0));
        assert_eq!(pivot.get("X", 2), Some(5.0));
        assert_eq!(pivot.cell_count(), 2);
    }

    #[test]
    fn test_axes_are_sorted() {
        let records = vec![
            rec("b_bench", 8, 1.0),
            rec("a_bench", 2, 1.0),
            rec("B_bench", 1, 1.0),
            rec("a_bench", 16, 1.0),
        ];
        let pivot = PivotTable::from_records(&records);
        let names: Vec<_> = pivot.benchmarks().collect();
        assert_eq!(names, vec!["B_bench", "a_bench", "b_bench"]);
        let threads: Vec<_> = pivot.threads().collect();
        assert_eq!(threads, vec![1, 2, 8, 16]);
    }

    #[test]
    fn test_missing_cells_are_absent() {
        let records = vec![rec("X", 1, 1.0), rec("Y", 4, 2.0)];
        let pivot = PivotTable::from_records(&records);
        assert_eq!(pivot.get("X", 4), None);
        assert_eq!(pivot.get("Y", 1), None);
        assert_eq!(pivot.column("X"), vec![(1, Some(1.0)), (4, None)]);
        assert_eq!(pivot.column("Y"), vec![(1, None), (4, Some(2.0))]);
        assert_eq!(pivot.cell_count(), 2);
    }

    #[test]
    fn test_cells_and_thread_range() {
        let records = vec![rec("X", 2, 0.5), rec("X", 1, 0.25), rec("Y", 1, 4.0)];
        let pivot = PivotTable::from_records(&records);
        let cells = pivot.cells();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].benchmark, "X");
        assert_eq!(cells[0].threads, 1);
        assert_eq!(pivot.thread_range(), Some((1, 2)));
    }

    #[test]
    fn test_empty_table() {
        let pivot = PivotTable::from_records(&[]);
        assert!(pivot.is_empty());
        assert_eq!(pivot.thread_range(), None);
        assert!(pivot.column("X").is_empty());
    }

    #[test]
    fn test_non_finite_times_are_skipped() {
        let records = vec![
            rec("X", 1, f64::NAN),
            rec("X", 1, 2.0),
            rec("X", 2, f64::INFINITY),
            rec_opt("X", 2, None),
            rec_opt("X", 2, Some(4.0)),
        ];
        let pivot = PivotTable::from_records(&records);
        assert_eq!(pivot.get("X", 1), Some(2.0));
        assert_eq!(pivot.get("X", 2), Some(4.0));
    }

    #[test]
    fn test_timeless_group_keeps_axes() {
        let records = vec![rec("X", 1, 1.0), rec_opt("Y", 2, None)];
        let pivot = PivotTable::from_records(&records);
        assert_eq!(pivot.benchmarks().collect::<Vec<_>>(), vec!["X", "Y"]);
        assert_eq!(pivot.threads().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(pivot.get("Y", 2), None);
        assert_eq!(pivot.column("Y"), vec![(1, None), (2, None)]);
        assert_eq!(pivot.benchmark_count(), 2);
        assert_eq!(pivot.cell_count(), 1);
        assert!(!pivot.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let records = vec![rec("X", 1, 0.1), rec("X", 1, 0.2), rec("X", 1, 0.3)];
        let first = PivotTable::from_records(&records);
        let second = PivotTable::from_records(&records);
        assert_eq!(first, second);
    }
}
