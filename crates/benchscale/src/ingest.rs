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

//! Result file ingestion.
//!
//! Each result file is comma-delimited text with a header row, as written by
//! Google Benchmark's CSV reporter. Only `name` and `real_time` are required;
//! `time_unit` is read when present and every other column is carried along
//! untouched.

use crate::error::{ReportError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Column holding the benchmark label.
pub const NAME_COLUMN: &str = "name";

/// Column holding the wall-clock measurement.
pub const REAL_TIME_COLUMN: &str = "real_time";

/// Column holding the unit of `real_time`.
pub const TIME_UNIT_COLUMN: &str = "time_unit";

/// Cell values read as missing, in addition to the empty cell.
///
/// Matches the default NA markers of common dataframe CSV readers, so a
/// `nan` mean row counts as "no measurement" rather than as a value.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell denotes a missing value.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// One row of raw benchmark output.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Benchmark label, possibly encoding parameters such as `threads:4`.
    pub name: String,
    /// Measured wall-clock time. `None` when the cell is empty, which the
    /// harness emits for benchmarks that reported an error, or holds an NA
    /// marker.
    pub real_time: Option<f64>,
    /// Unit of `real_time`, verbatim, if the file has a non-missing
    /// `time_unit` cell.
    pub time_unit: Option<String>,
    /// Base name of the file the row was read from.
    pub source_file: String,
    /// Line of the row inside its file (1-based, header is line 1).
    pub line: u64,
    /// Remaining columns in header order.
    pub extra: Vec<(String, String)>,
}

impl ResultRecord {
    /// Looks up a column that is not modelled as a field.
    pub fn extra(&self, column: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }
}

/// Positions of the known columns inside a header row.
struct ColumnIndex {
    name: usize,
    real_time: usize,
    time_unit: Option<usize>,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord, path: &Path) -> Result<Self> {
        let find = |column: &str| headers.iter().position(|h| h == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| ReportError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
        };

        Ok(Self {
            name: require(NAME_COLUMN)?,
            real_time: require(REAL_TIME_COLUMN)?,
            time_unit: find(TIME_UNIT_COLUMN),
        })
    }
}

/// Parses result records from any reader.
///
/// `path` is only used for `source_file` and error context.
///
/// # Errors
///
/// - [`ReportError::Csv`] for malformed input or a row wider than the header
/// - [`ReportError::MissingColumn`] if `name` or `real_time` is absent
/// - [`ReportError::InvalidValue`] if `real_time` is not a number
///
/// # Examples
///
/// ```
/// use benchscale::ingest::parse_results;
/// use std::path::Path;
///
/// let data = "name,real_time,time_unit\nBM_Put/threads:2_mean,150,ns\n";
/// let records = parse_results(data.as_bytes(), Path::new("results/bench_put.csv")).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].source_file, "bench_put.csv");
/// assert_eq!(records[0].real_time, Some(150.0));
/// ```
pub fn parse_results<R: Read>(reader: R, path: &Path) -> Result<Vec<ResultRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ReportError::csv_error(path, &e))?
        .clone();
    let columns = ColumnIndex::locate(&headers, path)?;
    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(|e| ReportError::csv_error(path, &e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() > headers.len() {
            return Err(ReportError::Csv {
                path: path.to_path_buf(),
                line,
                message: format!(
                    "expected at most {} fields, found {}",
                    headers.len(),
                    row.len()
                ),
            });
        }

        let cell = |index: usize| row.get(index).unwrap_or("");

        let raw_time = cell(columns.real_time);
        let real_time = if is_missing(raw_time) || raw_time.trim().is_empty() {
            None
        } else {
            Some(
                raw_time
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ReportError::InvalidValue {
                        path: path.to_path_buf(),
                        line,
                        column: REAL_TIME_COLUMN.to_string(),
                        value: raw_time.to_string(),
                    })?,
            )
        };

        let time_unit = columns
            .time_unit
            .map(cell)
            .filter(|unit| !is_missing(unit))
            .map(str::to_string);

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                *index != columns.name
                    && *index != columns.real_time
                    && Some(*index) != columns.time_unit
            })
            .map(|(index, header)| (header.to_string(), cell(index).to_string()))
            .collect();

        records.push(ResultRecord {
            name: cell(columns.name).to_string(),
            real_time,
            time_unit,
            source_file: source_file.clone(),
            line,
            extra,
        });
    }

    debug!(file = %source_file, rows = records.len(), "parsed result file");
    Ok(records)
}

/// Reads a single result file from disk.
pub fn read_results_file(path: &Path) -> Result<Vec<ResultRecord>> {
    let file = File::open(path).map_err(|e| ReportError::io_error(path, e))?;
    parse_results(file, path)
}

/// Reads every discovered file and concatenates the rows.
///
/// Files are consumed in the order given; each is opened, read to the end,
/// and closed before the next one is opened.
pub fn ingest(paths: &[PathBuf]) -> Result<Vec<ResultRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(read_results_file(path)?);
    }
    info!(files = paths.len(), records = records.len(), "ingested result files");
    Ok(records)
}
