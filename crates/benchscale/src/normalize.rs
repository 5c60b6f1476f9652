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

//! Record normalization.
//!
//! Reduces raw rows to the per-iteration means the harness reports, splits
//! each label into a benchmark name and a thread count, and converts times to
//! seconds.

use crate::error::{ReportError, Result};
use crate::ingest::{ResultRecord, REAL_TIME_COLUMN};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;
use tracing::{info, warn};

/// Suffix marking a row that holds the mean over repetitions.
pub const MEAN_SUFFIX: &str = "_mean";

/// Thread count assumed for labels without a `threads:N` marker.
pub const DEFAULT_THREADS: u64 = 1;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

static THREADS_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"threads:([0-9]+)").expect("valid threads regex"));

static THREADS_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/threads:[0-9]+").expect("valid threads segment regex"));

static MEAN_TRAILER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_mean$").expect("valid mean suffix regex"));

/// Conversion applied to every `real_time` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScale {
    /// Values are nanoseconds and are divided by 1e9.
    Nanoseconds,
    /// Values are taken as already being seconds.
    Unchanged,
}

impl TimeScale {
    /// Decides the conversion from the first row of the combined record set.
    ///
    /// Only that row is inspected; its unit is applied to every row, whatever
    /// file the other rows came from.
    pub fn detect(records: &[ResultRecord]) -> Self {
        match records.first().and_then(|r| r.time_unit.as_deref()) {
            Some("ns") => TimeScale::Nanoseconds,
            _ => TimeScale::Unchanged,
        }
    }

    /// Converts a raw value to seconds.
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            TimeScale::Nanoseconds => value / NANOS_PER_SECOND,
            TimeScale::Unchanged => value,
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeScale::Nanoseconds => write!(f, "ns -> s"),
            TimeScale::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A mean row with its benchmark name, thread count, and time in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Original label.
    pub name: String,
    /// Label without the thread marker and mean suffix.
    pub benchmark: String,
    /// Thread count the measurement was taken with.
    pub threads: u64,
    /// Mean wall-clock time in seconds, `None` if the row carried no time.
    pub real_time_s: Option<f64>,
    /// Base name of the originating file.
    pub source_file: String,
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Mean rows in input order.
    pub records: Vec<NormalizedRecord>,
    /// Conversion applied to all rows.
    pub time_scale: TimeScale,
    /// Rows dropped because they are not means (medians, stddevs, plain runs).
    pub non_mean_rows: usize,
    /// Mean rows kept without a time because their `real_time` cell was
    /// missing. They still contribute their (benchmark, threads) key.
    pub missing_time_rows: usize,
}

/// Extracts the thread count from a benchmark label.
///
/// The first `threads:<digits>` occurrence wins; labels without one run on
/// [`DEFAULT_THREADS`].
///
/// # Examples
///
/// ```
/// use benchscale::normalize::parse_threads;
///
/// assert_eq!(parse_threads("BM_Insert/threads:4_mean"), Ok(4));
/// assert_eq!(parse_threads("BM_Insert_mean"), Ok(1));
/// ```
pub fn parse_threads(name: &str) -> std::result::Result<u64, ParseIntError> {
    match THREADS_MARKER.captures(name) {
        Some(caps) => caps[1].parse(),
        None => Ok(DEFAULT_THREADS),
    }
}

/// Derives the canonical benchmark name from a label.
///
/// Every `/threads:<digits>` segment is removed, then a trailing `_mean`.
///
/// # Examples
///
/// ```
/// use benchscale::normalize::benchmark_name;
///
/// assert_eq!(benchmark_name("BM_Insert/threads:4_mean"), "BM_Insert");
/// assert_eq!(benchmark_name("BM_Put/10000_mean"), "BM_Put/10000");
/// ```
pub fn benchmark_name(name: &str) -> String {
    let without_threads = THREADS_SEGMENT.replace_all(name, "");
    MEAN_TRAILER.replace(&without_threads, "").into_owned()
}

/// Whether a label denotes a mean row.
pub fn is_mean_row(name: &str) -> bool {
    name.ends_with(MEAN_SUFFIX)
}

/// Normalizes the combined record set.
///
/// # Errors
///
/// Returns [`ReportError::InvalidValue`] if a thread marker does not fit in
/// a `u64`.
pub fn normalize(records: &[ResultRecord]) -> Result<Normalized> {
    let time_scale = TimeScale::detect(records);
    let mut normalized = Vec::new();
    let mut non_mean_rows = 0;
    let mut missing_time_rows = 0;

    for record in records {
        if !is_mean_row(&record.name) {
            non_mean_rows += 1;
            continue;
        }

        if record.real_time.is_none() {
            warn!(
                name = %record.name,
                file = %record.source_file,
                line = record.line,
                "mean row without {}",
                REAL_TIME_COLUMN
            );
            missing_time_rows += 1;
        }

        let threads = parse_threads(&record.name).map_err(|_| ReportError::InvalidValue {
            path: PathBuf::from(&record.source_file),
            line: record.line,
            column: "name".to_string(),
            value: record.name.clone(),
        })?;

        normalized.push(NormalizedRecord {
            name: record.name.clone(),
            benchmark: benchmark_name(&record.name),
            threads,
            real_time_s: record.real_time.map(|value| time_scale.to_seconds(value)),
            source_file: record.source_file.clone(),
        });
    }

    info!(
        mean_rows = normalized.len(),
        dropped = non_mean_rows,
        time_scale = %time_scale,
        "normalized records"
    );

    Ok(Normalized {
        records: normalized,
        time_scale,
        non_mean_rows,
        missing_time_rows,
    })
}
