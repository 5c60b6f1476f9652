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

//! Error types for scaling report generation.
//!
//! Every stage of the pipeline returns [`Result<T>`]. None of the variants is
//! recoverable inside a run: the first error aborts the report and is surfaced
//! to the caller with the file, line, or parameter that caused it.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Process exit status used when no input files were discovered.
pub const EXIT_NO_INPUT: u8 = 1;

/// Process exit status used for every other failure.
pub const EXIT_FAILURE: u8 = 2;

/// Errors that can occur while building a scaling report.
///
/// # Examples
///
/// ```
/// use benchscale::ReportError;
///
/// let err = ReportError::MissingColumn {
///     path: "bench_a.csv".into(),
///     column: "real_time".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Missing required column 'real_time' in 'bench_a.csv'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// No result file matched the discovery pattern.
    #[error("No CSV files found in {}/", dir.display())]
    NoInput {
        /// Directory that was searched
        dir: PathBuf,
    },

    /// Invalid configuration parameter.
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    Config {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// I/O operation failed (directory scan, file read, or directory creation).
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A result file is not well-formed delimited text.
    #[error("CSV parse error in '{}' at line {line}: {message}", path.display())]
    Csv {
        /// File being parsed
        path: PathBuf,
        /// Line number where the error occurred (1-based, header is line 1)
        line: u64,
        /// Parser message
        message: String,
    },

    /// A result file lacks a column the pipeline depends on.
    #[error("Missing required column '{column}' in '{}'", path.display())]
    MissingColumn {
        /// File being parsed
        path: PathBuf,
        /// Name of the absent column
        column: String,
    },

    /// A cell could not be converted to the expected type.
    #[error("Invalid value '{value}' for column '{column}' in '{}' at line {line}", path.display())]
    InvalidValue {
        /// File the record came from
        path: PathBuf,
        /// Line number of the record (1-based, header is line 1)
        line: u64,
        /// Column holding the value
        column: String,
        /// The offending value
        value: String,
    },

    /// Drawing or encoding a chart failed.
    #[error("Failed to render chart '{}': {message}", path.display())]
    Render {
        /// Image file being produced
        path: PathBuf,
        /// Backend message
        message: String,
    },

    /// Writing a pivot export failed.
    #[error("Failed to export pivot table to '{}': {message}", path.display())]
    Export {
        /// Export destination
        path: PathBuf,
        /// Serializer message
        message: String,
    },
}

impl ReportError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a CSV error, taking the line number from the parser position
    /// when one is available.
    pub fn csv_error(path: &Path, source: &csv::Error) -> Self {
        let line = source.position().map(|p| p.line()).unwrap_or(0);
        Self::Csv {
            path: path.to_path_buf(),
            line,
            message: source.to_string(),
        }
    }

    /// Create a render error for the given output file.
    pub fn render_error(path: &Path, message: impl ToString) -> Self {
        Self::Render {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Process exit status for this error.
    ///
    /// Missing input keeps its own status so callers can tell "nothing to do"
    /// apart from a broken input file.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::NoInput { .. } => EXIT_NO_INPUT,
            _ => EXIT_FAILURE,
        }
    }
}
