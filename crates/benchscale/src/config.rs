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

//! Report configuration.
//!
//! Defaults reproduce the fixed layout the benchmark harness writes to:
//! results in `benchmarks/results/bench_*.csv`, charts in
//! `benchmarks/results/plots/`.

use crate::error::{ReportError, Result};
use std::path::{Path, PathBuf};

/// Default directory scanned for result files.
pub const DEFAULT_RESULTS_DIR: &str = "benchmarks/results";

/// Default file name pattern for result files.
pub const DEFAULT_PATTERN: &str = "bench_*.csv";

/// Subdirectory of the results directory that receives the charts.
pub const PLOTS_SUBDIR: &str = "plots";

/// Default chart size in pixels.
pub const DEFAULT_CHART_SIZE: (u32, u32) = (640, 480);

/// Configuration for a scaling report run.
///
/// # Example
///
/// ```no_run
/// use benchscale::ReportConfig;
///
/// let config = ReportConfig::default()
///     .with_results_dir("target/bench-results")
///     .with_show(false);
/// assert_eq!(
///     config.plots_dir(),
///     std::path::PathBuf::from("target/bench-results/plots")
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Directory scanned for result files.
    pub results_dir: PathBuf,
    /// File name glob matched inside `results_dir`.
    pub pattern: String,
    /// Chart output directory. `None` means `<results_dir>/plots`.
    pub output_dir: Option<PathBuf>,
    /// Chart width and height in pixels.
    pub chart_size: (u32, u32),
    /// Open the overview chart in an image viewer after rendering.
    pub show: bool,
    /// Optional long-form CSV export of the pivot table.
    pub pivot_csv: Option<PathBuf>,
    /// Optional JSON export of the pivot table.
    pub pivot_json: Option<PathBuf>,
}

impl ReportConfig {
    /// Creates a configuration rooted at the given results directory.
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            pattern: DEFAULT_PATTERN.to_string(),
            output_dir: None,
            chart_size: DEFAULT_CHART_SIZE,
            show: true,
            pivot_csv: None,
            pivot_json: None,
        }
    }

    /// Sets the results directory.
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Sets the file name pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets an explicit chart output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the chart size in pixels.
    pub fn with_chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_size = (width, height);
        self
    }

    /// Enables or disables the interactive overview.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Requests a CSV export of the pivot table.
    pub fn with_pivot_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.pivot_csv = Some(path.into());
        self
    }

    /// Requests a JSON export of the pivot table.
    pub fn with_pivot_json(mut self, path: impl Into<PathBuf>) -> Self {
        self.pivot_json = Some(path.into());
        self
    }

    /// Directory the charts are written to.
    pub fn plots_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self.results_dir.join(PLOTS_SUBDIR),
        }
    }

    /// Full glob expression for discovery: `<results_dir>/<pattern>`.
    pub fn glob_expression(&self) -> String {
        let dir = glob::Pattern::escape(&self.results_dir.to_string_lossy());
        Path::new(&dir).join(&self.pattern).to_string_lossy().into_owned()
    }

    /// Checks the parameters before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.pattern.is_empty() {
            return Err(ReportError::Config {
                parameter: "pattern".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.pattern.contains('/') || self.pattern.contains('\\') {
            return Err(ReportError::Config {
                parameter: "pattern".to_string(),
                reason: "must be a file name pattern without directory separators".to_string(),
            });
        }
        if let Err(e) = glob::Pattern::new(&self.pattern) {
            return Err(ReportError::Config {
                parameter: "pattern".to_string(),
                reason: e.to_string(),
            });
        }
        let (width, height) = self.chart_size;
        if width == 0 || height == 0 {
            return Err(ReportError::Config {
                parameter: "chart_size".to_string(),
                reason: format!("must be positive, got {}x{}", width, height),
            });
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.results_dir, PathBuf::from(DEFAULT_RESULTS_DIR));
        assert_eq!(config.pattern, DEFAULT_PATTERN);
        assert_eq!(config.plots_dir(), PathBuf::from("benchmarks/results/plots"));
        assert!(config.show);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_output_dir() {
        let config = ReportConfig::default().with_output_dir("out/charts");
        assert_eq!(config.plots_dir(), PathBuf::from("out/charts"));
    }

    #[test]
    fn test_glob_expression() {
        let config = ReportConfig::new("results");
        assert_eq!(
            PathBuf::from(config.glob_expression()),
            PathBuf::from("results").join("bench_*.csv")
        );
    }

    #[test]
    fn test_glob_expression_escapes_directory() {
        let config = ReportConfig::new("runs[1]");
        assert!(config.glob_expression().starts_with("runs[[]1[]]"));
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let config = ReportConfig::default().with_pattern("bench_[.csv");
        assert!(matches!(
            config.validate(),
            Err(ReportError::Config { ref parameter, .. }) if parameter == "pattern"
        ));

        let config = ReportConfig::default().with_pattern("sub/bench_*.csv");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_chart_size() {
        let config = ReportConfig::default().with_chart_size(0, 480);
        assert!(config.validate().is_err());
    }
}
