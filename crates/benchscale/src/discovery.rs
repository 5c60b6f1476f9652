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

//! Result file discovery.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use std::path::PathBuf;
use tracing::debug;

/// Finds every result file matching the configured pattern.
///
/// Paths are returned in lexicographic order, which fixes the order records
/// are concatenated in during ingestion.
///
/// # Errors
///
/// - [`ReportError::Config`] if the pattern is not a valid glob
/// - [`ReportError::Io`] if a matching entry cannot be inspected
/// - [`ReportError::NoInput`] if nothing matches
pub fn discover(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;

    let expression = config.glob_expression();
    let entries = glob::glob(&expression).map_err(|e| ReportError::Config {
        parameter: "pattern".to_string(),
        reason: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            ReportError::io_error(path, std::io::Error::from(e))
        })?;
        if path.is_file() {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-file match");
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(ReportError::NoInput {
            dir: config.results_dir.clone(),
        });
    }

    debug!(count = paths.len(), pattern = %expression, "discovered result files");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_sorted_matches_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["bench_b.csv", "bench_a.csv", "other.csv", "bench_c.txt"] {
            fs::write(dir.path().join(name), "name,real_time\n").unwrap();
        }
        fs::create_dir(dir.path().join("bench_dir.csv")).unwrap();

        let config = ReportConfig::new(dir.path());
        let paths = discover(&config).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["bench_a.csv", "bench_b.csv"]);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new(dir.path());
        let err = discover(&config).unwrap_err();
        assert_eq!(
            err,
            ReportError::NoInput {
                dir: dir.path().to_path_buf()
            }
        );
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new(dir.path().join("does-not-exist"));
        assert!(matches!(
            discover(&config),
            Err(ReportError::NoInput { .. })
        ));
    }

    #[test]
    fn test_discover_custom_pattern() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("run_1.csv"), "").unwrap();
        fs::write(dir.path().join("bench_1.csv"), "").unwrap();

        let config = ReportConfig::new(dir.path()).with_pattern("run_*.csv");
        let paths = discover(&config).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("run_1.csv"));
    }
}
