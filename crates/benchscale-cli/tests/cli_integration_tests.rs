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

//! CLI integration tests for plot-bench

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Test helper to create a plot-bench command running inside `dir`
fn plot_bench(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("plot-bench").expect("Failed to find plot-bench binary");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

// Test helper to create a workspace with benchmarks/results populated
fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let results = dir.path().join("benchmarks").join("results");
    fs::create_dir_all(&results).expect("Failed to create results dir");
    for (name, content) in files {
        fs::write(results.join(name), content).expect("Failed to write result file");
    }
    dir
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    let dir = workspace(&[]);
    plot_bench(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--results-dir"));
}

#[test]
fn test_version_output() {
    let dir = workspace(&[]);
    plot_bench(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("plot-bench"));
}

// ===== Missing Input Tests =====

#[test]
fn test_no_input_files() {
    let dir = workspace(&[]);
    plot_bench(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No CSV files found in benchmarks/results/"));

    assert!(!dir.path().join("benchmarks/results/plots").exists());
}

#[test]
fn test_missing_results_directory() {
    let dir = tempfile::tempdir().unwrap();
    plot_bench(dir.path()).assert().code(1);
}

// ===== Report Tests =====

#[test]
fn test_default_layout_report() {
    let dir = workspace(&[
        (
            "bench_a.csv",
            "name,real_time,time_unit\nX/threads:1_mean,100,ns\nX/threads:1_median,90,ns\n",
        ),
        ("bench_b.csv", "name,real_time,time_unit\nX/threads:2_mean,220,ns\n"),
    ]);

    plot_bench(dir.path())
        .arg("--no-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("SCALING REPORT"))
        .stdout(predicate::str::contains("1.000e-7"))
        .stdout(predicate::str::contains("2.200e-7"))
        .stdout(predicate::str::contains("overview_scaling.png"));

    let plots = dir.path().join("benchmarks/results/plots");
    assert!(plots.join("X_scaling.png").is_file());
    assert!(plots.join("overview_scaling.png").is_file());
    assert_eq!(fs::read_dir(&plots).unwrap().count(), 2);
}

#[test]
fn test_quiet_suppresses_summary() {
    let dir = workspace(&[("bench_a.csv", "name,real_time\nX_mean,1\n")]);
    plot_bench(dir.path())
        .args(["--no-show", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_custom_directories_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("runs");
    fs::create_dir_all(&results).unwrap();
    fs::write(
        results.join("run_1.csv"),
        "name,real_time,time_unit\nBM_Get/threads:4_mean,400,ns\n",
    )
    .unwrap();

    plot_bench(dir.path())
        .args([
            "--results-dir",
            "runs",
            "--pattern",
            "run_*.csv",
            "--output-dir",
            "charts",
            "--pivot-csv",
            "pivot.csv",
            "--pivot-json",
            "pivot.json",
            "--no-show",
            "--quiet",
        ])
        .assert()
        .success();

    assert!(dir.path().join("charts/BM_Get_scaling.png").is_file());
    assert!(dir.path().join("charts/overview_scaling.png").is_file());
    let csv = fs::read_to_string(dir.path().join("pivot.csv")).unwrap();
    assert!(csv.contains("BM_Get,4,"));
    assert!(dir.path().join("pivot.json").is_file());
}

// ===== Error Tests =====

#[test]
fn test_malformed_input_fails() {
    let dir = workspace(&[("bench_a.csv", "name,real_time\nX_mean,not-a-number\n")]);
    plot_bench(dir.path())
        .arg("--no-show")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("not-a-number"));
}

#[test]
fn test_missing_column_fails() {
    let dir = workspace(&[("bench_a.csv", "label,real_time\nX_mean,1\n")]);
    plot_bench(dir.path())
        .arg("--no-show")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing required column 'name'"));
}

#[test]
fn test_invalid_pattern_fails() {
    let dir = workspace(&[("bench_a.csv", "name,real_time\nX_mean,1\n")]);
    plot_bench(dir.path())
        .args(["--pattern", "bench_[.csv", "--no-show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pattern"));
}
