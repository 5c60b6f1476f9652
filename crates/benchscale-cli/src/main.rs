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

//! Benchscale command line interface.
//!
//! # Usage
//!
//! ```bash
//! # Aggregate benchmarks/results/bench_*.csv into benchmarks/results/plots/
//! plot-bench
//!
//! # Render somewhere else without opening a viewer
//! plot-bench --results-dir target/results --output-dir target/plots --no-show
//!
//! # Run with debug logging
//! RUST_LOG=benchscale=debug plot-bench
//! ```

use benchscale::config::{DEFAULT_CHART_SIZE, DEFAULT_PATTERN, DEFAULT_RESULTS_DIR};
use benchscale::reporters::print_summary;
use benchscale::{run, ReportConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Aggregate benchmark results and plot thread scaling
///
/// Reads Google Benchmark CSV files, keeps the `_mean` rows, averages them
/// per benchmark and thread count, and writes one scaling chart per
/// benchmark plus a combined overview.
#[derive(Parser, Debug)]
#[command(name = "plot-bench")]
#[command(author = "Dweve B.V.")]
#[command(version)]
#[command(about = "Aggregate benchmark results and plot thread scaling")]
struct Cli {
    /// Directory containing the result files
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    results_dir: PathBuf,

    /// File name pattern of the result files
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Chart output directory [default: <RESULTS_DIR>/plots]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_SIZE.0)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_SIZE.1)]
    height: u32,

    /// Do not open the overview chart after rendering
    #[arg(long)]
    no_show: bool,

    /// Also write the pivot table as CSV
    #[arg(long, value_name = "PATH")]
    pivot_csv: Option<PathBuf>,

    /// Also write the pivot table as JSON
    #[arg(long, value_name = "PATH")]
    pivot_json: Option<PathBuf>,

    /// Skip the summary on stdout
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        let mut config = ReportConfig::new(self.results_dir)
            .with_pattern(self.pattern)
            .with_chart_size(self.width, self.height)
            .with_show(!self.no_show);
        if let Some(dir) = self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(path) = self.pivot_csv {
            config = config.with_pivot_csv(path);
        }
        if let Some(path) = self.pivot_json {
            config = config.with_pivot_json(path);
        }
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("benchscale=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;
    let config = cli.into_config();
    debug!(?config, "starting scaling report");

    match run(&config) {
        Ok(report) => {
            if !quiet {
                print_summary(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
