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

//! Benchmark scaling reports.
//!
//! Collects Google Benchmark CSV results produced at several thread counts,
//! averages repeated runs, and renders how execution time scales with the
//! number of threads.
//!
//! # Pipeline
//!
//! 1. **Discovery** ([`discovery`]): `benchmarks/results/bench_*.csv`, sorted
//! 2. **Ingestion** ([`ingest`]): rows of every file, tagged with the file name
//! 3. **Normalization** ([`normalize`]): `_mean` rows only, thread count and
//!    benchmark name split out of the label, times in seconds
//! 4. **Aggregation** ([`aggregate`]): mean per (benchmark, threads) as a
//!    pivot table
//! 5. **Rendering** ([`render`]): one PNG per benchmark plus
//!    `overview_scaling.png` in `benchmarks/results/plots/`
//!
//! # Example
//!
//! ```no_run
//! use benchscale::{run, ReportConfig};
//!
//! let config = ReportConfig::default().with_show(false);
//! let report = run(&config)?;
//! for path in report.charts.all() {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), benchscale::ReportError>(())
//! ```
//!
//! # Units
//!
//! Whether times are converted from nanoseconds is decided once, from the
//! `time_unit` of the very first row read. Mixed-unit inputs are therefore
//! all scaled the same way.

pub mod aggregate;
pub mod config;
pub mod discovery;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod render;
pub mod report;
pub mod reporters;
pub mod viewer;

pub use aggregate::{PivotCell, PivotTable};
pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use ingest::ResultRecord;
pub use normalize::{NormalizedRecord, TimeScale};
pub use render::RenderedCharts;
pub use report::{build_pivot, run, PivotReport, ScalingReport};
