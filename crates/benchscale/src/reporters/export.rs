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

//! Pivot table export.

use crate::aggregate::{PivotCell, PivotTable};
use crate::error::{ReportError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// JSON document written by [`write_pivot_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotExport {
    /// Column axis.
    pub benchmarks: Vec<String>,
    /// Row axis.
    pub threads: Vec<u64>,
    /// Populated cells in column order.
    pub cells: Vec<PivotCell>,
}

impl From<&PivotTable> for PivotExport {
    fn from(pivot: &PivotTable) -> Self {
        Self {
            benchmarks: pivot.benchmarks().map(str::to_string).collect(),
            threads: pivot.threads().collect(),
            cells: pivot.cells(),
        }
    }
}

fn export_error(path: &Path, message: impl ToString) -> ReportError {
    ReportError::Export {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Writes the pivot table as long-form CSV: `benchmark,threads,real_time_s`.
pub fn write_pivot_csv(pivot: &PivotTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| export_error(path, e))?;
    for cell in pivot.cells() {
        writer.serialize(&cell).map_err(|e| export_error(path, e))?;
    }
    writer.flush().map_err(|e| ReportError::io_error(path, e))?;
    debug!(path = %path.display(), "wrote pivot csv");
    Ok(())
}

/// Writes the pivot table, including both axes, as pretty-printed JSON.
pub fn write_pivot_json(pivot: &PivotTable, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&PivotExport::from(pivot))
        .map_err(|e| export_error(path, e))?;
    fs::write(path, json).map_err(|e| ReportError::io_error(path, e))?;
    debug!(path = %path.display(), "wrote pivot json");
    Ok(())
}
