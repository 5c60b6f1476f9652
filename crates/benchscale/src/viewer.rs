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

//! Interactive presentation of the overview chart.
//!
//! Hands the image to the desktop's default viewer and waits for the
//! launcher to return. On headless machines this is a no-op.

use std::env;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info, warn};

/// Outcome of [`show`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The viewer was launched and has returned.
    Shown,
    /// No display is available; nothing was launched.
    Headless,
    /// Launching the viewer failed; the failure was logged.
    Failed,
}

/// Whether a graphical display is reachable from this process.
pub fn display_available() -> bool {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        true
    } else {
        has_display_vars(
            env::var_os("DISPLAY").is_some(),
            env::var_os("WAYLAND_DISPLAY").is_some(),
        )
    }
}

fn has_display_vars(x11: bool, wayland: bool) -> bool {
    x11 || wayland
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg("-W").arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "/WAIT", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Opens `path` in the platform image viewer and blocks until the launcher
/// exits.
///
/// Viewer problems never abort a run: the charts are already on disk.
pub fn show(path: &Path) -> ShowOutcome {
    if !display_available() {
        debug!(path = %path.display(), "no display available, not showing chart");
        return ShowOutcome::Headless;
    }

    let mut cmd = viewer_command(path);
    info!(path = %path.display(), "opening overview chart");
    match cmd.status() {
        Ok(status) if status.success() => ShowOutcome::Shown,
        Ok(status) => {
            warn!(path = %path.display(), %status, "image viewer exited with failure");
            ShowOutcome::Failed
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not launch image viewer");
            ShowOutcome::Failed
        }
    }
}
