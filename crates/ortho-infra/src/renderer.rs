// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The external renderer, driven through [`ProcessRunner`].

use crate::process::{ProcessError, ProcessRunner};
use ortho_core::device::DeviceProbe;
use ortho_core::{CoreError, RenderCommand, RenderFailure, Renderer};
use std::ffi::OsStr;
use std::path::Path;

/// Runs each render command as a child process and waits for it.
///
/// Spawn failures and non-zero exits are reported as [`RenderFailure`]s
/// carrying the process diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRenderer {
    runner: ProcessRunner,
}

impl ProcessRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self {
            runner: ProcessRunner::new(),
        }
    }
}

impl Renderer for ProcessRenderer {
    fn render(&self, command: &RenderCommand) -> Result<(), RenderFailure> {
        self.runner
            .check(&command.program, &command.args)
            .map_err(|e| RenderFailure::new(e.to_string()))
    }
}

/// Failure to enumerate render devices.
#[derive(Debug, thiserror::Error)]
pub enum DeviceProbeError {
    /// The renderer could not be run.
    #[error(transparent)]
    Process(#[from] ProcessError),
    /// The renderer's output was not a valid probe result.
    #[error(transparent)]
    Parse(#[from] CoreError),
}

/// Runs the renderer headless with the device script and parses its report.
pub fn probe_devices(renderer: &Path, script: &Path) -> Result<DeviceProbe, DeviceProbeError> {
    let args = [OsStr::new("-b"), OsStr::new("-P"), script.as_os_str()];
    let output = ProcessRunner::new().run(renderer, args)?;
    let probe = DeviceProbe::parse(&output)?;
    log::info!(
        "Render devices: {} OPTIX, {} CUDA, {} CPU",
        probe.optix.len(),
        probe.cuda.len(),
        probe.cpu.len()
    );
    Ok(probe)
}
