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

//! The renderer command line and the contract for executing it.

use crate::placement::position;
use crate::settings::RenderSettings;
use crate::view::ViewKey;
use std::fmt;
use std::path::PathBuf;

/// A fully built renderer invocation for one view.
///
/// Arguments are kept as a vector and handed to the OS as-is, so paths with
/// spaces need no quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand {
    /// The renderer executable.
    pub program: PathBuf,
    /// Arguments in order.
    pub args: Vec<String>,
}

fn fixed(value: f64) -> String {
    format!("{value:.6}")
}

impl RenderCommand {
    /// Builds the command that renders `view` with `settings`.
    pub fn build(settings: &RenderSettings, view: ViewKey) -> Self {
        let model = settings.model_path.display().to_string();
        let is_blend = settings
            .model_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("blend"));
        let placement = position(view, settings.distance);

        let mut args = vec!["-b".to_string()];
        if is_blend {
            args.push(model.clone());
        }
        args.extend([
            "-P".to_string(),
            settings.script.display().to_string(),
            "--".to_string(),
            "--model".to_string(),
            model,
            "--name".to_string(),
            settings.name_prefix.clone(),
            "--output_path".to_string(),
            settings.output_dir.display().to_string(),
            "--resolution".to_string(),
            settings.width.to_string(),
            settings.height.to_string(),
            "--scale".to_string(),
            settings.scale.to_string(),
            "--distance".to_string(),
            fixed(settings.distance),
            "--unit".to_string(),
            fixed(settings.unit_scale),
            "--save".to_string(),
            settings.save_scene.to_string(),
        ]);
        for (flag, value) in [
            ("--x", placement.x),
            ("--y", placement.y),
            ("--z", placement.z),
            ("--rx", placement.rx),
            ("--ry", placement.ry),
            ("--rz", placement.rz),
        ] {
            args.push(flag.to_string());
            args.push(fixed(value));
        }

        Self {
            program: settings.renderer.clone(),
            args,
        }
    }
}

impl fmt::Display for RenderCommand {
    /// A human-readable command line, quoting arguments containing spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Why a render invocation did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{diagnostic}")]
pub struct RenderFailure {
    /// Captured diagnostic (spawn error, exit code, stderr tail).
    pub diagnostic: String,
}

impl RenderFailure {
    /// Creates a failure with the given diagnostic.
    pub fn new(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: diagnostic.into(),
        }
    }
}

/// Executes render commands. Implementations block until the render ends.
pub trait Renderer: Send + Sync + fmt::Debug + 'static {
    /// Runs `command` to completion.
    fn render(&self, command: &RenderCommand) -> Result<(), RenderFailure>;
}
