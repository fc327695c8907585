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

//! Render batch configuration.

use crate::error::{CoreError, CoreResult};
use crate::view::ViewKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on worker threads for parallel dispatch.
pub const MAX_THREADS: usize = 100;

/// How a batch of render jobs is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One job at a time, in submission order.
    #[default]
    Sequential,
    /// Up to `threads` jobs at a time.
    Parallel,
}

/// Everything needed to build the renderer command line for a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// The model to render (`.blend`, `.obj`, `.stl`, ...).
    pub model_path: PathBuf,
    /// Directory the renderer writes images into.
    pub output_dir: PathBuf,
    /// Prefix for output file names.
    pub name_prefix: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Resolution scale percentage.
    pub scale: u32,
    /// Camera distance from the origin.
    pub distance: f64,
    /// Import unit scale applied to non-native models.
    pub unit_scale: f64,
    /// Whether the renderer should also save the prepared scene.
    pub save_scene: bool,
    /// The renderer executable.
    pub renderer: PathBuf,
    /// The script the renderer runs for each view.
    pub script: PathBuf,
    /// Dispatch mode for the batch.
    pub mode: DispatchMode,
    /// Worker count used in parallel mode.
    pub threads: usize,
    /// Views to render. Empty means [`ViewKey::DEFAULT`].
    pub views: Vec<ViewKey>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            output_dir: PathBuf::from("renders"),
            name_prefix: "Render".to_string(),
            width: 1920,
            height: 1080,
            scale: 100,
            distance: 8.0,
            unit_scale: 0.001,
            save_scene: false,
            renderer: PathBuf::from("blender"),
            script: PathBuf::from("scripts/render.py"),
            mode: DispatchMode::Sequential,
            threads: 1,
            views: Vec::new(),
        }
    }
}

impl RenderSettings {
    /// Checks the settings and returns the first problem found.
    pub fn validate(&self) -> CoreResult<()> {
        fn non_empty(path: &Path, what: &str) -> CoreResult<()> {
            if path.as_os_str().is_empty() {
                return Err(CoreError::InvalidSettings(format!("{what} is empty")));
            }
            Ok(())
        }

        non_empty(&self.model_path, "model path")?;
        non_empty(&self.output_dir, "output directory")?;
        non_empty(&self.renderer, "renderer executable")?;
        non_empty(&self.script, "render script")?;

        if self.name_prefix.trim().is_empty() {
            return Err(CoreError::InvalidSettings("name prefix is empty".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidSettings(format!(
                "resolution {}x{} must be positive",
                self.width, self.height
            )));
        }
        if self.scale == 0 {
            return Err(CoreError::InvalidSettings("scale must be positive".into()));
        }
        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(CoreError::InvalidSettings(format!(
                "distance {} must be positive",
                self.distance
            )));
        }
        if !(self.unit_scale.is_finite() && self.unit_scale > 0.0) {
            return Err(CoreError::InvalidSettings(format!(
                "unit scale {} must be positive",
                self.unit_scale
            )));
        }
        if !(1..=MAX_THREADS).contains(&self.threads) {
            return Err(CoreError::InvalidSettings(format!(
                "thread count {} outside 1..={MAX_THREADS}",
                self.threads
            )));
        }
        Ok(())
    }

    /// The views to render, falling back to [`ViewKey::DEFAULT`].
    pub fn effective_views(&self) -> Vec<ViewKey> {
        if self.views.is_empty() {
            vec![ViewKey::DEFAULT]
        } else {
            self.views.clone()
        }
    }

    /// Worker count for the configured mode.
    pub fn worker_count(&self) -> usize {
        match self.mode {
            DispatchMode::Sequential => 1,
            DispatchMode::Parallel => self.threads,
        }
    }
}
