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

//! Render configuration loading and command-line overrides.

use anyhow::{Context, Result};
use ortho_core::{DispatchMode, RenderSettings, ViewKey};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG: &str = "ortho.toml";

/// Dispatch mode as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// One render at a time
    Sequential,
    /// Up to `--threads` renders at a time
    Parallel,
}

impl From<ModeArg> for DispatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => DispatchMode::Sequential,
            ModeArg::Parallel => DispatchMode::Parallel,
        }
    }
}

/// Flags that override values from the configuration file.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct RenderOverrides {
    /// Model to render
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output file name prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Resolution scale percentage
    #[arg(long)]
    pub scale: Option<u32>,

    /// Camera distance
    #[arg(short, long)]
    pub distance: Option<f64>,

    /// Renderer executable
    #[arg(long)]
    pub renderer: Option<PathBuf>,

    /// Render script
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Dispatch mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Worker threads in parallel mode
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Views to render, comma separated
    #[arg(long, value_delimiter = ',')]
    pub views: Vec<ViewKey>,

    /// Also save the prepared scene
    #[arg(long)]
    pub save_scene: bool,
}

impl RenderOverrides {
    /// Writes every given flag into `settings`.
    pub fn apply(self, settings: &mut RenderSettings) {
        if let Some(model) = self.model {
            settings.model_path = model;
        }
        if let Some(output) = self.output {
            settings.output_dir = output;
        }
        if let Some(prefix) = self.prefix {
            settings.name_prefix = prefix;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if let Some(distance) = self.distance {
            settings.distance = distance;
        }
        if let Some(renderer) = self.renderer {
            settings.renderer = renderer;
        }
        if let Some(script) = self.script {
            settings.script = script;
        }
        if let Some(mode) = self.mode {
            settings.mode = mode.into();
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
        if !self.views.is_empty() {
            settings.views = self.views;
        }
        if self.save_scene {
            settings.save_scene = true;
        }
    }
}

/// Parses render settings from TOML text. Missing keys take their defaults.
pub fn parse_settings(text: &str) -> Result<RenderSettings> {
    toml::from_str(text).context("Failed to parse TOML render settings")
}

/// Loads render settings.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG`] is used if
/// present, otherwise the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<RenderSettings> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
        None => {
            log::debug!("No '{DEFAULT_CONFIG}' found. Using default settings.");
            return Ok(RenderSettings::default());
        }
    };

    log::info!("Loading render settings from '{}'", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
    parse_settings(&text)
        .with_context(|| format!("Failed to load settings from '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let settings = parse_settings(
            r#"
model_path = "parts/bracket.stl"
mode = "parallel"
threads = 4
views = ["top", "front-right"]
"#,
        )
        .unwrap();

        assert_eq!(settings.model_path, PathBuf::from("parts/bracket.stl"));
        assert_eq!(settings.mode, DispatchMode::Parallel);
        assert_eq!(settings.threads, 4);
        assert_eq!(settings.views, vec![ViewKey::Top, ViewKey::FrontRight]);
        assert_eq!(settings.name_prefix, "Render");
        assert_eq!((settings.width, settings.height), (1920, 1080));
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        assert!(parse_settings(r#"views = ["upside-down"]"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "distance = 12.5\nname_prefix = \"Bracket\"").unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.distance, 12.5);
        assert_eq!(settings.name_prefix, "Bracket");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_overrides() {
        let mut settings = RenderSettings::default();
        RenderOverrides {
            model: Some(PathBuf::from("part.blend")),
            mode: Some(ModeArg::Parallel),
            threads: Some(8),
            views: vec![ViewKey::Bottom],
            ..RenderOverrides::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.model_path, PathBuf::from("part.blend"));
        assert_eq!(settings.worker_count(), 8);
        assert_eq!(settings.views, vec![ViewKey::Bottom]);
        assert_eq!(settings.distance, 8.0);
    }
}
