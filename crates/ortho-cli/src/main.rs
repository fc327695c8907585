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

//! Ortho CLI - orthographic batch rendering front end.
//!
//! Computes view placements, walks the orientation graph, probes render
//! devices, monitors hardware sensors and dispatches render batches.

use clap::{Parser, Subcommand};
use ortho_core::{Direction, Face, ViewKey};
use std::path::PathBuf;

mod commands;
mod config;

use config::RenderOverrides;

/// Ortho - batch renders a model from the 26 canonical orthographic views.
#[derive(Parser)]
#[command(name = "ortho")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Render configuration file (TOML). Defaults to `ortho.toml` if present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the camera placement for one or all views
    Position {
        /// View key, e.g. `top-front-right`. All views when omitted.
        view: Option<ViewKey>,

        /// Distance from the origin
        #[arg(short, long, default_value = "8.0")]
        distance: f64,
    },

    /// Order views by how well they match a set of faces
    Sort {
        /// Selected faces, comma separated
        #[arg(value_delimiter = ',')]
        faces: Vec<Face>,
    },

    /// Walk the orientation graph
    Navigate {
        /// Starting view
        #[arg(short, long, default_value = "top-front-right")]
        from: ViewKey,

        /// Steps to take, e.g. `left up up`
        steps: Vec<Direction>,
    },

    /// Print the lights of a lighting preset
    Lights {
        /// Preset to show
        #[arg(value_enum, default_value = "three-point")]
        preset: commands::geometry::PresetArg,

        /// Largest model dimension
        #[arg(short, long, default_value = "1.0")]
        size: f64,
    },

    /// Print the preview resolution for an output resolution
    Preview {
        /// Output width
        width: u32,
        /// Output height
        height: u32,
    },

    /// Measure a model's bounding box
    Dimensions {
        /// Model file (`.obj` or `.stl`)
        model: PathBuf,

        /// Scale from model units to metres
        #[arg(short, long, default_value = "0.001")]
        unit_scale: f64,
    },

    /// List the devices the renderer can use
    Devices {
        /// Device probe script run by the renderer
        #[arg(short, long, default_value = "scripts/render_devices.py")]
        script: PathBuf,

        /// Renderer executable, overriding the configuration
        #[arg(short, long)]
        renderer: Option<PathBuf>,
    },

    /// Show live hardware sensor readings
    Monitor {
        /// Use the slower full-page polling rate
        #[arg(long)]
        full: bool,

        /// Number of refresh passes to print
        #[arg(short, long, default_value = "10")]
        passes: u64,
    },

    /// Render a batch of views
    Render {
        #[command(flatten)]
        overrides: RenderOverrides,

        /// Print the commands without running them
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Position { view, distance } => commands::geometry::position(view, distance),
        Commands::Sort { faces } => commands::geometry::sort(&faces),
        Commands::Navigate { from, steps } => commands::geometry::navigate(from, &steps)?,
        Commands::Lights { preset, size } => commands::geometry::lights(preset, size),
        Commands::Preview { width, height } => commands::geometry::preview(width, height),
        Commands::Dimensions { model, unit_scale } => {
            commands::dimensions::run(&model, unit_scale)?
        }
        Commands::Devices { script, renderer } => {
            let settings = config::load_settings(cli.config.as_deref())?;
            let renderer = renderer.unwrap_or(settings.renderer);
            commands::devices::run(&renderer, &script)?;
        }
        Commands::Monitor { full, passes } => commands::monitor::run(full, passes)?,
        Commands::Render { overrides, dry_run } => {
            let mut settings = config::load_settings(cli.config.as_deref())?;
            overrides.apply(&mut settings);
            commands::render::run(&settings, dry_run)?;
        }
    }

    Ok(())
}
