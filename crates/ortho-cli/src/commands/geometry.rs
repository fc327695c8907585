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

//! Placement, sorting, navigation and lighting commands.

use anyhow::Result;
use ortho_core::scene::{preview_resolution, LightingPreset, Resolution};
use ortho_core::{position as place, sort_views, Direction, Face, MatchTier, OrientationCursor, ViewKey};

/// Lighting preset as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// A single key light in front
    OnePoint,
    /// Back, key and fill lights from above
    ThreePoint,
    /// A single light straight above
    Overhead,
}

impl From<PresetArg> for LightingPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::OnePoint => LightingPreset::OnePoint,
            PresetArg::ThreePoint => LightingPreset::ThreePoint,
            PresetArg::Overhead => LightingPreset::Overhead,
        }
    }
}

fn print_placement(view: ViewKey, distance: f64) {
    let p = place(view, distance);
    println!(
        "{:<20} location ({:>8.3}, {:>8.3}, {:>8.3})  rotation ({:>6.1}, {:>6.1}, {:>6.1})",
        view.as_str(),
        p.x,
        p.y,
        p.z,
        p.rx,
        p.ry,
        p.rz
    );
}

pub fn position(view: Option<ViewKey>, distance: f64) {
    match view {
        Some(view) => print_placement(view, distance),
        None => ViewKey::ALL
            .iter()
            .for_each(|&view| print_placement(view, distance)),
    }
}

pub fn sort(faces: &[Face]) {
    let mask = faces.iter().fold(0, |mask, face| mask | face.bit());
    for view in sort_views(faces, &ViewKey::ALL) {
        let tier = MatchTier::classify(view.face_mask(), mask);
        println!("{:<20} {:?}", view.as_str(), tier);
    }
}

pub fn navigate(from: ViewKey, steps: &[Direction]) -> Result<()> {
    let mut cursor = OrientationCursor::new();
    cursor.set_by_key(from.as_str())?;
    println!("{}", cursor.current().display_name());
    for &direction in steps {
        let next = cursor.step(direction);
        println!("  {:<5} -> {}", direction.as_str(), next.display_name());
    }
    Ok(())
}

pub fn lights(preset: PresetArg, size: f64) {
    for light in LightingPreset::from(preset).lights(size) {
        let p = light.position();
        println!(
            "{:<16} {} {:>6.0} W  size {}  at ({:.3}, {:.3}, {:.3})",
            light.view.as_str(),
            light.colour,
            light.power,
            light.size,
            p.x,
            p.y,
            p.z
        );
    }
}

pub fn preview(width: u32, height: u32) {
    let preview = preview_resolution(Resolution::new(width, height));
    println!("{}x{}", preview.width, preview.height);
}
