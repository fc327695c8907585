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

//! Scene composition helpers: camera/light distances, lighting presets and
//! preview sizing.

use crate::math::gcd;
use crate::placement::{position, Position};
use crate::view::ViewKey;
use serde::{Deserialize, Serialize};

/// Width every preview render is scaled down to.
pub const PREVIEW_WIDTH: u32 = 600;

/// Camera distance that frames a model whose largest dimension is `size`
/// metres. Empirically fitted.
pub fn optimal_camera_distance(size: f64) -> f64 {
    3.2079307352327824 * size.powf(1.0950872359751485) + 0.10375328078135429
}

/// Light distance for a model of the given size. Currently constant.
pub fn optimal_light_distance(_size: f64) -> f64 {
    8.0
}

/// An output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Full HD, used when no resolution is configured.
    pub const FULL_HD: Self = Self::new(1920, 1080);

    /// Creates a resolution.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels.
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Scales `resolution` down to a [`PREVIEW_WIDTH`]-wide image with the same
/// aspect ratio, unless it is already smaller.
///
/// A zero-sized input is treated as [`Resolution::FULL_HD`].
pub fn preview_resolution(resolution: Resolution) -> Resolution {
    let resolution = if resolution.width == 0 || resolution.height == 0 {
        Resolution::FULL_HD
    } else {
        resolution
    };
    let divisor = gcd(resolution.width, resolution.height);
    let (ratio_w, ratio_h) = (resolution.width / divisor, resolution.height / divisor);
    let height = u64::from(PREVIEW_WIDTH) * u64::from(ratio_h) / u64::from(ratio_w);
    let preview = Resolution::new(PREVIEW_WIDTH, u32::try_from(height).unwrap_or(u32::MAX));
    if preview.pixels() < resolution.pixels() {
        preview
    } else {
        resolution
    }
}

/// A point light placed on one of the view positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Where the light sits.
    pub view: ViewKey,
    /// Colour as `#RRGGBB`.
    pub colour: String,
    /// Power in watts.
    pub power: f32,
    /// Emitter size.
    pub size: f32,
    /// Distance from the origin.
    pub distance: f64,
}

impl Light {
    /// A white light of size 3.
    pub fn white(view: ViewKey, power: f32, distance: f64) -> Self {
        Self {
            view,
            colour: "#FFFFFF".to_string(),
            power,
            size: 3.0,
            distance,
        }
    }

    /// Placement of the light at its own distance.
    pub fn position(&self) -> Position {
        position(self.view, self.distance)
    }
}

/// Built-in lighting setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LightingPreset {
    /// A single key light in front.
    OnePoint,
    /// Back, key and fill lights from above.
    ThreePoint,
    /// A single light straight above.
    Overhead,
}

impl LightingPreset {
    /// The lights of this preset for a model whose largest dimension is `size`.
    pub fn lights(self, size: f64) -> Vec<Light> {
        let distance = optimal_light_distance(size);
        match self {
            LightingPreset::OnePoint => vec![Light::white(ViewKey::Front, 1000.0, distance)],
            LightingPreset::ThreePoint => vec![
                Light::white(ViewKey::TopRightBack, 200.0, distance),
                Light::white(ViewKey::TopBackLeft, 1000.0, distance),
                Light::white(ViewKey::TopLeftFront, 800.0, distance),
            ],
            LightingPreset::Overhead => vec![Light::white(ViewKey::Top, 1000.0, distance)],
        }
    }
}
