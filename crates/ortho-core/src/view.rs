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

//! The closed universe of 26 orthographic view keys and the six cube faces
//! they are composed from.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six faces of the cube surrounding a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    /// The +Z face.
    Top,
    /// The -Z face.
    Bottom,
    /// The -Y face.
    Front,
    /// The +Y face.
    Back,
    /// The -X face.
    Left,
    /// The +X face.
    Right,
}

impl Face {
    /// All six faces.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    /// The lowercase label of the face.
    pub const fn as_str(self) -> &'static str {
        match self {
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
        }
    }

    /// A single-bit mask identifying this face, used for set comparisons.
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Face::ALL
            .into_iter()
            .find(|face| face.as_str() == s)
            .ok_or_else(|| CoreError::InvalidFace(s.to_string()))
    }
}

/// A fixed camera/light orientation identifier.
///
/// The declaration order is the canonical universe order, which the view
/// sorter relies on for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ViewKey {
    TopFrontRight,
    TopRightBack,
    TopBackLeft,
    TopLeftFront,
    FrontRightBottom,
    RightBackBottom,
    BackLeftBottom,
    LeftFrontBottom,
    TopFront,
    TopRight,
    TopBack,
    TopLeft,
    FrontBottom,
    RightBottom,
    BackBottom,
    LeftBottom,
    FrontRight,
    RightBack,
    BackLeft,
    LeftFront,
    Front,
    Right,
    Back,
    Left,
    Top,
    Bottom,
}

impl ViewKey {
    /// Number of keys in the universe.
    pub const COUNT: usize = 26;

    /// The whole universe in canonical order.
    pub const ALL: [ViewKey; Self::COUNT] = [
        ViewKey::TopFrontRight,
        ViewKey::TopRightBack,
        ViewKey::TopBackLeft,
        ViewKey::TopLeftFront,
        ViewKey::FrontRightBottom,
        ViewKey::RightBackBottom,
        ViewKey::BackLeftBottom,
        ViewKey::LeftFrontBottom,
        ViewKey::TopFront,
        ViewKey::TopRight,
        ViewKey::TopBack,
        ViewKey::TopLeft,
        ViewKey::FrontBottom,
        ViewKey::RightBottom,
        ViewKey::BackBottom,
        ViewKey::LeftBottom,
        ViewKey::FrontRight,
        ViewKey::RightBack,
        ViewKey::BackLeft,
        ViewKey::LeftFront,
        ViewKey::Front,
        ViewKey::Right,
        ViewKey::Back,
        ViewKey::Left,
        ViewKey::Top,
        ViewKey::Bottom,
    ];

    /// The view selected when a batch is submitted without any views.
    pub const DEFAULT: ViewKey = ViewKey::TopFrontRight;

    /// Position of this key in [`ViewKey::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The hyphenated identifier, e.g. `top-front-right`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewKey::TopFrontRight => "top-front-right",
            ViewKey::TopRightBack => "top-right-back",
            ViewKey::TopBackLeft => "top-back-left",
            ViewKey::TopLeftFront => "top-left-front",
            ViewKey::FrontRightBottom => "front-right-bottom",
            ViewKey::RightBackBottom => "right-back-bottom",
            ViewKey::BackLeftBottom => "back-left-bottom",
            ViewKey::LeftFrontBottom => "left-front-bottom",
            ViewKey::TopFront => "top-front",
            ViewKey::TopRight => "top-right",
            ViewKey::TopBack => "top-back",
            ViewKey::TopLeft => "top-left",
            ViewKey::FrontBottom => "front-bottom",
            ViewKey::RightBottom => "right-bottom",
            ViewKey::BackBottom => "back-bottom",
            ViewKey::LeftBottom => "left-bottom",
            ViewKey::FrontRight => "front-right",
            ViewKey::RightBack => "right-back",
            ViewKey::BackLeft => "back-left",
            ViewKey::LeftFront => "left-front",
            ViewKey::Front => "front",
            ViewKey::Right => "right",
            ViewKey::Back => "back",
            ViewKey::Left => "left",
            ViewKey::Top => "top",
            ViewKey::Bottom => "bottom",
        }
    }

    /// The faces this key is composed of, in the order they appear in its name.
    pub fn faces(self) -> Vec<Face> {
        self.as_str()
            .split('-')
            .filter_map(|part| part.parse().ok())
            .collect()
    }

    /// Bitmask of [`ViewKey::faces`].
    pub fn face_mask(self) -> u8 {
        self.faces().iter().fold(0, |mask, face| mask | face.bit())
    }

    /// A human-readable title, e.g. `Top Front Right`.
    pub fn display_name(self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKey {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        ViewKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::InvalidKey(s.to_string()))
    }
}
