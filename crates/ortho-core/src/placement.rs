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

//! Camera and light placement for each view key.
//!
//! The placement table is fixed reference data. Several rotation triples
//! (notably the bottom corners and the back edges) deliberately differ from
//! what a pure look-at derivation would produce, so the table is kept
//! literal rather than computed.

use crate::error::CoreResult;
use crate::view::ViewKey;
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Placement and rotation (in degrees) of an object looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X location.
    pub x: f64,
    /// Y location.
    pub y: f64,
    /// Z location.
    pub z: f64,
    /// Rotation about X, degrees.
    pub rx: f64,
    /// Rotation about Y, degrees.
    pub ry: f64,
    /// Rotation about Z, degrees.
    pub rz: f64,
}

impl Position {
    /// The location part as an array.
    pub fn location(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// The rotation part as an array.
    pub fn rotation(&self) -> [f64; 3] {
        [self.rx, self.ry, self.rz]
    }
}

#[derive(Clone, Copy)]
enum Coord {
    Zero,
    PlusLeg,
    MinusLeg,
    PlusDist,
    MinusDist,
}

impl Coord {
    #[inline]
    fn resolve(self, distance: f64, leg: f64) -> f64 {
        match self {
            Coord::Zero => 0.0,
            Coord::PlusLeg => leg,
            Coord::MinusLeg => -leg,
            Coord::PlusDist => distance,
            Coord::MinusDist => -distance,
        }
    }
}

use Coord::{MinusDist as MD, MinusLeg as ML, PlusDist as PD, PlusLeg as PL, Zero as Z};

type Entry = ([Coord; 3], [f64; 3]);

// Indexed by `ViewKey::index()`.
const TABLE: [Entry; ViewKey::COUNT] = [
    ([PL, ML, PD], [45.0, 0.0, 45.0]),     // top-front-right
    ([PL, PL, PD], [45.0, 0.0, 135.0]),    // top-right-back
    ([ML, PL, PD], [45.0, 0.0, 225.0]),    // top-back-left
    ([ML, ML, PD], [45.0, 0.0, 315.0]),    // top-left-front
    ([PL, ML, MD], [135.0, 0.0, 45.0]),    // front-right-bottom
    ([PL, PL, MD], [315.0, 180.0, -45.0]), // right-back-bottom
    ([ML, PL, MD], [315.0, -180.0, 45.0]), // back-left-bottom
    ([ML, ML, MD], [135.0, 0.0, 315.0]),   // left-front-bottom
    ([Z, ML, PL], [45.0, 0.0, 0.0]),       // top-front
    ([PL, Z, PL], [45.0, 0.0, 90.0]),      // top-right
    ([Z, PL, PL], [225.0, 180.0, 0.0]),    // top-back
    ([ML, Z, PL], [45.0, 0.0, 270.0]),     // top-left
    ([Z, ML, ML], [135.0, 0.0, 0.0]),      // front-bottom
    ([PL, Z, ML], [135.0, 0.0, 90.0]),     // right-bottom
    ([Z, PL, ML], [315.0, 180.0, 0.0]),    // back-bottom
    ([ML, Z, ML], [135.0, 0.0, 270.0]),    // left-bottom
    ([PL, ML, Z], [90.0, 0.0, 45.0]),      // front-right
    ([PL, PL, Z], [90.0, 0.0, 135.0]),     // right-back
    ([ML, PL, Z], [90.0, 0.0, 225.0]),     // back-left
    ([ML, ML, Z], [90.0, 0.0, 315.0]),     // left-front
    ([Z, MD, Z], [90.0, 0.0, 0.0]),        // front
    ([PD, Z, Z], [90.0, 0.0, 90.0]),       // right
    ([Z, PD, Z], [90.0, 0.0, 180.0]),      // back
    ([MD, Z, Z], [90.0, 0.0, 270.0]),      // left
    ([Z, Z, PD], [0.0, 0.0, 0.0]),         // top
    ([Z, Z, MD], [180.0, 0.0, 180.0]),     // bottom
];

/// Computes the placement of an object at `distance` from the origin for `key`.
///
/// Corner and edge views use `distance / sqrt(2)` on their diagonal axes;
/// face views use `distance` on a single axis.
pub fn position(key: ViewKey, distance: f64) -> Position {
    let (coords, [rx, ry, rz]) = TABLE[key.index()];
    let leg = distance / SQRT_2;
    Position {
        x: coords[0].resolve(distance, leg),
        y: coords[1].resolve(distance, leg),
        z: coords[2].resolve(distance, leg),
        rx,
        ry,
        rz,
    }
}

/// String-keyed variant of [`position`]; unknown keys yield `InvalidKey`.
pub fn position_for(key: &str, distance: f64) -> CoreResult<Position> {
    Ok(position(key.parse()?, distance))
}
