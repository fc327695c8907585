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

//! Discrete "virtual trackball" navigation over the view universe.
//!
//! Every view has exactly one neighbour in each of the four directions. The
//! adjacency is reference data: some moves are not inverses of each other
//! (for example `bottom` → left → right lands on `left-front-bottom`), and
//! that is kept as-is.

use crate::error::{CoreError, CoreResult};
use crate::view::ViewKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Rotate the view left.
    Left,
    /// Rotate the view up.
    Up,
    /// Rotate the view right.
    Right,
    /// Rotate the view down.
    Down,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    const fn slot(self) -> usize {
        self as usize
    }

    /// Lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::InvalidDirection(s.to_string()))
    }
}

use ViewKey as V;

// [left, up, right, down], indexed by `ViewKey::index()`.
const ADJACENCY: [[ViewKey; 4]; ViewKey::COUNT] = [
    // top-front-right
    [V::TopFront, V::Top, V::TopRight, V::FrontRight],
    // top-right-back
    [V::TopRight, V::Top, V::TopBack, V::RightBack],
    // top-back-left
    [V::TopBack, V::Top, V::TopLeft, V::BackLeft],
    // top-left-front
    [V::TopLeft, V::Top, V::TopFront, V::LeftFront],
    // front-right-bottom
    [V::FrontBottom, V::FrontRight, V::RightBottom, V::Bottom],
    // right-back-bottom
    [V::RightBottom, V::RightBack, V::BackBottom, V::Bottom],
    // back-left-bottom
    [V::BackBottom, V::BackLeft, V::LeftBottom, V::Bottom],
    // left-front-bottom
    [V::LeftBottom, V::LeftFront, V::FrontBottom, V::Bottom],
    // top-front
    [V::TopLeftFront, V::Top, V::TopFrontRight, V::Front],
    // top-right
    [V::TopFrontRight, V::Top, V::TopRightBack, V::Right],
    // top-back
    [V::TopRightBack, V::Top, V::TopBackLeft, V::Back],
    // top-left
    [V::TopBackLeft, V::Top, V::TopLeftFront, V::Left],
    // front-bottom
    [V::LeftFrontBottom, V::Front, V::FrontRightBottom, V::Bottom],
    // right-bottom
    [V::FrontRightBottom, V::Right, V::RightBackBottom, V::Bottom],
    // back-bottom
    [V::RightBackBottom, V::Back, V::BackLeftBottom, V::Bottom],
    // left-bottom
    [V::BackLeftBottom, V::Left, V::LeftFrontBottom, V::Bottom],
    // front-right
    [V::Front, V::TopFrontRight, V::Right, V::FrontRightBottom],
    // right-back
    [V::Right, V::TopRightBack, V::Back, V::RightBackBottom],
    // back-left
    [V::Back, V::TopBackLeft, V::Left, V::BackLeftBottom],
    // left-front
    [V::Left, V::TopLeftFront, V::Front, V::LeftFrontBottom],
    // front
    [V::LeftFront, V::TopFront, V::FrontRight, V::FrontBottom],
    // right
    [V::FrontRight, V::TopRight, V::RightBack, V::RightBottom],
    // back
    [V::BackLeft, V::TopBack, V::RightBack, V::BackBottom],
    // left
    [V::BackLeft, V::TopLeft, V::LeftFront, V::LeftBottom],
    // top
    [V::TopLeft, V::TopBack, V::TopRight, V::TopFront],
    // bottom
    [V::LeftBottom, V::FrontRight, V::RightBottom, V::BackBottom],
];

/// The immutable adjacency graph over all 26 views.
///
/// Cheap to copy and freely shareable across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationGraph;

impl OrientationGraph {
    /// Creates the graph.
    pub const fn new() -> Self {
        Self
    }

    /// Returns the neighbour of `from` in `direction`.
    #[inline]
    pub fn step(&self, from: ViewKey, direction: Direction) -> ViewKey {
        ADJACENCY[from.index()][direction.slot()]
    }

    /// All four neighbours of `key` as `[left, up, right, down]`.
    #[inline]
    pub fn neighbours(&self, key: ViewKey) -> [ViewKey; 4] {
        ADJACENCY[key.index()]
    }

    /// Resolves a key by name.
    pub fn node(&self, key: &str) -> CoreResult<ViewKey> {
        key.parse()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        ADJACENCY.len() * Direction::ALL.len()
    }
}

/// A current position within the [`OrientationGraph`], used to drive a
/// rotating preview.
#[derive(Debug, Clone)]
pub struct OrientationCursor {
    graph: OrientationGraph,
    current: ViewKey,
}

impl OrientationCursor {
    /// Creates a cursor positioned on [`ViewKey::DEFAULT`].
    pub fn new() -> Self {
        Self {
            graph: OrientationGraph::new(),
            current: ViewKey::DEFAULT,
        }
    }

    /// The view the cursor is on.
    pub fn current(&self) -> ViewKey {
        self.current
    }

    /// Moves one step and returns the new view.
    pub fn step(&mut self, direction: Direction) -> ViewKey {
        self.current = self.graph.step(self.current, direction);
        log::trace!("Orientation cursor moved {direction} to {}", self.current);
        self.current
    }

    /// Jumps directly to `key`.
    ///
    /// Unknown keys are rejected and the cursor stays where it was.
    pub fn set_by_key(&mut self, key: &str) -> CoreResult<ViewKey> {
        self.current = self.graph.node(key)?;
        Ok(self.current)
    }
}

impl Default for OrientationCursor {
    fn default() -> Self {
        Self::new()
    }
}
