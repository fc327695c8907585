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

//! # Ortho Core
//!
//! Foundational crate containing the view universe, placement geometry,
//! orientation navigation, job state, and the interface contracts
//! implemented by the other `ortho-*` crates.

#![warn(missing_docs)]

pub mod device;
pub mod error;
pub mod job;
pub mod math;
pub mod model;
pub mod orientation;
pub mod placement;
pub mod render;
pub mod scene;
pub mod settings;
pub mod sorting;
pub mod telemetry;
pub mod view;

pub use error::{CoreError, CoreResult};
pub use job::{RenderJob, RenderStatus};
pub use orientation::{Direction, OrientationCursor, OrientationGraph};
pub use placement::{position, position_for, Position};
pub use render::{RenderCommand, RenderFailure, Renderer};
pub use settings::{DispatchMode, RenderSettings};
pub use sorting::{sort_views, MatchTier};
pub use view::{Face, ViewKey};
