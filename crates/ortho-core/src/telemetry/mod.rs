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

//! Contracts for hardware sensor telemetry.
//!
//! The sensor tree (CPU, GPU and memory units with their sensors) and the
//! vendor GPU diagnostic tool are both abstracted here so that
//! `ortho-telemetry` can collect and refresh values without knowing which
//! platform library or executable supplies them.

pub mod sensor;
pub mod tree;
pub mod vendor;

pub use self::sensor::*;
pub use self::tree::*;
pub use self::vendor::*;
