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

//! # Ortho Telemetry
//!
//! Collects a curated set of hardware sensors (CPU total load, GPU core
//! load/temperature/memory, system memory load) from a [`HardwareTree`],
//! falls back to a vendor GPU tool when the tree has no GPU sensors, and
//! keeps the readings fresh from a background [`TelemetryPoller`].
//!
//! [`HardwareTree`]: ortho_core::telemetry::HardwareTree

#![warn(missing_docs)]

pub mod collector;
pub mod error;
pub mod naming;
pub mod service;

pub use collector::{categorize, SensorCategory, TelemetryCollector};
pub use error::TelemetryError;
pub use naming::format_name;
pub use service::{PollingConfig, PollingMode, TelemetryPoller, TelemetrySnapshot};
