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

//! Errors raised while refreshing sensors.

use ortho_core::telemetry::{SensorKind, SensorPath, VendorToolError};

/// A sensor could not be refreshed. The handle's value is reset to `0`.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The vendor diagnostic tool failed or produced unreadable output.
    #[error(transparent)]
    Vendor(#[from] VendorToolError),
    /// The handle is externally sourced but no vendor tool is configured.
    #[error("No vendor GPU tool configured for external sensor {0}")]
    NoVendorTool(SensorPath),
    /// The vendor tool cannot report this kind of sensor.
    #[error("Vendor GPU tool cannot report {0:?} sensors")]
    UnsupportedMetric(SensorKind),
    /// The path no longer addresses a sensor in the tree.
    #[error("Sensor path {0} is outside the hardware tree")]
    PathOutOfRange(SensorPath),
    /// No handle exists at the given position.
    #[error("No sensor handle at index {0}")]
    UnknownHandle(usize),
}
