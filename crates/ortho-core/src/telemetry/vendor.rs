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

//! Vendor GPU diagnostic tool contract and output parsing.
//!
//! Used as a fallback when the sensor tree exposes no usable GPU sensors.
//! Output formats follow `nvidia-smi --format=csv,noheader,nounits`.

use super::sensor::SensorKind;
use std::fmt::Debug;

/// An error from the vendor diagnostic tool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VendorToolError {
    /// The tool could not be run or exited with an error.
    #[error("Vendor tool invocation failed: {0}")]
    Invocation(String),
    /// The tool's output did not have the expected shape.
    #[error("Unexpected vendor tool output '{output}': {reason}")]
    Parse {
        /// The raw output.
        output: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// A single GPU metric the tool can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuMetric {
    /// Core temperature in °C.
    Temperature,
    /// Core utilisation in %.
    Utilization,
    /// Used memory in MB.
    MemoryUsed,
}

impl GpuMetric {
    /// The metrics collected per device, in handle order.
    pub const ALL: [GpuMetric; 3] = [
        GpuMetric::Temperature,
        GpuMetric::Utilization,
        GpuMetric::MemoryUsed,
    ];

    /// The `--query-gpu` field name.
    pub fn query_field(self) -> &'static str {
        match self {
            GpuMetric::Temperature => "temperature.gpu",
            GpuMetric::Utilization => "utilization.gpu",
            GpuMetric::MemoryUsed => "memory.used",
        }
    }

    /// The sensor kind reported for this metric.
    pub fn sensor_kind(self) -> SensorKind {
        match self {
            GpuMetric::Temperature => SensorKind::Temperature,
            GpuMetric::Utilization => SensorKind::Load,
            GpuMetric::MemoryUsed => SensorKind::SmallData,
        }
    }

    /// The sensor name reported for this metric.
    pub fn sensor_name(self) -> &'static str {
        match self {
            GpuMetric::Temperature => "Temperature",
            GpuMetric::Utilization => "GPU Core",
            GpuMetric::MemoryUsed => "GPU Memory Used",
        }
    }

    /// Maps a sensor kind back to the metric, if the tool can supply it.
    pub fn from_sensor_kind(kind: SensorKind) -> Option<Self> {
        GpuMetric::ALL.into_iter().find(|m| m.sensor_kind() == kind)
    }
}

/// One full sample line: `name, temperature, utilization, memory_used`.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuSample {
    /// Device name.
    pub name: String,
    /// Temperature in °C.
    pub temperature: f32,
    /// Utilisation in %.
    pub utilization: f32,
    /// Memory used in MB.
    pub memory_used: f32,
}

impl GpuSample {
    /// Parses a single CSV line.
    pub fn parse_csv(line: &str) -> Result<Self, VendorToolError> {
        let fields: Vec<&str> = line.trim().split(", ").collect();
        let [name, temperature, utilization, memory_used] = fields.as_slice() else {
            return Err(VendorToolError::Parse {
                output: line.to_string(),
                reason: format!("expected 4 fields, found {}", fields.len()),
            });
        };
        Ok(Self {
            name: name.trim().to_string(),
            temperature: parse_metric(temperature)?,
            utilization: parse_metric(utilization)?,
            memory_used: parse_metric(memory_used)?,
        })
    }

    /// The value for `metric`.
    pub fn value(&self, metric: GpuMetric) -> f32 {
        match metric {
            GpuMetric::Temperature => self.temperature,
            GpuMetric::Utilization => self.utilization,
            GpuMetric::MemoryUsed => self.memory_used,
        }
    }
}

/// Parses the bare integer printed by the device-count query.
///
/// The tool prints the count once per device, so only the first line is used.
pub fn parse_count(output: &str) -> Result<usize, VendorToolError> {
    let first = output.lines().next().unwrap_or("").trim();
    first.parse().map_err(|_| VendorToolError::Parse {
        output: output.to_string(),
        reason: "not a device count".into(),
    })
}

/// Parses a single numeric field.
pub fn parse_metric(output: &str) -> Result<f32, VendorToolError> {
    let first = output.lines().next().unwrap_or("").trim();
    first.parse().map_err(|_| VendorToolError::Parse {
        output: output.to_string(),
        reason: "not a number".into(),
    })
}

/// An external per-device GPU diagnostic tool.
pub trait VendorGpuTool: Send + Sync + Debug {
    /// Number of devices the tool can see.
    fn device_count(&self) -> Result<usize, VendorToolError>;

    /// A full sample of device `index`.
    fn sample(&self, index: usize) -> Result<GpuSample, VendorToolError>;

    /// A single metric of device `index`.
    fn query(&self, index: usize, metric: GpuMetric) -> Result<f32, VendorToolError>;
}
