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

//! Sensor handles and the values they produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a hardware unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HardwareKind {
    /// A CPU package.
    Cpu,
    /// An NVIDIA GPU.
    GpuNvidia,
    /// An AMD GPU.
    GpuAmd,
    /// An Intel GPU.
    GpuIntel,
    /// System memory.
    Memory,
    /// Mainboard or embedded controller.
    Motherboard,
    /// A storage device.
    Storage,
    /// A network adapter.
    Network,
}

impl HardwareKind {
    /// Whether this is one of the GPU kinds.
    pub fn is_gpu(self) -> bool {
        matches!(
            self,
            HardwareKind::GpuNvidia | HardwareKind::GpuAmd | HardwareKind::GpuIntel
        )
    }
}

/// The quantity a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SensorKind {
    Load,
    Power,
    Clock,
    Voltage,
    Temperature,
    Data,
    Fan,
    SmallData,
    Throughput,
    Factor,
    Control,
}

impl SensorKind {
    /// Display unit for values of this kind.
    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Load => "%",
            SensorKind::Power => "W",
            SensorKind::Clock => "MHz",
            SensorKind::Voltage => "V",
            SensorKind::Temperature => "°C",
            SensorKind::Data => "GB",
            SensorKind::Fan => "RPM",
            SensorKind::SmallData => "MB",
            SensorKind::Throughput => "KB/s",
            SensorKind::Factor | SensorKind::Control => "?",
        }
    }
}

/// Where a sensor's value is re-read from on refresh.
///
/// The variant is fixed at collection time and determines the refresh
/// strategy for the lifetime of the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorPath {
    /// Sourced from the vendor diagnostic tool for the given device index.
    External(usize),
    /// `hardware[0].sensors[1]`.
    Hardware(usize, usize),
    /// `hardware[0].sub_hardware[1].sensors[2]`.
    SubHardware(usize, usize, usize),
}

impl SensorPath {
    /// The path as a list of 1 to 3 indices.
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            SensorPath::External(i) => vec![i],
            SensorPath::Hardware(i, j) => vec![i, j],
            SensorPath::SubHardware(i, j, k) => vec![i, j, k],
        }
    }

    /// Number of indices in the path.
    pub fn len(&self) -> usize {
        match self {
            SensorPath::External(_) => 1,
            SensorPath::Hardware(..) => 2,
            SensorPath::SubHardware(..) => 3,
        }
    }

    /// Always false; a path has at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Builds a path from raw indices. Returns `None` unless there are 1 to 3.
    pub fn from_indices(indices: &[usize]) -> Option<Self> {
        match *indices {
            [i] => Some(SensorPath::External(i)),
            [i, j] => Some(SensorPath::Hardware(i, j)),
            [i, j, k] => Some(SensorPath::SubHardware(i, j, k)),
            _ => None,
        }
    }
}

impl fmt::Display for SensorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.indices())
    }
}

/// A collected sensor, refreshable in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorHandle {
    /// Formatted label shown to the user.
    pub display_name: String,
    /// Raw name of the hardware unit the sensor belongs to.
    pub hardware_name: String,
    /// Raw sensor name, e.g. `CPU Total`.
    pub sensor_name: String,
    /// Kind of the owning hardware unit.
    pub hardware_kind: HardwareKind,
    /// What is measured.
    pub sensor_kind: SensorKind,
    /// Where to re-read the value.
    pub path: SensorPath,
    /// Most recent value; unavailable readings are stored as `0`.
    pub last_value: f32,
}

impl SensorHandle {
    /// Display unit for this sensor.
    pub fn unit(&self) -> &'static str {
        self.sensor_kind.unit()
    }

    /// Snapshot of the current value for display.
    pub fn reading(&self) -> SensorReading {
        SensorReading {
            label: self.display_name.clone(),
            value: format!("{:.2}", self.last_value),
            unit: self.unit(),
        }
    }
}

/// A formatted value ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Sensor label.
    pub label: String,
    /// Value with two decimals.
    pub value: String,
    /// Display unit.
    pub unit: &'static str,
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.label, self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(SensorKind::Load.unit(), "%");
        assert_eq!(SensorKind::Temperature.unit(), "°C");
        assert_eq!(SensorKind::SmallData.unit(), "MB");
        assert_eq!(SensorKind::Throughput.unit(), "KB/s");
        assert_eq!(SensorKind::Control.unit(), "?");
    }

    #[test]
    fn test_path_indices() {
        assert_eq!(SensorPath::External(2).indices(), vec![2]);
        assert_eq!(SensorPath::SubHardware(0, 1, 4).len(), 3);
        assert_eq!(
            SensorPath::from_indices(&[3, 1]),
            Some(SensorPath::Hardware(3, 1))
        );
        assert_eq!(SensorPath::from_indices(&[]), None);
        assert_eq!(SensorPath::from_indices(&[0, 0, 0, 0]), None);
    }

    #[test]
    fn test_reading_formats_two_decimals() {
        let handle = SensorHandle {
            display_name: "RTX 3070 Temp".into(),
            hardware_name: "NVIDIA GeForce RTX 3070".into(),
            sensor_name: "Temperature".into(),
            hardware_kind: HardwareKind::GpuNvidia,
            sensor_kind: SensorKind::Temperature,
            path: SensorPath::External(0),
            last_value: 41.0,
        };
        let reading = handle.reading();
        assert_eq!(reading.value, "41.00");
        assert_eq!(reading.to_string(), "RTX 3070 Temp: 41.00 °C");
    }

    #[test]
    fn test_gpu_kinds() {
        assert!(HardwareKind::GpuAmd.is_gpu());
        assert!(!HardwareKind::Memory.is_gpu());
    }
}
