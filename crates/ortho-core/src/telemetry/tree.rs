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

//! The hardware sensor tree abstraction.

use super::sensor::{HardwareKind, SensorKind, SensorPath};
use std::fmt::Debug;

/// A single sensor within a hardware unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorNode {
    /// Sensor name, e.g. `GPU Core`.
    pub name: String,
    /// What is measured.
    pub kind: SensorKind,
    /// Latest value, or `None` when the sensor is currently unavailable.
    pub value: Option<f32>,
}

impl SensorNode {
    /// Creates a sensor node.
    pub fn new(name: impl Into<String>, kind: SensorKind, value: Option<f32>) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
        }
    }
}

/// A hardware unit with its sensors and at most one further level of
/// sub-hardware.
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareNode {
    /// Unit name, e.g. `NVIDIA GeForce RTX 3070`.
    pub name: String,
    /// Unit category.
    pub kind: HardwareKind,
    /// Sensors attached directly to the unit.
    pub sensors: Vec<SensorNode>,
    /// Nested units (for example a motherboard's super-I/O chip).
    pub sub_hardware: Vec<HardwareNode>,
}

impl HardwareNode {
    /// Creates a unit with no sensors.
    pub fn new(name: impl Into<String>, kind: HardwareKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sensors: Vec::new(),
            sub_hardware: Vec::new(),
        }
    }

    /// Builder-style sensor attachment.
    pub fn with_sensor(mut self, sensor: SensorNode) -> Self {
        self.sensors.push(sensor);
        self
    }

    /// Builder-style sub-hardware attachment.
    pub fn with_sub_hardware(mut self, sub: HardwareNode) -> Self {
        self.sub_hardware.push(sub);
        self
    }
}

/// A platform-specific source of hardware sensor values.
///
/// Implementations live in `ortho-infra`; tests use in-memory fakes.
pub trait HardwareTree: Send + Debug {
    /// The top-level hardware units.
    fn hardware(&self) -> &[HardwareNode];

    /// Re-samples every sensor of the unit at `index`, including its sub-hardware.
    fn update(&mut self, index: usize);

    /// Looks up the sensor addressed by a 2- or 3-index path.
    ///
    /// Returns `None` for external paths and for indices outside the tree.
    fn sensor(&self, path: SensorPath) -> Option<&SensorNode> {
        let hardware = self.hardware();
        match path {
            SensorPath::External(_) => None,
            SensorPath::Hardware(i, j) => hardware.get(i)?.sensors.get(j),
            SensorPath::SubHardware(i, j, k) => {
                hardware.get(i)?.sub_hardware.get(j)?.sensors.get(k)
            }
        }
    }
}
