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

//! Sensor enumeration, filtering, vendor fallback and refresh.

use crate::error::TelemetryError;
use crate::naming::format_name;
use ortho_core::telemetry::{
    GpuMetric, HardwareKind, HardwareTree, SensorHandle, SensorKind, SensorPath, SensorReading,
    VendorGpuTool,
};

/// The display group a selected sensor belongs to. Groups are shown in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorCategory {
    /// CPU total load.
    Cpu,
    /// GPU core load, temperature and memory use.
    Gpu,
    /// System memory load.
    Memory,
}

struct AllowRule {
    hardware: &'static [HardwareKind],
    sensors: &'static [SensorKind],
    names: &'static [&'static str],
    category: SensorCategory,
}

const ALLOW_LIST: [AllowRule; 3] = [
    AllowRule {
        hardware: &[HardwareKind::Cpu],
        sensors: &[SensorKind::Load],
        names: &["CPU Total"],
        category: SensorCategory::Cpu,
    },
    AllowRule {
        hardware: &[
            HardwareKind::GpuNvidia,
            HardwareKind::GpuAmd,
            HardwareKind::GpuIntel,
        ],
        sensors: &[SensorKind::Load, SensorKind::Temperature, SensorKind::SmallData],
        names: &["GPU Core", "GPU Memory Used"],
        category: SensorCategory::Gpu,
    },
    AllowRule {
        hardware: &[HardwareKind::Memory],
        sensors: &[SensorKind::Load],
        names: &["Memory"],
        category: SensorCategory::Memory,
    },
];

/// Returns the category of a sensor if it is on the allow-list.
pub fn categorize(handle: &SensorHandle) -> Option<SensorCategory> {
    ALLOW_LIST
        .iter()
        .find(|rule| {
            rule.hardware.contains(&handle.hardware_kind)
                && rule.sensors.contains(&handle.sensor_kind)
                && rule.names.contains(&handle.sensor_name.as_str())
        })
        .map(|rule| rule.category)
}

fn handle(
    hardware_name: &str,
    hardware_kind: HardwareKind,
    sensor_name: &str,
    sensor_kind: SensorKind,
    path: SensorPath,
    value: Option<f32>,
) -> SensorHandle {
    SensorHandle {
        display_name: format_name(hardware_name, hardware_kind, sensor_kind),
        hardware_name: hardware_name.to_string(),
        sensor_name: sensor_name.to_string(),
        hardware_kind,
        sensor_kind,
        path,
        last_value: value.unwrap_or(0.0),
    }
}

/// Collects the curated sensor set and keeps it up to date.
///
/// Owns the hardware tree; wrap it in a `Mutex` to share it between a
/// polling thread and readers.
#[derive(Debug)]
pub struct TelemetryCollector {
    tree: Box<dyn HardwareTree>,
    vendor: Option<Box<dyn VendorGpuTool>>,
    handles: Vec<SensorHandle>,
    collected: bool,
}

impl TelemetryCollector {
    /// Creates a collector over `tree`, with an optional vendor GPU tool
    /// used when the tree exposes no GPU sensors.
    pub fn new(tree: Box<dyn HardwareTree>, vendor: Option<Box<dyn VendorGpuTool>>) -> Self {
        Self {
            tree,
            vendor,
            handles: Vec::new(),
            collected: false,
        }
    }

    /// Flattens every sensor in the tree into handles.
    ///
    /// Within each hardware unit, sub-hardware sensors come before the
    /// unit's own sensors.
    pub fn enumerate(&self) -> Vec<SensorHandle> {
        let mut map = Vec::new();
        for (i, hardware) in self.tree.hardware().iter().enumerate() {
            for (j, sub) in hardware.sub_hardware.iter().enumerate() {
                for (k, sensor) in sub.sensors.iter().enumerate() {
                    map.push(handle(
                        &sub.name,
                        sub.kind,
                        &sensor.name,
                        sensor.kind,
                        SensorPath::SubHardware(i, j, k),
                        sensor.value,
                    ));
                }
            }
            for (j, sensor) in hardware.sensors.iter().enumerate() {
                map.push(handle(
                    &hardware.name,
                    hardware.kind,
                    &sensor.name,
                    sensor.kind,
                    SensorPath::Hardware(i, j),
                    sensor.value,
                ));
            }
        }
        map
    }

    /// Selects the allow-listed sensors, ordered CPU, GPU, memory, and stores
    /// them as the handle list. Falls back to the vendor tool when no GPU
    /// sensor is found in the tree.
    pub fn collect(&mut self) -> &[SensorHandle] {
        let mut cpu = Vec::new();
        let mut gpu = Vec::new();
        let mut memory = Vec::new();
        for handle in self.enumerate() {
            match categorize(&handle) {
                Some(SensorCategory::Cpu) => cpu.push(handle),
                Some(SensorCategory::Gpu) => gpu.push(handle),
                Some(SensorCategory::Memory) => memory.push(handle),
                None => {}
            }
        }
        if gpu.is_empty() {
            gpu = self.vendor_fallback();
        }
        log::info!(
            "Collected sensors: {} CPU, {} GPU, {} memory",
            cpu.len(),
            gpu.len(),
            memory.len()
        );

        self.handles = cpu;
        self.handles.append(&mut gpu);
        self.handles.append(&mut memory);
        self.collected = true;
        &self.handles
    }

    fn vendor_fallback(&self) -> Vec<SensorHandle> {
        let Some(vendor) = &self.vendor else {
            log::debug!("No GPU sensors found and no vendor tool configured");
            return Vec::new();
        };
        log::warn!("No GPU sensors in the hardware tree, falling back to the vendor tool");

        let count = match vendor.device_count() {
            Ok(count) => count,
            Err(e) => {
                log::warn!("Vendor GPU tool could not count devices: {e}");
                return Vec::new();
            }
        };

        let mut handles = Vec::new();
        for index in 0..count {
            let sample = match vendor.sample(index) {
                Ok(sample) => sample,
                Err(e) => {
                    log::warn!("Vendor GPU tool failed for device {index}: {e}");
                    continue;
                }
            };
            for metric in GpuMetric::ALL {
                handles.push(handle(
                    &sample.name,
                    HardwareKind::GpuNvidia,
                    metric.sensor_name(),
                    metric.sensor_kind(),
                    SensorPath::External(index),
                    Some(sample.value(metric)),
                ));
            }
        }
        handles
    }

    /// Whether [`TelemetryCollector::collect`] has run.
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// The collected handles.
    pub fn handles(&self) -> &[SensorHandle] {
        &self.handles
    }

    fn read(&mut self, path: SensorPath, kind: SensorKind) -> Result<f32, TelemetryError> {
        match path {
            SensorPath::External(device) => {
                let vendor = self
                    .vendor
                    .as_ref()
                    .ok_or(TelemetryError::NoVendorTool(path))?;
                let metric =
                    GpuMetric::from_sensor_kind(kind).ok_or(TelemetryError::UnsupportedMetric(kind))?;
                Ok(vendor.query(device, metric)?)
            }
            SensorPath::Hardware(hardware, _) | SensorPath::SubHardware(hardware, _, _) => {
                self.tree.update(hardware);
                let sensor = self
                    .tree
                    .sensor(path)
                    .ok_or(TelemetryError::PathOutOfRange(path))?;
                Ok(sensor.value.unwrap_or(0.0))
            }
        }
    }

    /// Re-reads `handle` in place. The strategy is chosen purely by its path:
    /// external paths query the vendor tool, tree paths update the owning
    /// hardware unit and read the sensor. On failure the value becomes `0`.
    pub fn refresh_handle(&mut self, handle: &mut SensorHandle) -> Result<f32, TelemetryError> {
        let result = self.read(handle.path, handle.sensor_kind);
        handle.last_value = *result.as_ref().unwrap_or(&0.0);
        result
    }

    /// Refreshes the collected handle at `index`.
    pub fn refresh(&mut self, index: usize) -> Result<f32, TelemetryError> {
        let (path, kind) = self
            .handles
            .get(index)
            .map(|handle| (handle.path, handle.sensor_kind))
            .ok_or(TelemetryError::UnknownHandle(index))?;
        let result = self.read(path, kind);
        self.handles[index].last_value = *result.as_ref().unwrap_or(&0.0);
        result
    }

    /// Refreshes every collected handle and returns the formatted readings in
    /// handle order. Individual failures read as `0`.
    pub fn refresh_all(&mut self) -> Vec<SensorReading> {
        for index in 0..self.handles.len() {
            if let Err(e) = self.refresh(index) {
                log::debug!("Sensor refresh failed: {e}");
            }
        }
        log::trace!("Refreshed {} sensors", self.handles.len());
        self.readings()
    }

    /// Current readings without refreshing.
    pub fn readings(&self) -> Vec<SensorReading> {
        self.handles.iter().map(SensorHandle::reading).collect()
    }
}
