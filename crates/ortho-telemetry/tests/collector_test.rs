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

use ortho_core::telemetry::{
    GpuMetric, GpuSample, HardwareKind, HardwareNode, HardwareTree, SensorKind, SensorNode,
    SensorPath, VendorGpuTool, VendorToolError,
};
use ortho_telemetry::{TelemetryCollector, TelemetryError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct FakeTree {
    nodes: Vec<HardwareNode>,
    updates: Arc<Mutex<Vec<usize>>>,
}

impl HardwareTree for FakeTree {
    fn hardware(&self) -> &[HardwareNode] {
        &self.nodes
    }

    fn update(&mut self, index: usize) {
        self.updates.lock().unwrap().push(index);
        if index == 0 {
            self.nodes[0].sensors[0].value = Some(75.0);
        }
    }
}

#[derive(Debug, Default)]
struct FakeVendor {
    failing: Arc<AtomicBool>,
}

impl VendorGpuTool for FakeVendor {
    fn device_count(&self) -> Result<usize, VendorToolError> {
        Ok(2)
    }

    fn sample(&self, index: usize) -> Result<GpuSample, VendorToolError> {
        match index {
            0 => Ok(GpuSample {
                name: "NVIDIA GeForce RTX 3060".into(),
                temperature: 51.0,
                utilization: 12.0,
                memory_used: 1024.0,
            }),
            _ => Err(VendorToolError::Invocation("device lost".into())),
        }
    }

    fn query(&self, _index: usize, metric: GpuMetric) -> Result<f32, VendorToolError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VendorToolError::Invocation("driver not loaded".into()));
        }
        Ok(match metric {
            GpuMetric::Temperature => 60.0,
            GpuMetric::Utilization => 99.5,
            GpuMetric::MemoryUsed => 2048.0,
        })
    }
}

fn host(gpu: HardwareNode) -> (FakeTree, Arc<Mutex<Vec<usize>>>) {
    let updates = Arc::new(Mutex::new(Vec::new()));
    let tree = FakeTree {
        nodes: vec![
            HardwareNode::new("Intel Core i7-9700K", HardwareKind::Cpu)
                .with_sensor(SensorNode::new("CPU Total", SensorKind::Load, Some(10.0)))
                .with_sensor(SensorNode::new("CPU Core #1", SensorKind::Load, Some(20.0))),
            gpu,
            HardwareNode::new("Generic Memory", HardwareKind::Memory)
                .with_sensor(SensorNode::new("Memory", SensorKind::Load, Some(42.5)))
                .with_sensor(SensorNode::new("Memory Used", SensorKind::Data, Some(6.7))),
        ],
        updates: Arc::clone(&updates),
    };
    (tree, updates)
}

#[test]
fn test_collect_uses_tree_gpu_sensors_when_present() {
    // --- 1. ARRANGE ---
    let gpu = HardwareNode::new("AMD Radeon RX 6800", HardwareKind::GpuAmd)
        .with_sensor(SensorNode::new("GPU Core", SensorKind::Temperature, Some(55.0)))
        .with_sensor(SensorNode::new("GPU Core", SensorKind::Load, Some(30.0)))
        .with_sensor(SensorNode::new("GPU Hot Spot", SensorKind::Temperature, Some(70.0)));
    let (tree, _) = host(gpu);
    let mut collector = TelemetryCollector::new(Box::new(tree), Some(Box::new(FakeVendor::default())));

    // --- 2. ACT ---
    let handles = collector.collect().to_vec();

    // --- 3. ASSERT ---
    let labels: Vec<&str> = handles.iter().map(|h| h.display_name.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Core i7-9700K", "Radeon RX 6800 Tem...", "Radeon RX 6800", "Memory"]
    );
    assert!(handles
        .iter()
        .all(|h| !matches!(h.path, SensorPath::External(_))));
    assert!(collector.is_collected());
}

#[test]
fn test_collect_falls_back_to_vendor_tool() {
    // --- 1. ARRANGE ---
    let gpu = HardwareNode::new("NVIDIA GeForce RTX 3060", HardwareKind::GpuNvidia)
        .with_sensor(SensorNode::new("GPU Hot Spot", SensorKind::Temperature, Some(70.0)));
    let (tree, _) = host(gpu);
    let mut collector = TelemetryCollector::new(Box::new(tree), Some(Box::new(FakeVendor::default())));

    // --- 2. ACT ---
    collector.collect();
    let readings: Vec<String> = collector.readings().iter().map(|r| r.to_string()).collect();

    // --- 3. ASSERT ---
    // Device 1 fails to sample and is skipped.
    assert_eq!(
        readings,
        vec![
            "Core i7-9700K: 10.00 %",
            "RTX 3060 Temp: 51.00 °C",
            "RTX 3060: 12.00 %",
            "RTX 3060 VRAM: 1024.00 MB",
            "Memory: 42.50 %",
        ]
    );
    assert_eq!(collector.handles()[1].path, SensorPath::External(0));
}

#[test]
fn test_no_gpu_and_no_vendor_tool() {
    let gpu = HardwareNode::new("Intel Arc A770", HardwareKind::GpuIntel);
    let (tree, _) = host(gpu);
    let mut collector = TelemetryCollector::new(Box::new(tree), None);
    assert_eq!(collector.collect().len(), 2);
}

#[test]
fn test_refresh_dispatches_on_path() {
    // --- 1. ARRANGE ---
    let gpu = HardwareNode::new("NVIDIA GeForce RTX 3060", HardwareKind::GpuNvidia);
    let (tree, updates) = host(gpu);
    let failing = Arc::new(AtomicBool::new(false));
    let vendor = FakeVendor {
        failing: Arc::clone(&failing),
    };
    let mut collector = TelemetryCollector::new(Box::new(tree), Some(Box::new(vendor)));
    collector.collect();

    // --- 2. ACT ---
    let readings = collector.refresh_all();

    // --- 3. ASSERT ---
    let values: Vec<&str> = readings.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["75.00", "60.00", "99.50", "2048.00", "42.50"]);
    // Only tree-backed handles touch the tree; each updates its own unit.
    assert_eq!(*updates.lock().unwrap(), vec![0, 2]);

    failing.store(true, Ordering::SeqCst);
    assert!(matches!(
        collector.refresh(1),
        Err(TelemetryError::Vendor(VendorToolError::Invocation(_)))
    ));
    assert_eq!(collector.handles()[1].last_value, 0.0);

    let readings = collector.refresh_all();
    assert_eq!(readings.len(), 5);
    assert_eq!(readings[2].value, "0.00");
    assert_eq!(readings[4].value, "42.50");
}

/// A tree whose only GPU lives as sub-hardware of the mainboard, the way
/// integrated graphics are reported.
#[derive(Debug)]
struct NestedGpuTree {
    nodes: Vec<HardwareNode>,
    updates: Arc<Mutex<Vec<usize>>>,
}

impl HardwareTree for NestedGpuTree {
    fn hardware(&self) -> &[HardwareNode] {
        &self.nodes
    }

    fn update(&mut self, index: usize) {
        self.updates.lock().unwrap().push(index);
        if let Some(sub) = self.nodes[index].sub_hardware.first_mut() {
            sub.sensors[1].value = Some(64.0);
        }
    }
}

#[test]
fn test_refresh_reads_updated_sub_hardware_sensor() {
    // --- 1. ARRANGE ---
    let updates = Arc::new(Mutex::new(Vec::new()));
    let tree = NestedGpuTree {
        nodes: vec![
            HardwareNode::new("Intel Core i5-12400", HardwareKind::Cpu)
                .with_sensor(SensorNode::new("CPU Total", SensorKind::Load, Some(10.0))),
            HardwareNode::new("ASUS PRIME B660", HardwareKind::Motherboard).with_sub_hardware(
                HardwareNode::new("Intel UHD Graphics 730", HardwareKind::GpuIntel)
                    .with_sensor(SensorNode::new("GPU Hot Spot", SensorKind::Temperature, Some(50.0)))
                    .with_sensor(SensorNode::new("GPU Core", SensorKind::Load, Some(5.0))),
            ),
        ],
        updates: Arc::clone(&updates),
    };
    let mut collector = TelemetryCollector::new(Box::new(tree), None);
    collector.collect();
    assert_eq!(collector.handles()[1].path, SensorPath::SubHardware(1, 0, 1));
    assert_eq!(collector.handles()[1].last_value, 5.0);

    // --- 2. ACT ---
    let value = collector.refresh(1).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(value, 64.0);
    assert_eq!(collector.handles()[1].last_value, 64.0);
    assert_eq!(*updates.lock().unwrap(), vec![1]);
}
