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

//! sysinfo-based implementation of the HardwareTree trait.

use ortho_core::telemetry::{HardwareKind, HardwareNode, HardwareTree, SensorKind, SensorNode};
use std::fmt;
use sysinfo::{Components, System};

const BYTES_PER_GB: f32 = 1024.0 * 1024.0 * 1024.0;

/// What a top-level node is rebuilt from on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Cpu,
    Memory,
    Components,
}

/// A sensor tree backed by the `sysinfo` crate.
///
/// Layout:
/// - `Cpu`: `CPU Total` load, one load per logical core, then CPU temperatures.
/// - `Memory`: `Memory` load, `Memory Used` and `Memory Available` in GB.
/// - `Motherboard` (only when other thermal components exist): their temperatures.
pub struct SysinfoTree {
    system: System,
    nodes: Vec<HardwareNode>,
    sources: Vec<Source>,
}

fn is_cpu_component(label: &str) -> bool {
    let label = label.to_lowercase();
    label.contains("cpu")
        || label.contains("core")
        || label.contains("package")
        || label.contains("k10temp")
        || label.contains("tctl")
}

impl SysinfoTree {
    /// Opens the tree and takes an initial sample.
    pub fn new() -> Self {
        let mut system = System::new_all();
        system.refresh_all();

        let mut tree = Self {
            system,
            nodes: Vec::new(),
            sources: Vec::new(),
        };
        tree.nodes.push(tree.cpu_node(&Components::new_with_refreshed_list()));
        tree.sources.push(Source::Cpu);
        tree.nodes.push(tree.memory_node());
        tree.sources.push(Source::Memory);

        if let Some(board) = Self::board_node(&Components::new_with_refreshed_list()) {
            tree.nodes.push(board);
            tree.sources.push(Source::Components);
        }
        log::info!(
            "sysinfo sensor tree opened with {} hardware units",
            tree.nodes.len()
        );
        tree
    }

    fn cpu_node(&self, components: &Components) -> HardwareNode {
        let cpus = self.system.cpus();
        let name = cpus
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "CPU".to_string());

        let mut node = HardwareNode::new(name, HardwareKind::Cpu).with_sensor(SensorNode::new(
            "CPU Total",
            SensorKind::Load,
            Some(self.system.global_cpu_usage()),
        ));
        for (i, cpu) in cpus.iter().enumerate() {
            node.sensors.push(SensorNode::new(
                format!("CPU Core #{}", i + 1),
                SensorKind::Load,
                Some(cpu.cpu_usage()),
            ));
        }
        for component in components.into_iter().filter(|c| is_cpu_component(c.label())) {
            node.sensors.push(SensorNode::new(
                component.label(),
                SensorKind::Temperature,
                component.temperature(),
            ));
        }
        node
    }

    fn memory_node(&self) -> HardwareNode {
        let total = self.system.total_memory();
        let used = self.system.used_memory();
        let load = (total > 0).then(|| used as f32 / total as f32 * 100.0);
        HardwareNode::new("Generic Memory", HardwareKind::Memory)
            .with_sensor(SensorNode::new("Memory", SensorKind::Load, load))
            .with_sensor(SensorNode::new(
                "Memory Used",
                SensorKind::Data,
                Some(used as f32 / BYTES_PER_GB),
            ))
            .with_sensor(SensorNode::new(
                "Memory Available",
                SensorKind::Data,
                Some(total.saturating_sub(used) as f32 / BYTES_PER_GB),
            ))
    }

    fn board_node(components: &Components) -> Option<HardwareNode> {
        let sensors: Vec<SensorNode> = components
            .into_iter()
            .filter(|c| !is_cpu_component(c.label()))
            .map(|c| SensorNode::new(c.label(), SensorKind::Temperature, c.temperature()))
            .collect();
        if sensors.is_empty() {
            return None;
        }
        let mut node = HardwareNode::new("Motherboard", HardwareKind::Motherboard);
        node.sensors = sensors;
        Some(node)
    }

    /// Rewrites sensor values in place, keeping positions stable. Sensors that
    /// disappeared read as unavailable.
    fn merge_values(target: &mut HardwareNode, fresh: HardwareNode) {
        for sensor in &mut target.sensors {
            sensor.value = fresh
                .sensors
                .iter()
                .find(|s| s.name == sensor.name && s.kind == sensor.kind)
                .and_then(|s| s.value);
        }
    }
}

impl HardwareTree for SysinfoTree {
    fn hardware(&self) -> &[HardwareNode] {
        &self.nodes
    }

    fn update(&mut self, index: usize) {
        let Some(source) = self.sources.get(index).copied() else {
            log::warn!("Ignoring update of unknown hardware index {index}");
            return;
        };
        let fresh = match source {
            Source::Cpu => {
                self.system.refresh_cpu_all();
                Some(self.cpu_node(&Components::new_with_refreshed_list()))
            }
            Source::Memory => {
                self.system.refresh_memory();
                Some(self.memory_node())
            }
            Source::Components => Self::board_node(&Components::new_with_refreshed_list()),
        };
        if let Some(target) = self.nodes.get_mut(index) {
            match fresh {
                Some(fresh) => Self::merge_values(target, fresh),
                None => target.sensors.iter_mut().for_each(|s| s.value = None),
            }
        }
    }
}

impl fmt::Debug for SysinfoTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SysinfoTree")
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

impl Default for SysinfoTree {
    fn default() -> Self {
        Self::new()
    }
}
