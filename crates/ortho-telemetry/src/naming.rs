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

//! Display-name formatting for sensor labels.

use ortho_core::telemetry::{HardwareKind, SensorKind};

/// Substrings removed from hardware names before display.
pub const VENDOR_NOISE: [&str; 6] = ["Generic ", "NVIDIA", "Intel", "AMD", "GeForce", "Laptop"];

/// Longest label shown before truncation.
pub const MAX_LABEL_CHARS: usize = 18;

/// Builds a compact label for a sensor on the hardware unit `hardware_name`.
///
/// Vendor noise is removed, whitespace is collapsed, and a trailing
/// single-character index such as `" 1"` is dropped. GPU memory sensors get
/// a `VRAM` suffix and temperature sensors a `Temp` suffix. Labels longer
/// than [`MAX_LABEL_CHARS`] are cut and end in `...`.
///
/// ```
/// use ortho_core::telemetry::{HardwareKind, SensorKind};
/// use ortho_telemetry::naming::format_name;
///
/// let label = format_name("NVIDIA GeForce RTX 3070", HardwareKind::GpuNvidia, SensorKind::Temperature);
/// assert_eq!(label, "RTX 3070 Temp");
/// ```
pub fn format_name(hardware_name: &str, hardware_kind: HardwareKind, sensor_kind: SensorKind) -> String {
    let mut name = hardware_name.to_string();
    for noise in VENDOR_NOISE {
        name = name.replace(noise, "");
    }
    let mut name = name.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut tail = name.chars().rev();
    if let (Some(last), Some(' ')) = (tail.next(), tail.next()) {
        if last.is_alphanumeric() {
            name.truncate(name.len() - last.len_utf8() - 1);
        }
    }
    let mut name = name.trim().to_string();

    if hardware_kind.is_gpu() && sensor_kind == SensorKind::SmallData {
        name.push_str(" VRAM");
    }
    if sensor_kind == SensorKind::Temperature {
        name.push_str(" Temp");
    }

    if name.chars().count() > MAX_LABEL_CHARS {
        let mut cut: String = name.chars().take(MAX_LABEL_CHARS).collect();
        cut.push_str("...");
        return cut;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_labels() {
        let name = "NVIDIA GeForce RTX 3070";
        assert_eq!(
            format_name(name, HardwareKind::GpuNvidia, SensorKind::Load),
            "RTX 3070"
        );
        assert_eq!(
            format_name(name, HardwareKind::GpuNvidia, SensorKind::SmallData),
            "RTX 3070 VRAM"
        );
        assert_eq!(
            format_name(name, HardwareKind::GpuNvidia, SensorKind::Temperature),
            "RTX 3070 Temp"
        );
    }

    #[test]
    fn test_memory_label() {
        assert_eq!(
            format_name("Generic Memory", HardwareKind::Memory, SensorKind::Load),
            "Memory"
        );
    }

    #[test]
    fn test_trailing_index_is_stripped() {
        assert_eq!(
            format_name("Intel Core i5 1", HardwareKind::Cpu, SensorKind::Load),
            "Core i5"
        );
        assert_eq!(
            format_name("Radeon   Graphics  A", HardwareKind::GpuAmd, SensorKind::Load),
            "Radeon Graphics"
        );
        // Only a single trailing character counts as an index.
        assert_eq!(
            format_name("Arc A770", HardwareKind::GpuIntel, SensorKind::Load),
            "Arc A770"
        );
    }

    #[test]
    fn test_long_names_are_truncated() {
        let label = format_name(
            "AMD Ryzen 7 5800X 8-Core Processor",
            HardwareKind::Cpu,
            SensorKind::Load,
        );
        assert_eq!(label, "Ryzen 7 5800X 8-Co...");
        assert_eq!(label.chars().count(), MAX_LABEL_CHARS + 3);
    }

    #[test]
    fn test_combined_rules() {
        let label = format_name(
            "NVIDIA GeForce   RTX 4090   Laptop GPU 0",
            HardwareKind::GpuNvidia,
            SensorKind::Load,
        );
        assert_eq!(label, "RTX 4090 GPU");

        let label = format_name(
            "NVIDIA GeForce RTX 4090 Laptop GPU 0",
            HardwareKind::GpuNvidia,
            SensorKind::SmallData,
        );
        assert_eq!(label, "RTX 4090 GPU VRAM");
    }

    #[test]
    fn test_exactly_max_is_kept() {
        let label = format_name("ABCDEFGHIJKLMNOPQR", HardwareKind::Cpu, SensorKind::Load);
        assert_eq!(label, "ABCDEFGHIJKLMNOPQR");
    }
}
