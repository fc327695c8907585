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

//! Render-capable device classification from the renderer's device probe.
//!
//! The probe script prints a JSON object `{ "OPTIX": [..], "CUDA": [..],
//! "CPU": [..] }` somewhere in the renderer's stdout, surrounded by the
//! renderer's own banner and log lines.

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::fmt;

/// Device names grouped by the framework that lists them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceProbe {
    /// Devices usable with OptiX.
    #[serde(rename = "OPTIX")]
    pub optix: Vec<String>,
    /// Devices usable with CUDA.
    #[serde(rename = "CUDA")]
    pub cuda: Vec<String>,
    /// CPU devices.
    #[serde(rename = "CPU")]
    pub cpu: Vec<String>,
}

impl DeviceProbe {
    /// Extracts and parses the JSON object embedded in `output`.
    pub fn parse(output: &str) -> CoreResult<Self> {
        let (start, end) = match (output.find('{'), output.rfind('}')) {
            (Some(start), Some(end)) if start < end => (start, end),
            _ => {
                return Err(CoreError::Probe(
                    "no JSON object in renderer output".into(),
                ))
            }
        };
        serde_json::from_str(&output[start..=end]).map_err(|e| CoreError::Probe(e.to_string()))
    }

    /// Merges the framework listings into one entry per device name.
    ///
    /// Devices keep the order in which they are first listed
    /// (OPTIX, then CUDA, then CPU).
    pub fn devices(&self) -> Vec<RenderDevice> {
        let mut devices: Vec<RenderDevice> = Vec::new();
        let mut add = |name: &str, frameworks: &[Framework]| {
            let index = match devices.iter().position(|d| d.name == name) {
                Some(index) => index,
                None => {
                    devices.push(RenderDevice {
                        name: name.to_string(),
                        kind: DeviceKind::Gpu,
                        frameworks: Vec::new(),
                    });
                    devices.len() - 1
                }
            };
            let device = &mut devices[index];
            for framework in frameworks {
                if !device.frameworks.contains(framework) {
                    device.frameworks.push(*framework);
                }
            }
        };

        for name in &self.optix {
            add(name, &[Framework::Optix, Framework::Cuda]);
        }
        for name in &self.cuda {
            add(name, &[Framework::Cuda]);
        }
        for name in &self.cpu {
            add(name, &[Framework::CpuCycles]);
        }

        for device in &mut devices {
            device.kind = DeviceKind::classify(&device.frameworks);
        }
        devices
    }

    /// The best framework available on this machine.
    pub fn preferred_framework(&self) -> Framework {
        if !self.optix.is_empty() {
            Framework::Optix
        } else if !self.cuda.is_empty() {
            Framework::Cuda
        } else {
            Framework::CpuCycles
        }
    }
}

/// A rendering backend a device can be driven through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    /// NVIDIA OptiX.
    Optix,
    /// NVIDIA CUDA.
    Cuda,
    /// Cycles on the CPU.
    CpuCycles,
}

impl Framework {
    /// Label as printed by the probe.
    pub fn label(self) -> &'static str {
        match self {
            Framework::Optix => "OPTIX",
            Framework::Cuda => "CUDA",
            Framework::CpuCycles => "CPU CYCLES",
        }
    }

    /// Render engine used with this framework.
    pub fn engine(self) -> &'static str {
        match self {
            Framework::Optix | Framework::Cuda => "CYCLES",
            Framework::CpuCycles => "BLENDER_EEVEE_NEXT",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Device category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A processor.
    Cpu,
    /// A graphics card.
    Gpu,
}

impl DeviceKind {
    /// A device is a CPU only when CPU Cycles is its sole framework.
    pub fn classify(frameworks: &[Framework]) -> Self {
        if frameworks == [Framework::CpuCycles] {
            DeviceKind::Cpu
        } else {
            DeviceKind::Gpu
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceKind::Cpu => "CPU",
            DeviceKind::Gpu => "GPU",
        })
    }
}

/// A device the renderer can use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDevice {
    /// Device name as reported by the renderer.
    pub name: String,
    /// CPU or GPU.
    pub kind: DeviceKind,
    /// Frameworks the device is listed under.
    pub frameworks: Vec<Framework>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = r#"Blender 4.2.0 (hash a51f293548ad built 2024-07-16)
Read prefs: "/home/u/.config/blender/4.2/config/userpref.blend"
{
    "OPTIX": ["NVIDIA GeForce RTX 3070"],
    "CUDA": ["NVIDIA GeForce RTX 3070"],
    "CPU": ["AMD Ryzen 7 5800X"]
}

Blender quit
"#;

    #[test]
    fn test_parse_embedded_json() {
        let probe = DeviceProbe::parse(OUTPUT).unwrap();
        assert_eq!(probe.optix, vec!["NVIDIA GeForce RTX 3070"]);
        assert_eq!(probe.cpu, vec!["AMD Ryzen 7 5800X"]);
    }

    #[test]
    fn test_devices_are_merged_and_classified() {
        let devices = DeviceProbe::parse(OUTPUT).unwrap().devices();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "NVIDIA GeForce RTX 3070");
        assert_eq!(devices[0].kind, DeviceKind::Gpu);
        assert_eq!(devices[0].frameworks, vec![Framework::Optix, Framework::Cuda]);
        assert_eq!(devices[1].kind, DeviceKind::Cpu);
        assert_eq!(devices[1].frameworks, vec![Framework::CpuCycles]);
    }

    #[test]
    fn test_preferred_framework() {
        let probe = DeviceProbe::parse(OUTPUT).unwrap();
        assert_eq!(probe.preferred_framework(), Framework::Optix);
        assert_eq!(probe.preferred_framework().engine(), "CYCLES");

        let cpu_only = DeviceProbe::parse(r#"{"OPTIX":[],"CUDA":[],"CPU":["cpu"]}"#).unwrap();
        assert_eq!(cpu_only.preferred_framework(), Framework::CpuCycles);
        assert_eq!(cpu_only.preferred_framework().engine(), "BLENDER_EEVEE_NEXT");
    }

    #[test]
    fn test_missing_key_fails_fast() {
        assert!(matches!(
            DeviceProbe::parse(r#"{"OPTIX":[],"CPU":[]}"#),
            Err(CoreError::Probe(_))
        ));
        assert!(DeviceProbe::parse("no devices here").is_err());
        assert!(DeviceProbe::parse(r#"{"OPTIX":null,"CUDA":[],"CPU":[]}"#).is_err());
    }
}
