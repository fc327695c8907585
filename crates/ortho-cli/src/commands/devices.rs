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

//! Render device probe command.

use anyhow::{Context, Result};
use ortho_infra::probe_devices;
use std::path::Path;

pub fn run(renderer: &Path, script: &Path) -> Result<()> {
    let probe = probe_devices(renderer, script).with_context(|| {
        format!(
            "Failed to probe render devices with '{}'",
            renderer.display()
        )
    })?;

    println!("Render devices:");
    for device in probe.devices() {
        let frameworks: Vec<&str> = device.frameworks.iter().map(|f| f.label()).collect();
        println!(
            "  {:<40} {:<4} {}",
            device.name,
            device.kind.to_string(),
            frameworks.join(", ")
        );
    }

    let preferred = probe.preferred_framework();
    println!(
        "\nPreferred: {} (engine {})",
        preferred.label(),
        preferred.engine()
    );
    Ok(())
}
