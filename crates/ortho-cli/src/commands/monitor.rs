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

//! Live hardware sensor monitor.

use anyhow::{bail, Result};
use ortho_infra::{NvidiaSmi, SysinfoTree};
use ortho_telemetry::{PollingConfig, PollingMode, TelemetryCollector, TelemetryPoller};

pub fn run(full: bool, passes: u64) -> Result<()> {
    let mode = if full {
        PollingMode::Full
    } else {
        PollingMode::Compact
    };
    let collector = TelemetryCollector::new(
        Box::new(SysinfoTree::new()),
        Some(Box::new(NvidiaSmi::new())),
    );
    let (mut poller, snapshots) = TelemetryPoller::new(collector, PollingConfig::for_mode(mode));
    poller.start();

    for snapshot in snapshots.iter().take(passes as usize) {
        if snapshot.readings.is_empty() {
            poller.stop();
            bail!("No supported sensors found on this machine");
        }
        let line: Vec<String> = snapshot.readings.iter().map(ToString::to_string).collect();
        println!("[{:>4}] {}", snapshot.pass, line.join("  |  "));
    }

    poller.stop();
    Ok(())
}
