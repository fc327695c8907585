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

//! `nvidia-smi` as the vendor GPU diagnostic tool.

use crate::process::{ProcessError, ProcessRunner};
use ortho_core::telemetry::{
    parse_count, parse_metric, GpuMetric, GpuSample, VendorGpuTool, VendorToolError,
};
use std::path::PathBuf;

const CSV_FORMAT: &str = "--format=csv,noheader,nounits";

/// Queries NVIDIA GPUs through the `nvidia-smi` executable.
#[derive(Debug, Clone)]
pub struct NvidiaSmi {
    program: PathBuf,
    runner: ProcessRunner,
}

impl NvidiaSmi {
    /// Uses `nvidia-smi` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("nvidia-smi")
    }

    /// Uses a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            runner: ProcessRunner::new(),
        }
    }

    fn invoke(&self, args: &[String]) -> Result<String, VendorToolError> {
        self.runner
            .run(&self.program, args)
            .map_err(|e: ProcessError| VendorToolError::Invocation(e.to_string()))
    }

    /// Arguments for a single-metric query of device `index`.
    pub fn metric_args(index: usize, metric: GpuMetric) -> Vec<String> {
        vec![
            "-i".to_string(),
            index.to_string(),
            format!("--query-gpu={}", metric.query_field()),
            CSV_FORMAT.to_string(),
        ]
    }

    /// Arguments for a full sample of device `index`.
    pub fn sample_args(index: usize) -> Vec<String> {
        vec![
            "-i".to_string(),
            index.to_string(),
            "--query-gpu=name,temperature.gpu,utilization.gpu,memory.used".to_string(),
            CSV_FORMAT.to_string(),
        ]
    }
}

impl Default for NvidiaSmi {
    fn default() -> Self {
        Self::new()
    }
}

impl VendorGpuTool for NvidiaSmi {
    fn device_count(&self) -> Result<usize, VendorToolError> {
        let output = self.invoke(&[
            "--query-gpu=count".to_string(),
            "--format=csv,noheader".to_string(),
        ])?;
        parse_count(&output)
    }

    fn sample(&self, index: usize) -> Result<GpuSample, VendorToolError> {
        GpuSample::parse_csv(&self.invoke(&Self::sample_args(index))?)
    }

    fn query(&self, index: usize, metric: GpuMetric) -> Result<f32, VendorToolError> {
        parse_metric(&self.invoke(&Self::metric_args(index, metric))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_arguments() {
        assert_eq!(
            NvidiaSmi::metric_args(1, GpuMetric::MemoryUsed),
            vec![
                "-i",
                "1",
                "--query-gpu=memory.used",
                "--format=csv,noheader,nounits"
            ]
        );
        assert_eq!(NvidiaSmi::sample_args(0)[2], "--query-gpu=name,temperature.gpu,utilization.gpu,memory.used");
    }

    #[test]
    fn test_missing_tool_is_an_invocation_error() {
        let tool = NvidiaSmi::with_program("no-such-nvidia-smi-7a2e");
        assert!(matches!(
            tool.device_count(),
            Err(VendorToolError::Invocation(_))
        ));
    }
}
