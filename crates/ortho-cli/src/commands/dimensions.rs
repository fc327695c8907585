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

//! Model measurement command.

use anyhow::{Context, Result};
use ortho_core::model::ModelDimensions;
use ortho_core::scene::optimal_camera_distance;
use std::path::Path;

pub fn run(model: &Path, unit_scale: f64) -> Result<()> {
    let dimensions = ModelDimensions::measure(model)
        .with_context(|| format!("Failed to measure '{}'", model.display()))?;

    println!("Model: {}", model.display());
    println!("  Width:  {:.3}", dimensions.width());
    println!("  Height: {:.3}", dimensions.height());
    println!("  Depth:  {:.3}", dimensions.depth());

    let size = f64::from(dimensions.max_dimension()) * unit_scale;
    println!(
        "  Suggested camera distance: {:.3}",
        optimal_camera_distance(size)
    );
    Ok(())
}
