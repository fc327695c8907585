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

//! Bounding-box measurement of model files.
//!
//! Only raw vertex positions are read; faces, normals and materials are
//! ignored. Supported formats are Wavefront OBJ and STL (ASCII or binary).

use crate::error::{CoreError, CoreResult};
use crate::math::{Aabb, Vec3};
use std::fs;
use std::path::Path;

const STL_HEADER_LEN: usize = 84;
const STL_TRIANGLE_LEN: usize = 50;

/// Width, height and depth of a model's axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelDimensions {
    /// The enclosing box.
    pub bounds: Aabb,
}

impl ModelDimensions {
    /// Reads `path` and measures the geometry it contains.
    pub fn measure(path: &Path) -> CoreResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let model_error = |reason: String| CoreError::Model {
            path: path.to_path_buf(),
            reason,
        };

        let vertices = match extension.as_deref() {
            Some("obj") => obj_vertices(&fs::read_to_string(path)?).map_err(model_error)?,
            Some("stl") => stl_vertices(&fs::read(path)?).map_err(model_error)?,
            other => {
                return Err(model_error(format!(
                    "unsupported format '{}'",
                    other.unwrap_or("")
                )))
            }
        };

        let bounds = Aabb::from_points(&vertices)
            .ok_or_else(|| model_error("no vertices found".to_string()))?;
        log::debug!(
            "Measured {} vertices in '{}': {:?}",
            vertices.len(),
            path.display(),
            bounds.size()
        );
        Ok(Self { bounds })
    }

    /// Extent along X.
    pub fn width(&self) -> f32 {
        self.bounds.size().x
    }

    /// Extent along Y.
    pub fn height(&self) -> f32 {
        self.bounds.size().y
    }

    /// Extent along Z.
    pub fn depth(&self) -> f32 {
        self.bounds.size().z
    }

    /// The largest of width, height and depth.
    pub fn max_dimension(&self) -> f32 {
        self.bounds.size().max_element()
    }
}

fn parse_xyz<'a>(mut fields: impl Iterator<Item = &'a str>, line: &str) -> Result<Vec3, String> {
    let mut next = || -> Result<f32, String> {
        fields
            .next()
            .ok_or_else(|| format!("missing coordinate in '{line}'"))?
            .parse()
            .map_err(|_| format!("bad coordinate in '{line}'"))
    };
    Ok(Vec3::new(next()?, next()?, next()?))
}

fn obj_vertices(text: &str) -> Result<Vec<Vec3>, String> {
    text.lines()
        .filter_map(|line| line.strip_prefix("v "))
        .map(|rest| parse_xyz(rest.split_whitespace(), rest))
        .collect()
}

fn stl_vertices(bytes: &[u8]) -> Result<Vec<Vec3>, String> {
    match std::str::from_utf8(bytes) {
        Ok(text) if text.contains("solid") && text.contains("endsolid") => {
            stl_ascii_vertices(text)
        }
        _ => Ok(stl_binary_vertices(bytes)),
    }
}

fn stl_ascii_vertices(text: &str) -> Result<Vec<Vec3>, String> {
    text.lines()
        .map(str::trim_start)
        .filter_map(|line| line.strip_prefix("vertex"))
        .map(|rest| parse_xyz(rest.split_whitespace(), rest))
        .collect()
}

fn stl_binary_vertices(bytes: &[u8]) -> Vec<Vec3> {
    let read_f32 = |at: usize| f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    let body = bytes.get(STL_HEADER_LEN..).unwrap_or_default();
    let mut vertices = Vec::with_capacity(body.len() / STL_TRIANGLE_LEN * 3);
    for triangle in 0..body.len() / STL_TRIANGLE_LEN {
        // Skip the 12-byte normal.
        let start = STL_HEADER_LEN + triangle * STL_TRIANGLE_LEN + 12;
        for corner in 0..3 {
            let at = start + corner * 12;
            vertices.push(Vec3::new(read_f32(at), read_f32(at + 4), read_f32(at + 8)));
        }
    }
    vertices
}
