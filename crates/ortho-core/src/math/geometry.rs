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

//! Bounding box of a vertex cloud.

use super::Vec3;

/// Box spanned by the smallest and largest coordinates seen on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Smallest x, y and z.
    pub min: Vec3,
    /// Largest x, y and z.
    pub max: Vec3,
}

impl Aabb {
    /// Encloses every point of `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(
            rest.iter()
                .fold(Self::from_point(*first), |aabb, p| aabb.merged_with_point(*p)),
        )
    }

    /// A zero-sized box at `point`.
    #[inline]
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Width, height and depth.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grows the box just enough to contain `point`.
    #[inline]
    pub fn merged_with_point(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_empty() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_points_encloses_all() {
        let points = [
            Vec3::new(1.0, 0.0, -2.0),
            Vec3::new(-1.0, 4.0, 0.5),
            Vec3::new(0.0, 1.0, 3.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 5.0));
    }

    #[test]
    fn test_single_point_has_no_extent() {
        let aabb = Aabb::from_point(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.size(), Vec3::default());
        let grown = aabb.merged_with_point(Vec3::new(0.0, 2.0, 5.0));
        assert_eq!(grown.size(), Vec3::new(1.0, 0.0, 2.0));
    }
}
