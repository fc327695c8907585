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

//! Bounding-box math for model measurement and integer helpers for preview
//! sizing.

pub mod geometry;
pub mod vector;

pub use self::geometry::Aabb;
pub use self::vector::Vec3;

/// Greatest common divisor of two unsigned integers.
///
/// `gcd(0, n)` is `n`, and `gcd(0, 0)` is `0`.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
