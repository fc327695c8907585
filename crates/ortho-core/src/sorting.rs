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

//! Relevance ordering of views against a selected set of faces.

use crate::error::CoreResult;
use crate::view::{Face, ViewKey};

/// How a view's faces relate to the selected faces. Variants are declared in
/// output priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// The view's faces equal the selection.
    Exact,
    /// The view's faces are a proper subset of the selection.
    Subset,
    /// The view's faces are a proper superset of the selection.
    Superset,
    /// Neither set contains the other.
    NoMatch,
}

impl MatchTier {
    /// Classifies a view face mask against a selection mask.
    ///
    /// An empty selection classifies every non-empty view as `Subset`.
    pub fn classify(view_mask: u8, selected_mask: u8) -> Self {
        if view_mask == selected_mask {
            MatchTier::Exact
        } else if selected_mask == 0 || view_mask & !selected_mask == 0 {
            MatchTier::Subset
        } else if selected_mask & !view_mask == 0 {
            MatchTier::Superset
        } else {
            MatchTier::NoMatch
        }
    }
}

fn mask_of(faces: &[Face]) -> u8 {
    faces.iter().fold(0, |mask, face| mask | face.bit())
}

/// Stable-partitions `universe` into Exact, Subset, Superset and NoMatch
/// tiers relative to `selected`.
///
/// Relative order within each tier is the order of `universe`. With an empty
/// selection every key lands in the subset tier and the universe order is
/// returned unchanged.
pub fn sort_views(selected: &[Face], universe: &[ViewKey]) -> Vec<ViewKey> {
    let selected_mask = mask_of(selected);
    let mut tiers: [Vec<ViewKey>; 4] = Default::default();
    for &key in universe {
        let tier = MatchTier::classify(key.face_mask(), selected_mask);
        tiers[tier as usize].push(key);
    }
    tiers.into_iter().flatten().collect()
}

/// Parses face labels, then sorts `universe` with [`sort_views`].
pub fn sort_views_by_labels<S: AsRef<str>>(
    selected: &[S],
    universe: &[ViewKey],
) -> CoreResult<Vec<ViewKey>> {
    let faces = selected
        .iter()
        .map(|label| label.as_ref().parse())
        .collect::<CoreResult<Vec<Face>>>()?;
    Ok(sort_views(&faces, universe))
}
