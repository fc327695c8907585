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

//! # Ortho Dispatch
//!
//! Runs a batch of render jobs against a [`ortho_core::Renderer`], either one
//! at a time or on a bounded pool of workers, and tracks each job's status in
//! a [`RenderQueue`] that other threads can observe.

#![warn(missing_docs)]

pub mod dispatcher;
pub mod error;
pub mod queue;

pub use dispatcher::{plan, BatchSummary, DispatchConfig, RenderDispatcher};
pub use error::{DispatchError, DispatchResult};
pub use queue::{RenderEvent, RenderQueue};
