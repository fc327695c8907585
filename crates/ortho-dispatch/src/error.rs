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

//! Errors raised when a batch cannot be dispatched.

use ortho_core::settings::MAX_THREADS;
use ortho_core::{CoreError, RenderStatus};

/// Convenience alias for dispatch results.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// A batch was rejected or a queue operation was refused.
///
/// Individual render failures are not errors here; they are recorded on the
/// job as [`ortho_core::RenderStatus::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The parallel thread count is outside `1..=MAX_THREADS`.
    #[error("Thread count {0} is outside 1..={MAX_THREADS}")]
    InvalidThreadCount(usize),
    /// The batch has no jobs.
    #[error("Render batch is empty")]
    EmptyBatch,
    /// A submitted job has already left `Pending`.
    #[error("Render job {id} is {status}, expected Pending")]
    JobNotPending {
        /// Id of the offending job.
        id: usize,
        /// Its current status.
        status: RenderStatus,
    },
    /// A submitted job's id does not match its position in the batch.
    #[error("Render job at position {position} has id {id}")]
    JobIdMismatch {
        /// Index of the job in the batch.
        position: usize,
        /// The id the job carries.
        id: usize,
    },
    /// A batch is already running on this queue.
    #[error("A render batch is already running")]
    Busy,
    /// No job with this id is queued.
    #[error("No render job with id {0}")]
    UnknownJob(usize),
    /// Settings validation or a job transition failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
