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

//! The shared render queue.

use crate::error::{DispatchError, DispatchResult};
use crossbeam_channel::{Receiver, Sender};
use ortho_core::{RenderCommand, RenderFailure, RenderJob, RenderStatus, ViewKey};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Progress notification for a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// The job moved to `InProgress`.
    Started {
        /// Job id within the batch.
        id: usize,
        /// The rendered view.
        view: ViewKey,
    },
    /// The job reached a terminal state.
    Finished {
        /// Job id within the batch.
        id: usize,
        /// The rendered view.
        view: ViewKey,
        /// `Completed` or `Failed`.
        status: RenderStatus,
        /// Why the job failed, if it did.
        diagnostic: Option<String>,
    },
}

#[derive(Debug, Default)]
struct QueueState {
    jobs: Vec<RenderJob>,
    running: bool,
}

/// Job list shared between the dispatcher's workers and any observer.
///
/// Every status change happens under one lock, so observers always see a
/// consistent snapshot regardless of the thread they run on. Cloning yields
/// another handle to the same queue.
#[derive(Debug, Clone)]
pub struct RenderQueue {
    state: Arc<Mutex<QueueState>>,
    events: Sender<RenderEvent>,
}

impl RenderQueue {
    /// Creates an empty queue and the receiving end of its event channel.
    ///
    /// At most `event_buffer_size` events are buffered; further events are
    /// dropped until the receiver catches up.
    pub fn new(event_buffer_size: usize) -> (Self, Receiver<RenderEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(event_buffer_size);
        let queue = Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            events: tx,
        };
        (queue, rx)
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: RenderEvent) {
        if self.events.try_send(event).is_err() {
            log::trace!("Render event dropped");
        }
    }

    fn views_with(&self, status: RenderStatus) -> Vec<ViewKey> {
        self.lock()
            .jobs
            .iter()
            .filter(|job| job.status() == status)
            .map(RenderJob::view)
            .collect()
    }

    /// Views still waiting to start, in submission order.
    pub fn pending(&self) -> Vec<ViewKey> {
        self.views_with(RenderStatus::Pending)
    }

    /// Views currently rendering.
    pub fn in_progress(&self) -> Vec<ViewKey> {
        self.views_with(RenderStatus::InProgress)
    }

    /// Views that rendered successfully.
    pub fn completed(&self) -> Vec<ViewKey> {
        self.views_with(RenderStatus::Completed)
    }

    /// Views whose render failed.
    pub fn failed(&self) -> Vec<ViewKey> {
        self.views_with(RenderStatus::Failed)
    }

    /// Number of jobs currently rendering.
    pub fn in_progress_count(&self) -> usize {
        self.lock()
            .jobs
            .iter()
            .filter(|job| job.status() == RenderStatus::InProgress)
            .count()
    }

    /// A copy of every job in the current batch.
    pub fn jobs(&self) -> Vec<RenderJob> {
        self.lock().jobs.clone()
    }

    /// Number of jobs in the current batch.
    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    /// Whether the queue holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.lock().jobs.is_empty()
    }

    /// Whether a batch is running.
    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Discards every job. Refused while a batch is running.
    pub fn clear(&self) -> DispatchResult<()> {
        let mut state = self.lock();
        if state.running {
            return Err(DispatchError::Busy);
        }
        state.jobs.clear();
        Ok(())
    }

    /// Replaces the queue contents with a new batch and marks it running.
    pub(crate) fn begin(&self, jobs: Vec<RenderJob>) -> DispatchResult<()> {
        let mut state = self.lock();
        if state.running {
            return Err(DispatchError::Busy);
        }
        state.jobs = jobs;
        state.running = true;
        Ok(())
    }

    pub(crate) fn end(&self) {
        self.lock().running = false;
    }

    /// Moves job `id` to `InProgress` and hands back its command.
    pub(crate) fn start(&self, id: usize) -> DispatchResult<RenderCommand> {
        let mut state = self.lock();
        let total = state.jobs.len();
        let job = state
            .jobs
            .get_mut(id)
            .ok_or(DispatchError::UnknownJob(id))?;
        job.start()?;
        let view = job.view();
        let command = job.command().clone();
        drop(state);

        log::info!("Rendering {} ({}/{})", view.display_name(), id + 1, total);
        log::debug!("Render command: {command}");
        self.emit(RenderEvent::Started { id, view });
        Ok(command)
    }

    /// Records the outcome of job `id`.
    pub(crate) fn finish(&self, id: usize, outcome: Result<(), RenderFailure>) -> DispatchResult<RenderStatus> {
        let mut state = self.lock();
        let job = state
            .jobs
            .get_mut(id)
            .ok_or(DispatchError::UnknownJob(id))?;
        match outcome {
            Ok(()) => job.complete()?,
            Err(failure) => job.fail(failure.diagnostic)?,
        }
        let view = job.view();
        let status = job.status();
        let diagnostic = job.diagnostic().map(str::to_string);
        drop(state);

        match &diagnostic {
            Some(reason) => log::warn!("Render of {} failed: {reason}", view.display_name()),
            None => log::info!("Rendered {}", view.display_name()),
        }
        self.emit(RenderEvent::Finished {
            id,
            view,
            status,
            diagnostic,
        });
        Ok(status)
    }
}
