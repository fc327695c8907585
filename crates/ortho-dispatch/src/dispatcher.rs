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

//! Sequential and bounded-parallel render dispatch.

use crate::error::{DispatchError, DispatchResult};
use crate::queue::{RenderEvent, RenderQueue};
use crossbeam_channel::Receiver;
use ortho_core::settings::MAX_THREADS;
use ortho_core::{DispatchMode, RenderCommand, RenderJob, RenderSettings, RenderStatus, Renderer};
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

/// Configuration for the [`RenderDispatcher`].
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum number of progress events to buffer.
    /// If the buffer is full, new events are dropped.
    pub event_buffer_size: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
        }
    }
}

/// Statistics for a finished batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Wall-clock time the batch started.
    pub started_at: SystemTime,
    /// Wall-clock time the last job finished.
    pub finished_at: SystemTime,
    /// Total run time.
    pub elapsed: Duration,
    /// Jobs that completed.
    pub completed: usize,
    /// Jobs that failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Number of jobs in the batch.
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} views rendered in {:.1}s",
            self.completed,
            self.total(),
            self.elapsed.as_secs_f64()
        )?;
        if self.failed > 0 {
            write!(f, " ({} failed)", self.failed)?;
        }
        Ok(())
    }
}

/// Builds one pending job per view, in order.
///
/// Validates `settings` first. An empty view selection renders
/// [`ortho_core::ViewKey::DEFAULT`].
pub fn plan(settings: &RenderSettings) -> DispatchResult<Vec<RenderJob>> {
    settings.validate()?;
    Ok(settings
        .effective_views()
        .into_iter()
        .enumerate()
        .map(|(id, view)| RenderJob::new(id, view, RenderCommand::build(settings, view)))
        .collect())
}

/// Marks the queue idle when the batch ends, even if a worker panicked.
struct BatchGuard<'a>(&'a RenderQueue);

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.0.end();
    }
}

/// Runs render batches against a [`Renderer`].
///
/// Only one batch runs at a time per dispatcher; a second call while one is in
/// flight fails with [`DispatchError::Busy`].
#[derive(Debug)]
pub struct RenderDispatcher {
    renderer: Arc<dyn Renderer>,
    queue: RenderQueue,
}

impl RenderDispatcher {
    /// Creates a dispatcher and the receiving end of its progress events.
    pub fn new(renderer: Arc<dyn Renderer>, config: DispatchConfig) -> (Self, Receiver<RenderEvent>) {
        let (queue, events) = RenderQueue::new(config.event_buffer_size);
        (Self { renderer, queue }, events)
    }

    /// The shared queue, for observing progress from other threads.
    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// Plans and runs a batch from `settings`.
    pub fn dispatch(&self, settings: &RenderSettings) -> DispatchResult<BatchSummary> {
        let jobs = plan(settings)?;
        self.run(jobs, settings.mode, settings.threads)
    }

    /// Runs `jobs` to completion and returns once every job is terminal.
    ///
    /// Every job must be `Pending` and carry its position in `jobs` as its id,
    /// as [`plan`] produces them.
    ///
    /// In [`DispatchMode::Sequential`] jobs run one at a time in submission
    /// order. In [`DispatchMode::Parallel`] at most `threads` jobs are in
    /// progress at once; jobs start in submission order.
    pub fn run(
        &self,
        jobs: Vec<RenderJob>,
        mode: DispatchMode,
        threads: usize,
    ) -> DispatchResult<BatchSummary> {
        if jobs.is_empty() {
            return Err(DispatchError::EmptyBatch);
        }
        if !(1..=MAX_THREADS).contains(&threads) {
            return Err(DispatchError::InvalidThreadCount(threads));
        }
        for (position, job) in jobs.iter().enumerate() {
            if job.id() != position {
                return Err(DispatchError::JobIdMismatch {
                    position,
                    id: job.id(),
                });
            }
            if job.status() != RenderStatus::Pending {
                return Err(DispatchError::JobNotPending {
                    id: job.id(),
                    status: job.status(),
                });
            }
        }

        let count = jobs.len();
        let workers = match mode {
            DispatchMode::Sequential => 1,
            DispatchMode::Parallel => threads.min(count),
        };

        self.queue.begin(jobs)?;
        let guard = BatchGuard(&self.queue);
        log::info!("Starting render batch: {count} views, {workers} worker(s), {mode:?} mode");

        let started_at = SystemTime::now();
        let start = Instant::now();
        if workers == 1 {
            (0..count).for_each(|id| self.run_job(id));
        } else {
            self.run_parallel(count, workers);
        }
        let elapsed = start.elapsed();
        drop(guard);

        let jobs = self.queue.jobs();
        let count_with = |status: RenderStatus| {
            jobs.iter().filter(|job| job.status() == status).count()
        };
        let summary = BatchSummary {
            started_at,
            finished_at: SystemTime::now(),
            elapsed,
            completed: count_with(RenderStatus::Completed),
            failed: count_with(RenderStatus::Failed),
        };
        log::info!("Render batch finished: {summary}");
        Ok(summary)
    }

    fn run_parallel(&self, count: usize, workers: usize) {
        let (tx, rx) = crossbeam_channel::bounded(count);
        for id in 0..count {
            if tx.send(id).is_err() {
                break;
            }
        }
        drop(tx);

        thread::scope(|scope| {
            for _ in 0..workers {
                let rx = rx.clone();
                scope.spawn(move || {
                    for id in rx.iter() {
                        self.run_job(id);
                    }
                });
            }
        });
    }

    fn run_job(&self, id: usize) {
        let command = match self.queue.start(id) {
            Ok(command) => command,
            Err(e) => {
                log::error!("Could not start render job {id}: {e}");
                return;
            }
        };
        let outcome = self.renderer.render(&command);
        if let Err(e) = self.queue.finish(id, outcome) {
            log::error!("Could not record render job {id}: {e}");
        }
    }
}
