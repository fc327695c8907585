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

#![cfg(unix)]

use ortho_core::{DispatchMode, RenderCommand, RenderJob, RenderStatus, ViewKey};
use ortho_dispatch::{DispatchConfig, DispatchError, RenderDispatcher, RenderEvent};
use ortho_infra::ProcessRenderer;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn shell_job(id: usize, view: ViewKey, script: &str) -> RenderJob {
    RenderJob::new(
        id,
        view,
        RenderCommand {
            program: PathBuf::from("sh"),
            args: vec!["-c".into(), script.into()],
        },
    )
}

#[test]
fn test_observer_never_sees_more_than_thread_count_in_progress() {
    // --- 1. ARRANGE ---
    let (dispatcher, _events) =
        RenderDispatcher::new(Arc::new(ProcessRenderer::new()), DispatchConfig::default());
    let jobs: Vec<RenderJob> = ViewKey::ALL
        .iter()
        .take(5)
        .enumerate()
        .map(|(id, &view)| shell_job(id, view, "sleep 0.1"))
        .collect();
    let queue = dispatcher.queue().clone();
    let done = Arc::new(AtomicBool::new(false));
    let peak = Arc::new(AtomicUsize::new(0));

    // --- 2. ACT ---
    let observer = {
        let done = Arc::clone(&done);
        let peak = Arc::clone(&peak);
        thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                peak.fetch_max(queue.in_progress_count(), Ordering::SeqCst);
                thread::sleep(Duration::from_millis(2));
            }
        })
    };
    let summary = dispatcher.run(jobs, DispatchMode::Parallel, 2).unwrap();
    done.store(true, Ordering::SeqCst);
    observer.join().unwrap();

    // --- 3. ASSERT ---
    assert_eq!(summary.completed, 5);
    assert!(peak.load(Ordering::SeqCst) <= 2);
    assert!(peak.load(Ordering::SeqCst) >= 1);
}

#[test]
fn test_failed_process_marks_job_failed() {
    // --- 1. ARRANGE ---
    let (dispatcher, events) =
        RenderDispatcher::new(Arc::new(ProcessRenderer::new()), DispatchConfig::default());
    let jobs = vec![
        shell_job(0, ViewKey::Top, "exit 0"),
        shell_job(1, ViewKey::Front, "echo 'Error: out of memory' >&2; exit 3"),
    ];

    // --- 2. ACT ---
    let summary = dispatcher.run(jobs, DispatchMode::Sequential, 1).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.failed, 1);
    let jobs = dispatcher.queue().jobs();
    assert_eq!(jobs[0].status(), RenderStatus::Completed);
    assert_eq!(jobs[1].status(), RenderStatus::Failed);
    assert!(jobs[1].diagnostic().unwrap().contains("out of memory"));

    let finished: Vec<RenderEvent> = events
        .try_iter()
        .filter(|e| matches!(e, RenderEvent::Finished { .. }))
        .collect();
    assert_eq!(finished.len(), 2);
    assert!(matches!(
        &finished[1],
        RenderEvent::Finished { status: RenderStatus::Failed, diagnostic: Some(_), .. }
    ));
}

#[test]
fn test_queue_cannot_be_cleared_mid_batch() {
    let (dispatcher, events) =
        RenderDispatcher::new(Arc::new(ProcessRenderer::new()), DispatchConfig::default());
    let dispatcher = Arc::new(dispatcher);

    let runner = {
        let dispatcher = Arc::clone(&dispatcher);
        thread::spawn(move || {
            dispatcher.run(
                vec![shell_job(0, ViewKey::Top, "sleep 0.3")],
                DispatchMode::Sequential,
                1,
            )
        })
    };

    // Wait until the job is running.
    let started = events.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(started, RenderEvent::Started { id: 0, .. }));
    assert!(matches!(dispatcher.queue().clear(), Err(DispatchError::Busy)));

    runner.join().unwrap().unwrap();
    dispatcher.queue().clear().unwrap();
    assert!(dispatcher.queue().is_empty());
}
