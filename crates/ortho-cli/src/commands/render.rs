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

//! Render batch command.

use anyhow::{bail, Context, Result};
use ortho_core::{RenderSettings, RenderStatus};
use ortho_dispatch::{plan, DispatchConfig, RenderDispatcher, RenderEvent};
use ortho_infra::ProcessRenderer;
use std::fs;
use std::sync::Arc;
use std::thread;

pub fn run(settings: &RenderSettings, dry_run: bool) -> Result<()> {
    let jobs = plan(settings).context("Invalid render settings")?;

    if dry_run {
        for job in &jobs {
            println!("{}", job.command());
        }
        return Ok(());
    }

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory '{}'",
            settings.output_dir.display()
        )
    })?;

    let (dispatcher, events) =
        RenderDispatcher::new(Arc::new(ProcessRenderer::new()), DispatchConfig::default());
    let total = jobs.len();

    // Ends when the dispatcher, and with it the event sender, is dropped.
    let progress = thread::spawn(move || {
        let mut finished = 0;
        for event in events.iter() {
            match event {
                RenderEvent::Started { view, .. } => println!("  started   {view}"),
                RenderEvent::Finished {
                    view,
                    status,
                    diagnostic,
                    ..
                } => {
                    finished += 1;
                    match (status, diagnostic) {
                        (RenderStatus::Failed, Some(reason)) => {
                            println!("  FAILED    {view} [{finished}/{total}]: {reason}")
                        }
                        _ => println!("  finished  {view} [{finished}/{total}]"),
                    }
                }
            }
        }
    });

    let summary = dispatcher.run(jobs, settings.mode, settings.threads);
    drop(dispatcher);
    if progress.join().is_err() {
        log::warn!("Progress printer panicked");
    }
    let summary = summary.context("Render batch could not be dispatched")?;

    println!("\n{summary}");
    if summary.failed > 0 {
        bail!("{} of {} views failed to render", summary.failed, summary.total());
    }
    Ok(())
}
