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

//! Render job state machine.

use crate::error::{CoreError, CoreResult};
use crate::render::RenderCommand;
use crate::view::ViewKey;
use std::fmt;

/// Lifecycle state of a render job.
///
/// Transitions only move forward: `Pending → InProgress → {Completed | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStatus {
    /// Queued, not yet started.
    Pending,
    /// The renderer is running.
    InProgress,
    /// The renderer exited successfully.
    Completed,
    /// The renderer could not be started or exited with an error.
    Failed,
}

impl RenderStatus {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, RenderStatus::Completed | RenderStatus::Failed)
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: RenderStatus) -> bool {
        matches!(
            (self, next),
            (RenderStatus::Pending, RenderStatus::InProgress)
                | (RenderStatus::InProgress, RenderStatus::Completed)
                | (RenderStatus::InProgress, RenderStatus::Failed)
        )
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenderStatus::Pending => "Pending",
            RenderStatus::InProgress => "InProgress",
            RenderStatus::Completed => "Completed",
            RenderStatus::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// A single view render within a batch.
#[derive(Debug, Clone)]
pub struct RenderJob {
    id: usize,
    view: ViewKey,
    status: RenderStatus,
    command: RenderCommand,
    diagnostic: Option<String>,
}

impl RenderJob {
    /// Creates a pending job.
    pub fn new(id: usize, view: ViewKey, command: RenderCommand) -> Self {
        Self {
            id,
            view,
            status: RenderStatus::Pending,
            command,
            diagnostic: None,
        }
    }

    /// Submission index within the batch.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The view this job renders.
    pub fn view(&self) -> ViewKey {
        self.view
    }

    /// Current status.
    pub fn status(&self) -> RenderStatus {
        self.status
    }

    /// The command that runs this job.
    pub fn command(&self) -> &RenderCommand {
        &self.command
    }

    /// The failure diagnostic, if the job failed.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    fn transition(&mut self, next: RenderStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// `Pending → InProgress`.
    pub fn start(&mut self) -> CoreResult<()> {
        self.transition(RenderStatus::InProgress)
    }

    /// `InProgress → Completed`.
    pub fn complete(&mut self) -> CoreResult<()> {
        self.transition(RenderStatus::Completed)
    }

    /// `InProgress → Failed`, recording why.
    pub fn fail(&mut self, diagnostic: impl Into<String>) -> CoreResult<()> {
        self.transition(RenderStatus::Failed)?;
        self.diagnostic = Some(diagnostic.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RenderSettings;

    fn job() -> RenderJob {
        let settings = RenderSettings::default();
        RenderJob::new(0, ViewKey::Top, RenderCommand::build(&settings, ViewKey::Top))
    }

    #[test]
    fn test_happy_path() {
        let mut job = job();
        assert_eq!(job.status(), RenderStatus::Pending);
        job.start().unwrap();
        assert_eq!(job.status(), RenderStatus::InProgress);
        job.complete().unwrap();
        assert_eq!(job.status(), RenderStatus::Completed);
        assert!(job.status().is_terminal());
        assert!(job.diagnostic().is_none());
    }

    #[test]
    fn test_failure_records_diagnostic() {
        let mut job = job();
        job.start().unwrap();
        job.fail("exit code 1").unwrap();
        assert_eq!(job.status(), RenderStatus::Failed);
        assert_eq!(job.diagnostic(), Some("exit code 1"));
    }

    #[test]
    fn test_cannot_skip_or_go_back() {
        let mut job = job();
        assert!(matches!(
            job.complete(),
            Err(CoreError::InvalidTransition { .. })
        ));
        job.start().unwrap();
        assert!(job.start().is_err());
        job.complete().unwrap();
        assert!(job.fail("late").is_err());
        assert_eq!(job.status(), RenderStatus::Completed);
        assert!(job.diagnostic().is_none());
    }

    #[test]
    fn test_transition_table() {
        use RenderStatus::*;
        let all = [Pending, InProgress, Completed, Failed];
        let allowed: Vec<_> = all
            .iter()
            .flat_map(|a| all.iter().map(move |b| (*a, *b)))
            .filter(|(a, b)| a.can_transition_to(*b))
            .collect();
        assert_eq!(
            allowed,
            vec![(Pending, InProgress), (InProgress, Completed), (InProgress, Failed)]
        );
    }
}
