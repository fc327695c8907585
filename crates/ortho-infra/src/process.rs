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

//! Synchronous external process invocation.
//!
//! Processes are started directly with an argument vector, never through a
//! shell. There is no timeout: a hung child blocks its caller.

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Number of trailing stderr lines kept in diagnostics.
const STDERR_TAIL_LINES: usize = 10;

/// An error from running an external process.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The process could not be started (missing executable, permissions).
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The OS error.
        #[source]
        source: std::io::Error,
    },
    /// Waiting for the process or collecting its output failed.
    #[error("Failed waiting for '{program}': {source}")]
    Wait {
        /// The program that was invoked.
        program: String,
        /// The OS error.
        #[source]
        source: std::io::Error,
    },
    /// The process exited unsuccessfully.
    #[error("'{program}' exited with {}{}", exit_label(*code), stderr_suffix(stderr))]
    NonZeroExit {
        /// The program that was invoked.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Tail of the captured standard error.
        stderr: String,
    },
    /// The process succeeded but its output could not be interpreted.
    #[error("Unexpected output from '{program}': {output}")]
    Parse {
        /// The program that was invoked.
        program: String,
        /// The offending output.
        output: String,
    },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

/// Everything a finished process produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs to completion, capturing their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a runner.
    pub const fn new() -> Self {
        Self
    }

    /// Starts `program`, waits for it, and returns everything it produced
    /// regardless of its exit code.
    pub fn execute<P, I, S>(&self, program: P, args: I) -> Result<ProcessOutput, ProcessError>
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program_name = program.as_ref().to_string_lossy().into_owned();
        let mut command = Command::new(program.as_ref());
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut summary = program_name.clone();
        for arg in command.get_args() {
            let _ = write!(summary, " {}", arg.to_string_lossy());
        }
        log::debug!("Executing: {summary}");

        let start_time = Instant::now();
        let child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: program_name.clone(),
            source,
        })?;
        let output = child
            .wait_with_output()
            .map_err(|source| ProcessError::Wait {
                program: program_name.clone(),
                source,
            })?;

        let output = ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log::debug!(
            "'{}' finished with {} after {:.2}s",
            program_name,
            exit_label(output.code),
            start_time.elapsed().as_secs_f64()
        );
        Ok(output)
    }

    /// Runs `program` and returns its standard output.
    ///
    /// A non-zero exit is an error carrying the tail of standard error.
    pub fn run<P, I, S>(&self, program: P, args: I) -> Result<String, ProcessError>
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program_name = program.as_ref().to_string_lossy().into_owned();
        let output = self.execute(program, args)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(ProcessError::NonZeroExit {
                program: program_name,
                code: output.code,
                stderr: tail(&output.stderr, STDERR_TAIL_LINES),
            })
        }
    }

    /// Runs `program` and only reports whether it succeeded.
    pub fn check<P, I, S>(&self, program: P, args: I) -> Result<(), ProcessError>
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.run(program, args).map(|_| ())
    }

    /// Like [`ProcessRunner::check`], collapsed to a boolean. Failures are logged.
    pub fn run_check<P, I, S>(&self, program: P, args: I) -> bool
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        match self.check(program, args) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_last_non_empty_lines() {
        assert_eq!(tail("a\n\nb\nc\n", 2), "b\nc");
        assert_eq!(tail("", 3), "");
        assert_eq!(tail("only", 10), "only");
    }

    #[test]
    fn test_error_display() {
        let err = ProcessError::NonZeroExit {
            program: "blender".into(),
            code: Some(1),
            stderr: "Error: bad script".into(),
        };
        assert_eq!(
            err.to_string(),
            "'blender' exited with code 1: Error: bad script"
        );
        let err = ProcessError::NonZeroExit {
            program: "blender".into(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "'blender' exited with a signal");
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let runner = ProcessRunner::new();
        let err = runner
            .run("definitely-not-a-real-program-4f1c", ["--version"])
            .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert!(!runner.run_check("definitely-not-a-real-program-4f1c", Vec::<String>::new()));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout() {
        let out = ProcessRunner::new()
            .run("sh", ["-c", "printf 'hello world'"])
            .unwrap();
        assert_eq!(out, "hello world");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_carries_stderr() {
        let err = ProcessRunner::new()
            .run("sh", ["-c", "echo boom >&2; exit 3"])
            .unwrap_err();
        match err {
            ProcessError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_returns_output_on_failure() {
        let output = ProcessRunner::new()
            .execute("sh", ["-c", "echo partial; exit 2"])
            .unwrap();
        assert!(!output.success());
        assert_eq!(output.stdout, "partial\n");
        assert!(ProcessRunner::new().run_check("sh", ["-c", "exit 0"]));
    }
}
