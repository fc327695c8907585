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

//! Defines the error type shared by the core contracts.

use std::path::PathBuf;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// An error raised by the view geometry, job state machine, or settings layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A view key outside the fixed 26-member universe was supplied.
    #[error("Invalid view key: '{0}'")]
    InvalidKey(String),
    /// A face label other than top/bottom/front/back/left/right was supplied.
    #[error("Invalid face label: '{0}'")]
    InvalidFace(String),
    /// A navigation direction other than left/up/right/down was supplied.
    #[error("Invalid direction: '{0}'")]
    InvalidDirection(String),
    /// A render job was asked to move backwards or skip a state.
    #[error("Invalid job transition from {from} to {to}")]
    InvalidTransition {
        /// The status the job was in.
        from: String,
        /// The status that was requested.
        to: String,
    },
    /// Render settings failed validation.
    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),
    /// The device capability probe output could not be interpreted.
    #[error("Device probe failed: {0}")]
    Probe(String),
    /// A model file could not be measured.
    #[error("Failed to measure model '{}': {reason}", path.display())]
    Model {
        /// The model file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// An underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::InvalidKey("sideways".into()).to_string(),
            "Invalid view key: 'sideways'"
        );
        let err = CoreError::InvalidTransition {
            from: "Completed".into(),
            to: "Pending".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid job transition from Completed to Pending"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
