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

use ortho_core::{RenderCommand, Renderer};
use ortho_infra::{ProcessRenderer, ProcessRunner};
use std::path::PathBuf;

#[test]
fn test_renderer_waits_for_process_to_finish() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("Render_top.png");
    let command = RenderCommand {
        program: PathBuf::from("sh"),
        args: vec![
            "-c".into(),
            "sleep 0.1; printf png > \"$1\"".into(),
            "sh".into(),
            image.display().to_string(),
        ],
    };

    // --- 2. ACT ---
    let result = ProcessRenderer::new().render(&command);

    // --- 3. ASSERT ---
    assert!(result.is_ok(), "render should succeed: {result:?}");
    assert_eq!(std::fs::read_to_string(&image).unwrap(), "png");
}

#[test]
fn test_arguments_with_spaces_are_not_split() {
    let dir = tempfile::tempdir().unwrap();
    let spaced = dir.path().join("out dir");
    std::fs::create_dir(&spaced).unwrap();

    let out = ProcessRunner::new()
        .run(
            "sh",
            [
                "-c",
                "ls -d \"$1\" >/dev/null && printf '%s' \"$#\"",
                "sh",
                &spaced.display().to_string(),
            ],
        )
        .unwrap();
    assert_eq!(out, "1");
}

#[test]
fn test_stdout_is_fully_captured() {
    let out = ProcessRunner::new()
        .run("sh", ["-c", "i=0; while [ $i -lt 2000 ]; do echo line$i; i=$((i+1)); done"])
        .unwrap();
    assert_eq!(out.lines().count(), 2000);
    assert_eq!(out.lines().last(), Some("line1999"));
}
