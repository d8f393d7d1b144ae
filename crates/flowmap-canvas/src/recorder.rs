// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless adapter that keeps presented scenes for inspection.

use flowmap_scene_port::{PresentError, Scene, ScenePort};

/// Scene adapter for headless hosts and tests.
///
/// Keeps the last presented scene and counts presents; draws nothing.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    /// Last presented scene.
    pub last: Option<Scene>,
    /// Number of present calls.
    pub present_count: u32,
    /// Whether dispose has been called.
    pub disposed: bool,
}

impl RecordingAdapter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenePort for RecordingAdapter {
    fn present(&mut self, scene: &Scene) -> Result<(), PresentError> {
        self.last = Some(scene.clone());
        self.present_count += 1;
        Ok(())
    }

    fn dispose(&mut self) {
        self.last = None;
        self.disposed = true;
    }
}
