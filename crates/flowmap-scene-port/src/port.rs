// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port trait defining the renderer contract.

use crate::{PresentError, Scene};

/// Scene drawing port.
///
/// The canvas renderer is the domain side: it turns a mapping plus view into
/// a [`Scene`]. Adapters (SVG writer, UI toolkit bridge, headless recorder)
/// implement this trait to draw it. Each `present` replaces whatever the
/// adapter drew before.
pub trait ScenePort {
    /// Draw `scene`, replacing the previous frame.
    fn present(&mut self, scene: &Scene) -> Result<(), PresentError>;

    /// Release all resources. Further presents may start from scratch.
    fn dispose(&mut self);
}
