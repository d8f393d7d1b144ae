// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canvas renderer for CUI data-flow mappings.
//!
//! [`render_mapping`] derives a complete [`Scene`] from the current mapping
//! and view; [`Canvas`] pairs that derivation with a [`ScenePort`] adapter so
//! a host can redraw after every state change with one call.

mod geometry;
mod recorder;
mod render;
pub mod style;
mod svg;

pub use recorder::RecordingAdapter;
pub use render::{render_mapping, render_parts, BADGE_HEIGHT, BADGE_WIDTH, SELECTED_SCALE};
pub use svg::SvgAdapter;

use flowmap_graph::Mapping;
use flowmap_scene_port::{HighlightState, PresentError, Scene, ScenePort, ViewState};

/// Renderer bound to a drawing adapter.
#[derive(Debug)]
pub struct Canvas<P> {
    port: P,
}

impl<P: ScenePort> Canvas<P> {
    /// Wrap `port`.
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Re-derive the scene and present it. Returns the scene that was drawn.
    pub fn redraw(
        &mut self,
        mapping: &Mapping,
        view: &ViewState,
        highlight: &HighlightState,
    ) -> Result<Scene, PresentError> {
        let scene = render_mapping(mapping, view, highlight);
        self.port.present(&scene)?;
        Ok(scene)
    }

    /// Borrow the adapter.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutably borrow the adapter.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Dispose the adapter and return it.
    pub fn into_port(mut self) -> P {
        self.port.dispose();
        self.port
    }
}
