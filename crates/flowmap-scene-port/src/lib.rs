// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port contract for flowmap renderers.
//!
//! The canvas renderer derives a complete [`Scene`] from the current mapping
//! on every state change and hands it to a [`ScenePort`] adapter (SVG, a UI
//! toolkit, a test recorder). Adapters draw; they never interpret mapping
//! data.
//!
//! # Design Principles
//!
//! - **Scenes are whole**: every present call carries the full scene; there
//!   are no deltas to reconcile.
//! - **Screen space**: scene coordinates already include the zoom scale.
//!   Stored element coordinates are never altered by the view.
//! - **Pan is scroll**: the scene declares its extent; the host viewport
//!   scrolls over it. No inverse pointer mapping is required.

use thiserror::Error;

/// Error type for presenting a scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentError {
    /// Formatting the adapter's output failed.
    #[error("format error")]
    Format(#[from] core::fmt::Error),
    /// A backend-specific error occurred.
    #[error("backend error: {0}")]
    Backend(String),
}

mod canon;
mod highlight;
mod port;
mod types;
mod view;

pub use canon::{canonicalize_coord, canonicalize_point};
pub use highlight::HighlightState;
pub use port::ScenePort;
pub use types::{
    ArrowHead, BadgeDef, BadgeStyle, ColorRgba8, ConnectorDef, EdgeKey, Emphasis, GridDef, Icon,
    LineStyle, NodeKey, Point, Scene, Size,
};
pub use view::{ViewState, ZoomLevel};
