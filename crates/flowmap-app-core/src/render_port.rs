// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port trait for front ends to learn that the scene must be re-derived,
//! without the session depending on any drawing backend.

/// Minimal redraw port; implementations are expected to be cheap and
/// typically just schedule a `Canvas::redraw` on the host side.
pub trait RenderPort {
    /// Request a redraw of the mapping canvas.
    fn request_redraw(&self);
}
