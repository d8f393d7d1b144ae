// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! View transform: zoom level and grid overlay.
//!
//! The view scales the drawn scene only. Stored element coordinates are never
//! rewritten by zooming.

/// Zoom level as an integer percentage, always within
/// [`ZoomLevel::MIN`]..=[`ZoomLevel::MAX`] and a multiple of [`ZoomLevel::STEP`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(u16);

impl ZoomLevel {
    /// Smallest zoom (percent).
    pub const MIN: u16 = 50;
    /// Largest zoom (percent).
    pub const MAX: u16 = 200;
    /// Increment for zoom in/out (percent).
    pub const STEP: u16 = 25;
    /// Reset target (percent).
    pub const DEFAULT: u16 = 100;

    /// Clamp `percent` into range and snap it to the nearest step.
    pub fn new(percent: u16) -> Self {
        let clamped = percent.clamp(Self::MIN, Self::MAX);
        let offset = clamped - Self::MIN;
        let snapped = (offset + Self::STEP / 2) / Self::STEP * Self::STEP;
        Self((Self::MIN + snapped).min(Self::MAX))
    }

    /// Percentage value.
    pub const fn percent(self) -> u16 {
        self.0
    }

    /// Multiplicative factor (100% = 1.0).
    pub fn scale(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// One step larger, saturating at the maximum.
    pub fn stepped_in(self) -> Self {
        Self((self.0 + Self::STEP).min(Self::MAX))
    }

    /// One step smaller, saturating at the minimum.
    pub fn stepped_out(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP).max(Self::MIN))
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// View parameters supplied alongside the mapping when rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Current zoom.
    pub zoom: ZoomLevel,
    /// Whether the background grid is drawn.
    pub show_grid: bool,
}

impl ViewState {
    /// View at `zoom` percent with the grid toggled as given.
    pub fn new(zoom_percent: u16, show_grid: bool) -> Self {
        Self {
            zoom: ZoomLevel::new(zoom_percent),
            show_grid,
        }
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) {
        self.zoom = self.zoom.stepped_in();
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.stepped_out();
    }

    /// Return to 100%.
    pub fn reset_zoom(&mut self) {
        self.zoom = ZoomLevel::default();
    }

    /// Flip the grid overlay.
    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;

    #[test]
    fn zoom_saturates_at_bounds() {
        let mut v = ViewState::default();
        for _ in 0..10 {
            v.zoom_in();
        }
        assert_eq!(v.zoom.percent(), 200);
        for _ in 0..10 {
            v.zoom_out();
        }
        assert_eq!(v.zoom.percent(), 50);
        v.reset_zoom();
        assert_eq!(v.zoom.percent(), 100);
    }

    #[test]
    fn zoom_steps_by_quarter() {
        let mut v = ViewState::default();
        v.zoom_in();
        assert_eq!(v.zoom.percent(), 125);
        assert!((v.zoom.scale() - 1.25).abs() < f64::EPSILON);
        v.zoom_out();
        v.zoom_out();
        assert_eq!(v.zoom.percent(), 75);
    }

    #[test]
    fn new_clamps_and_snaps() {
        assert_eq!(ZoomLevel::new(0).percent(), 50);
        assert_eq!(ZoomLevel::new(1000).percent(), 200);
        assert_eq!(ZoomLevel::new(110).percent(), 100);
        assert_eq!(ZoomLevel::new(113).percent(), 125);
        assert_eq!(ZoomLevel::new(190).percent(), 200);
    }

    #[test]
    fn grid_toggle_is_cosmetic_state_only() {
        let mut v = ViewState::new(150, false);
        v.toggle_grid();
        assert!(v.show_grid);
        assert_eq!(v.zoom.percent(), 150);
    }
}
