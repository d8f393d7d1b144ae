// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Coordinate canonicalization for deterministic scenes.
//!
//! Renderers run every derived coordinate through these so that the same
//! mapping and view always produce byte-identical adapter output.

use crate::types::Point;

/// Round to hundredths and fold `-0.0` into `0.0`.
///
/// Non-finite input maps to `0.0`; stored positions are user data and a bad
/// value must not poison the whole scene.
pub fn canonicalize_coord(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let rounded = (x * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Canonicalize both components of a point.
pub fn canonicalize_point(p: Point) -> Point {
    Point::new(canonicalize_coord(p.x), canonicalize_coord(p.y))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;

    #[test]
    fn test_negative_zero() {
        assert_eq!(canonicalize_coord(-0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(canonicalize_coord(-0.001).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_rounding() {
        assert!((canonicalize_coord(1.23456) - 1.23).abs() < 1e-12);
        assert!((canonicalize_coord(-7.005_1) + 7.01).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_collapses() {
        assert_eq!(canonicalize_coord(f64::NAN), 0.0);
        assert_eq!(canonicalize_coord(f64::NEG_INFINITY), 0.0);
    }
}
