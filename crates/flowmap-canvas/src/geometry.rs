// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Connector geometry: badge-border clipping and arrowhead construction.

use flowmap_scene_port::{canonicalize_point, ArrowHead, Point, Size};

/// Where the segment from `center` toward `toward` leaves a box of
/// half-extent `half` centered on `center`.
///
/// If `toward` lies inside the box (overlapping badges) the result is
/// `toward` itself; coincident points return `center`.
pub(crate) fn border_point(center: Point, half: Size, toward: Point) -> Point {
    let dx = toward.x - center.x;
    let dy = toward.y - center.y;
    if dx == 0.0 && dy == 0.0 {
        return center;
    }
    let tx = if dx == 0.0 {
        f64::INFINITY
    } else {
        half.width / dx.abs()
    };
    let ty = if dy == 0.0 {
        f64::INFINITY
    } else {
        half.height / dy.abs()
    };
    let t = tx.min(ty).min(1.0);
    Point::new(center.x + dx * t, center.y + dy * t)
}

/// Arrowhead with its tip at `tip`, pointing along `from -> tip`.
pub(crate) fn arrow_head(from: Point, tip: Point, length: f64, half_width: f64) -> ArrowHead {
    let dx = tip.x - from.x;
    let dy = tip.y - from.y;
    let len = dx.hypot(dy);
    let (ux, uy) = if len > 0.0 {
        (dx / len, dy / len)
    } else {
        (1.0, 0.0)
    };
    let base = Point::new(tip.x - ux * length, tip.y - uy * length);
    let (nx, ny) = (-uy, ux);
    ArrowHead {
        tip: canonicalize_point(tip),
        left: canonicalize_point(Point::new(base.x + nx * half_width, base.y + ny * half_width)),
        right: canonicalize_point(Point::new(base.x - nx * half_width, base.y - ny * half_width)),
    }
}
