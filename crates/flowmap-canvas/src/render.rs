// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene derivation from mapping + view.

use std::collections::HashMap;

use flowmap_graph::{DataFlow, Element, ElementId, Mapping};
use flowmap_scene_port::{
    canonicalize_coord, canonicalize_point, BadgeDef, BadgeStyle, ConnectorDef, EdgeKey, Emphasis,
    GridDef, HighlightState, NodeKey, Point, Scene, Size, ViewState,
};
use tracing::warn;

use crate::geometry::{arrow_head, border_point};
use crate::style::{flow_stroke, kind_style, security_style, GRID_LINE};

/// Badge width at 100% zoom.
pub const BADGE_WIDTH: f64 = 128.0;
/// Badge height at 100% zoom.
pub const BADGE_HEIGHT: f64 = 72.0;
/// Size multiplier for the selected badge.
pub const SELECTED_SCALE: f64 = 1.1;

const GRID_SPACING: f64 = 20.0;
const CANVAS_MARGIN: f64 = 64.0;
const MIN_CANVAS: Size = Size {
    width: 1200.0,
    height: 800.0,
};
const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 5.0;

/// Derive the scene for `mapping` under `view`.
pub fn render_mapping(mapping: &Mapping, view: &ViewState, highlight: &HighlightState) -> Scene {
    render_parts(mapping.elements(), mapping.flows(), view, highlight)
}

/// Derive a scene from raw element and flow slices.
///
/// Flows whose source or target is not among `elements` are skipped.
pub fn render_parts(
    elements: &[Element],
    flows: &[DataFlow],
    view: &ViewState,
    highlight: &HighlightState,
) -> Scene {
    let scale = view.zoom.scale();

    let badges: Vec<BadgeDef> = elements
        .iter()
        .map(|el| badge_for(el, scale, highlight.is_selected(el.id.as_str())))
        .collect();
    let by_id: HashMap<&ElementId, &BadgeDef> = elements
        .iter()
        .map(|el| &el.id)
        .zip(badges.iter())
        .collect();

    let mut connectors = Vec::with_capacity(flows.len());
    for flow in flows {
        let (Some(src), Some(dst)) = (by_id.get(&flow.source), by_id.get(&flow.target)) else {
            warn!(
                flow = %flow.id,
                source = %flow.source,
                target = %flow.target,
                "skipping flow with missing endpoint"
            );
            continue;
        };
        connectors.push(connector_for(flow, src, dst, scale));
    }

    let grid = view.show_grid.then(|| GridDef {
        spacing: canonicalize_coord(GRID_SPACING * scale),
        color: GRID_LINE,
    });

    Scene {
        extent: extent_for(elements, scale),
        scale,
        grid,
        badges,
        connectors,
    }
}

fn badge_for(el: &Element, scale: f64, selected: bool) -> BadgeDef {
    let kind = kind_style(el.kind);
    let base = security_style(el.security_level);
    let grow = if selected { SELECTED_SCALE } else { 1.0 };
    let width = BADGE_WIDTH * scale * grow;
    let height = BADGE_HEIGHT * scale * grow;
    // Selection grows the badge about its unselected center.
    let origin = Point::new(
        el.position.x * scale - (width - BADGE_WIDTH * scale) / 2.0,
        el.position.y * scale - (height - BADGE_HEIGHT * scale) / 2.0,
    );
    BadgeDef {
        key: NodeKey(el.id.to_string()),
        origin: canonicalize_point(origin),
        size: Size {
            width: canonicalize_coord(width),
            height: canonicalize_coord(height),
        },
        label: el.name.clone(),
        caption: format!("{} · {}", el.kind.label(), el.cui_category),
        icon: kind.icon,
        accent: kind.accent,
        style: BadgeStyle {
            border_width: canonicalize_coord(base.border_width * scale),
            ..base
        },
        emphasis: if selected {
            Emphasis::Selected
        } else {
            Emphasis::None
        },
    }
}

fn connector_for(flow: &DataFlow, src: &BadgeDef, dst: &BadgeDef, scale: f64) -> ConnectorDef {
    let stroke = flow_stroke(flow.cui_involved);
    let start = canonicalize_point(src.center());
    let end = canonicalize_point(dst.center());
    let half = Size {
        width: dst.size.width / 2.0,
        height: dst.size.height / 2.0,
    };
    let tip = border_point(end, half, start);
    ConnectorDef {
        key: EdgeKey(flow.id.to_string()),
        from: src.key.clone(),
        to: dst.key.clone(),
        start,
        end,
        arrow: arrow_head(start, tip, ARROW_LENGTH * scale, ARROW_HALF_WIDTH * scale),
        width: canonicalize_coord(stroke.width * scale),
        style: stroke.style,
        color: stroke.color,
    }
}

fn extent_for(elements: &[Element], scale: f64) -> Size {
    let (max_x, max_y) = elements
        .iter()
        .filter(|el| el.position.x.is_finite() && el.position.y.is_finite())
        .fold((0.0_f64, 0.0_f64), |(mx, my), el| {
            (
                mx.max(el.position.x + BADGE_WIDTH),
                my.max(el.position.y + BADGE_HEIGHT),
            )
        });
    Size {
        width: canonicalize_coord((max_x + CANVAS_MARGIN).max(MIN_CANVAS.width) * scale),
        height: canonicalize_coord((max_y + CANVAS_MARGIN).max(MIN_CANVAS.height) * scale),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;
    use flowmap_graph::{ElementKind, FlowPatch, Position};
    use flowmap_scene_port::LineStyle;

    fn two_node_mapping() -> (Mapping, ElementId, ElementId) {
        let mut m = Mapping::new();
        let a = m
            .add_element_at(ElementKind::System, Position::new(0.0, 0.0))
            .id
            .clone();
        let b = m
            .add_element_at(ElementKind::Storage, Position::new(400.0, 0.0))
            .id
            .clone();
        (m, a, b)
    }

    #[test]
    fn badges_sit_at_stored_positions() {
        let (m, a, b) = two_node_mapping();
        let scene = render_mapping(&m, &ViewState::default(), &HighlightState::default());
        assert_eq!(scene.badges.len(), 2);
        assert_eq!(scene.badge(a.as_str()).unwrap().origin, Point::new(0.0, 0.0));
        assert_eq!(scene.badge(b.as_str()).unwrap().origin, Point::new(400.0, 0.0));
        assert!(scene.grid.is_none());
    }

    #[test]
    fn connector_runs_center_to_center_with_arrow_on_target_border() {
        let (mut m, a, b) = two_node_mapping();
        let f = m.add_flow(&a, &b).unwrap().id.clone();
        let scene = render_mapping(&m, &ViewState::default(), &HighlightState::default());
        let c = scene.connector(f.as_str()).unwrap();
        assert_eq!(c.start, Point::new(64.0, 36.0));
        assert_eq!(c.end, Point::new(464.0, 36.0));
        assert_eq!(c.arrow.tip, Point::new(400.0, 36.0));
        assert_eq!(c.style, LineStyle::Solid);
    }

    #[test]
    fn non_cui_flow_is_dashed() {
        let (mut m, a, b) = two_node_mapping();
        let f = m.add_flow(&a, &b).unwrap().id.clone();
        m.update_flow(
            &f,
            FlowPatch {
                cui_involved: Some(false),
                ..FlowPatch::default()
            },
        );
        let scene = render_mapping(&m, &ViewState::default(), &HighlightState::default());
        assert_eq!(scene.connectors[0].style, LineStyle::Dashed);
    }

    #[test]
    fn zoom_scales_scene_not_model() {
        let (m, _, b) = two_node_mapping();
        let before = m.clone();
        let scene = render_mapping(&m, &ViewState::new(200, true), &HighlightState::default());
        let badge = scene.badge(b.as_str()).unwrap();
        assert_eq!(badge.origin, Point::new(800.0, 0.0));
        assert!((badge.size.width - BADGE_WIDTH * 2.0).abs() < 1e-9);
        assert!((scene.grid.unwrap().spacing - 40.0).abs() < 1e-9);
        assert_eq!(m, before);
    }

    #[test]
    fn selected_badge_grows_about_its_center() {
        let (m, a, _) = two_node_mapping();
        let plain = render_mapping(&m, &ViewState::default(), &HighlightState::default());
        let picked = render_mapping(
            &m,
            &ViewState::default(),
            &HighlightState::selecting(a.as_str()),
        );
        let p = plain.badge(a.as_str()).unwrap();
        let s = picked.badge(a.as_str()).unwrap();
        assert_eq!(s.emphasis, Emphasis::Selected);
        assert_eq!(p.emphasis, Emphasis::None);
        assert!(s.size.width > p.size.width);
        assert!((s.center().x - p.center().x).abs() < 1e-9);
        assert!((s.center().y - p.center().y).abs() < 1e-9);
    }

    #[test]
    fn extent_covers_far_elements() {
        let mut m = Mapping::new();
        m.add_element_at(ElementKind::User, Position::new(3000.0, 2000.0));
        let scene = render_mapping(&m, &ViewState::new(50, false), &HighlightState::default());
        assert!(scene.extent.width >= (3000.0 + BADGE_WIDTH) * 0.5);
        assert!(scene.extent.height >= (2000.0 + BADGE_HEIGHT) * 0.5);
    }
}
