// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene derivation through the public API, including dangling-flow handling.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
use flowmap_canvas::{render_parts, Canvas, RecordingAdapter, SvgAdapter};
use flowmap_graph::{DataFlow, ElementKind, Mapping, Position};
use flowmap_scene_port::{HighlightState, ViewState};

fn sample() -> Mapping {
    let mut m = Mapping::new();
    let portal = m
        .add_element_at(ElementKind::User, Position::new(40.0, 60.0))
        .id
        .clone();
    let app = m
        .add_element_at(ElementKind::System, Position::new(320.0, 60.0))
        .id
        .clone();
    let db = m
        .add_element_at(ElementKind::Storage, Position::new(320.0, 300.0))
        .id
        .clone();
    m.add_flow(&portal, &app).expect("portal -> app");
    m.add_flow(&app, &db).expect("app -> db");
    m
}

#[test]
fn dangling_flow_is_skipped_not_fatal() {
    let m = sample();
    let mut flows = m.flows().to_vec();
    flows.push(DataFlow::new(
        "flow-ghost".into(),
        m.elements()[0].id.clone(),
        "el-missing".into(),
    ));
    flows.push(DataFlow::new(
        "flow-orphan".into(),
        "el-gone".into(),
        m.elements()[1].id.clone(),
    ));

    let scene = render_parts(
        m.elements(),
        &flows,
        &ViewState::default(),
        &HighlightState::default(),
    );

    assert_eq!(scene.badges.len(), 3);
    assert_eq!(scene.connectors.len(), 2);
    assert!(scene.connector("flow-ghost").is_none());
    assert!(scene.connector("flow-orphan").is_none());
}

#[test]
fn rendering_is_deterministic() {
    let m = sample();
    let view = ViewState::new(125, true);
    let hl = HighlightState::selecting(m.elements()[1].id.as_str());

    let mut first = Canvas::new(SvgAdapter::new());
    let mut second = Canvas::new(SvgAdapter::new());
    first.redraw(&m, &view, &hl).expect("present");
    second.redraw(&m, &view, &hl).expect("present");

    let a = first.port().document().expect("document");
    let b = second.port().document().expect("document");
    assert_eq!(a, b);
    assert!(a.contains(r#"id="grid""#));
    assert_eq!(a.matches("<polygon").count(), 2);
    assert_eq!(a.matches("data-element=").count(), 3);
}

#[test]
fn canvas_presents_every_redraw() {
    let mut m = sample();
    let mut canvas = Canvas::new(RecordingAdapter::new());
    let view = ViewState::default();
    let hl = HighlightState::default();

    canvas.redraw(&m, &view, &hl).expect("present");
    let victim = m.elements()[1].id.clone();
    m.delete_element(&victim);
    let scene = canvas.redraw(&m, &view, &hl).expect("present");

    assert_eq!(canvas.port().present_count, 2);
    assert_eq!(scene.badges.len(), 2);
    assert!(scene.connectors.is_empty());
    assert_eq!(canvas.port().last.as_ref(), Some(&scene));

    let port = canvas.into_port();
    assert!(port.disposed);
}

#[test]
fn empty_mapping_renders_blank_canvas() {
    let mut canvas = Canvas::new(SvgAdapter::new());
    let scene = canvas
        .redraw(
            &Mapping::new(),
            &ViewState::default(),
            &HighlightState::default(),
        )
        .expect("present");
    assert!(scene.badges.is_empty());
    assert!(scene.extent.width > 0.0);
    assert!(canvas.port().document().is_some());
}
