// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A host loop: session changes flag a redraw, the host re-derives the scene.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
use std::cell::Cell;
use std::rc::Rc;

use flowmap_app_core::render_port::RenderPort;
use flowmap_app_core::EditorSession;
use flowmap_canvas::{Canvas, RecordingAdapter};
use flowmap_graph::{ElementKind, FlowPatch, Mapping};
use flowmap_scene_port::{Emphasis, LineStyle};

#[derive(Clone, Default)]
struct DirtyFlag(Rc<Cell<bool>>);

impl RenderPort for DirtyFlag {
    fn request_redraw(&self) {
        self.0.set(true);
    }
}

struct Host {
    session: EditorSession,
    canvas: Canvas<RecordingAdapter>,
    dirty: DirtyFlag,
}

impl Host {
    fn new() -> Self {
        let dirty = DirtyFlag::default();
        Self {
            session: EditorSession::new(Mapping::new()).with_render_port(dirty.clone()),
            canvas: Canvas::new(RecordingAdapter::new()),
            dirty,
        }
    }

    fn frame(&mut self) {
        if self.dirty.0.replace(false) {
            let s = &self.session;
            self.canvas
                .redraw(s.mapping(), s.view(), &s.highlight())
                .expect("recorder never fails");
        }
    }

    fn scene(&self) -> &flowmap_scene_port::Scene {
        self.canvas.port().last.as_ref().expect("presented")
    }
}

#[test]
fn scene_tracks_session_state() {
    let mut host = Host::new();
    let a = host.session.add_element(ElementKind::System);
    let b = host.session.add_element(ElementKind::Storage);
    let f = host.session.add_flow(&a, &b).expect("connect");
    host.session.select(&a);
    host.frame();
    host.frame();
    assert_eq!(host.canvas.port().present_count, 1);

    let scene = host.scene();
    assert_eq!(scene.badges.len(), 2);
    assert_eq!(scene.connectors.len(), 1);
    assert_eq!(
        scene.badge(a.as_str()).map(|b| b.emphasis),
        Some(Emphasis::Selected)
    );
    assert_eq!(
        scene.connector(f.as_str()).map(|c| c.style),
        Some(LineStyle::Solid)
    );

    host.session.update_flow(
        &f,
        FlowPatch {
            cui_involved: Some(false),
            ..FlowPatch::default()
        },
    );
    host.session.zoom_out();
    host.frame();
    let scene = host.scene();
    assert_eq!(
        scene.connector(f.as_str()).map(|c| c.style),
        Some(LineStyle::Dashed)
    );
    assert!((scene.scale - 0.75).abs() < f64::EPSILON);

    host.session.delete_element(&a);
    host.frame();
    let scene = host.scene();
    assert_eq!(scene.badges.len(), 1);
    assert!(scene.connectors.is_empty());
    assert!(scene.badges.iter().all(|b| b.emphasis == Emphasis::None));
    assert_eq!(host.canvas.port().present_count, 3);
}
