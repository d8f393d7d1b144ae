// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Editing session: the mapping plus the ancillary UI state around it.
//!
//! The session is the surface a page shell drives. It owns the mapping
//! exclusively, keeps the single selected element (never dangling), and
//! the view state. Every transition that changes anything asks the
//! attached [`RenderPort`] for a redraw.

use std::fmt;

use flowmap_graph::{
    DataFlow, Element, ElementId, ElementKind, ElementPatch, FlowId, FlowPatch, Mapping,
    MappingError, MappingMetadata, Position,
};
use flowmap_scene_port::{HighlightState, ViewState, ZoomLevel};
use time::OffsetDateTime;
use tracing::debug;

use crate::prefs::FlowmapPrefs;
use crate::render_port::RenderPort;

/// Single-user editing session over one mapping.
pub struct EditorSession {
    mapping: Mapping,
    selection: Option<ElementId>,
    view: ViewState,
    render_port: Option<Box<dyn RenderPort>>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("mapping", &self.mapping)
            .field("selection", &self.selection)
            .field("view", &self.view)
            .field("render_port", &self.render_port.is_some())
            .finish()
    }
}

impl EditorSession {
    /// Session over `mapping` with the default view and nothing selected.
    pub fn new(mapping: Mapping) -> Self {
        Self {
            mapping,
            selection: None,
            view: ViewState::new(ZoomLevel::DEFAULT, true),
            render_port: None,
        }
    }

    /// Fresh empty mapping using the saved defaults and initial view.
    pub fn from_prefs(prefs: &FlowmapPrefs, now: OffsetDateTime) -> Self {
        let mut session = Self::new(Mapping::with_metadata(prefs.defaults.metadata(now)));
        session.view = prefs.view.view_state();
        session
    }

    /// Replace the view state.
    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    /// Attach the port notified after each change.
    pub fn with_render_port(mut self, port: impl RenderPort + 'static) -> Self {
        self.render_port = Some(Box::new(port));
        self
    }

    /// Current mapping.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// End the session, keeping the mapping.
    pub fn into_mapping(self) -> Mapping {
        self.mapping
    }

    /// Current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Selected element id, if any.
    pub fn selection(&self) -> Option<&ElementId> {
        self.selection.as_ref()
    }

    /// Selected element, if any.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.as_ref().and_then(|id| self.mapping.element(id))
    }

    /// Highlight state for the renderer.
    pub fn highlight(&self) -> HighlightState {
        self.selection
            .as_ref()
            .map_or_else(HighlightState::default, |id| {
                HighlightState::selecting(id.as_str())
            })
    }

    fn changed(&self) {
        if let Some(port) = &self.render_port {
            port.request_redraw();
        }
    }

    /// Add an element of `kind` at the default position.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let id = self.mapping.add_element(kind).id.clone();
        self.changed();
        id
    }

    /// Add an element of `kind` at `position`.
    pub fn add_element_at(&mut self, kind: ElementKind, position: Position) -> ElementId {
        let id = self.mapping.add_element_at(kind, position).id.clone();
        self.changed();
        id
    }

    /// Merge `patch` into an element. False if `id` is unknown.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        let hit = self.mapping.update_element(id, patch);
        if hit {
            self.changed();
        }
        hit
    }

    /// Reposition an element. False if `id` is unknown.
    pub fn move_element(&mut self, id: &ElementId, position: Position) -> bool {
        let hit = self.mapping.move_element(id, position);
        if hit {
            self.changed();
        }
        hit
    }

    /// Delete an element and its flows; clears the selection if it pointed there.
    pub fn delete_element(&mut self, id: &ElementId) -> Option<Element> {
        let removed = self.mapping.delete_element(id)?;
        if self.selection.as_ref() == Some(id) {
            debug!(element = %id, "selection cleared by delete");
            self.selection = None;
        }
        self.changed();
        Some(removed)
    }

    /// Delete the selected element, if any.
    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selection.clone()?;
        self.delete_element(&id)
    }

    /// Connect two elements.
    pub fn add_flow(
        &mut self,
        source: &ElementId,
        target: &ElementId,
    ) -> Result<FlowId, MappingError> {
        let id = self.mapping.add_flow(source, target)?.id.clone();
        self.changed();
        Ok(id)
    }

    /// Merge `patch` into a flow. False if `id` is unknown.
    pub fn update_flow(&mut self, id: &FlowId, patch: FlowPatch) -> bool {
        let hit = self.mapping.update_flow(id, patch);
        if hit {
            self.changed();
        }
        hit
    }

    /// Delete a flow.
    pub fn delete_flow(&mut self, id: &FlowId) -> Option<DataFlow> {
        let removed = self.mapping.delete_flow(id)?;
        self.changed();
        Some(removed)
    }

    /// Edit mapping metadata; `last_updated` is restamped afterwards.
    pub fn edit_metadata(&mut self, edit: impl FnOnce(&mut MappingMetadata)) {
        let meta = self.mapping.metadata_mut();
        edit(meta);
        meta.last_updated = OffsetDateTime::now_utc();
        self.changed();
    }

    /// Select an existing element. False (selection unchanged) if unknown.
    pub fn select(&mut self, id: &ElementId) -> bool {
        if !self.mapping.contains_element(id) {
            return false;
        }
        if self.selection.as_ref() != Some(id) {
            self.selection = Some(id.clone());
            self.changed();
        }
        true
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.changed();
        }
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) {
        self.set_view(|v| v.zoom_in());
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) {
        self.set_view(|v| v.zoom_out());
    }

    /// Back to 100%.
    pub fn reset_zoom(&mut self) {
        self.set_view(|v| v.reset_zoom());
    }

    /// Flip the grid overlay.
    pub fn toggle_grid(&mut self) {
        self.set_view(|v| v.toggle_grid());
    }

    fn set_view(&mut self, f: impl FnOnce(&mut ViewState)) {
        let before = self.view;
        f(&mut self.view);
        if self.view != before {
            self.changed();
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Counter(Rc<Cell<usize>>);

    impl RenderPort for Counter {
        fn request_redraw(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn session() -> (EditorSession, Counter) {
        let counter = Counter::default();
        let s = EditorSession::new(Mapping::new()).with_render_port(counter.clone());
        (s, counter)
    }

    #[test]
    fn deleting_selected_element_clears_selection() {
        let (mut s, _) = session();
        let a = s.add_element(ElementKind::System);
        let b = s.add_element(ElementKind::Storage);
        s.add_flow(&a, &b).unwrap();
        assert!(s.select(&a));
        assert!(s.highlight().is_selected(a.as_str()));

        s.delete_element(&a).unwrap();
        assert!(s.selection().is_none());
        assert_eq!(s.highlight(), HighlightState::default());
        assert!(s.mapping().flows().is_empty());
    }

    #[test]
    fn deleting_other_element_keeps_selection() {
        let (mut s, _) = session();
        let a = s.add_element(ElementKind::System);
        let b = s.add_element(ElementKind::User);
        s.select(&a);
        s.delete_element(&b);
        assert_eq!(s.selection(), Some(&a));
        assert_eq!(s.selected_element().map(|e| &e.id), Some(&a));
    }

    #[test]
    fn cannot_select_unknown_element() {
        let (mut s, counter) = session();
        assert!(!s.select(&ElementId::from("el-404")));
        assert!(s.selection().is_none());
        assert_eq!(counter.0.get(), 0);
    }

    #[test]
    fn delete_selected_without_selection_is_noop() {
        let (mut s, counter) = session();
        s.add_element(ElementKind::Process);
        let before = counter.0.get();
        assert!(s.delete_selected().is_none());
        assert_eq!(s.mapping().elements().len(), 1);
        assert_eq!(counter.0.get(), before);
    }

    #[test]
    fn redraw_requested_per_effective_transition() {
        let (mut s, counter) = session();
        let a = s.add_element(ElementKind::System);
        let b = s.add_element(ElementKind::External);
        let f = s.add_flow(&a, &b).unwrap();
        assert_eq!(counter.0.get(), 3);

        assert!(s.add_flow(&a, &a).is_err());
        assert!(!s.update_flow(&FlowId::from("flow-404"), FlowPatch::default()));
        assert!(s.delete_flow(&FlowId::from("flow-404")).is_none());
        assert_eq!(counter.0.get(), 3);

        s.update_flow(
            &f,
            FlowPatch {
                cui_involved: Some(false),
                ..FlowPatch::default()
            },
        );
        s.move_element(&b, Position::new(400.0, 220.0));
        s.select(&b);
        s.select(&b);
        s.clear_selection();
        s.clear_selection();
        assert_eq!(counter.0.get(), 7);
    }

    #[test]
    fn view_actions_saturate_quietly() {
        let (mut s, counter) = session();
        for _ in 0..8 {
            s.zoom_in();
        }
        assert_eq!(s.view().zoom.percent(), 200);
        assert_eq!(counter.0.get(), 4);
        s.reset_zoom();
        s.toggle_grid();
        assert_eq!(s.view().zoom.percent(), 100);
        assert!(!s.view().show_grid);
        assert_eq!(counter.0.get(), 6);
    }

    #[test]
    fn metadata_edit_restamps() {
        let (mut s, counter) = session();
        let stale = time::macros::datetime!(2000-01-01 00:00 UTC);
        s.edit_metadata(|m| m.last_updated = stale);
        s.edit_metadata(|m| m.system_name = "Engineering Enclave".into());
        assert_eq!(s.mapping().metadata().system_name, "Engineering Enclave");
        assert!(s.mapping().metadata().last_updated > stale);
        assert_eq!(counter.0.get(), 2);
    }

    #[test]
    fn session_from_prefs_uses_defaults() {
        let mut prefs = FlowmapPrefs::default();
        prefs.defaults.system_name = "Lab Network".into();
        prefs.view.zoom_percent = 75;
        prefs.view.show_grid = false;
        let s = EditorSession::from_prefs(&prefs, OffsetDateTime::now_utc());
        assert_eq!(s.mapping().metadata().system_name, "Lab Network");
        assert_eq!(s.view().zoom.percent(), 75);
        assert!(!s.view().show_grid);
        assert!(s.mapping().is_empty());
    }
}
