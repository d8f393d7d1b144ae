// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The mapping aggregate and its mutation entry points.

use std::collections::HashSet;

use time::OffsetDateTime;
use tracing::debug;

use crate::ids::{seq_of, ElementId, FlowId, ELEMENT_PREFIX, FLOW_PREFIX};
use crate::model::{DataFlow, Element, ElementKind, MappingMetadata, Position, DEFAULT_POSITION};
use crate::patch::{ElementPatch, FlowPatch};
use crate::MappingError;

/// Aggregate root: elements, flows, and descriptive metadata.
///
/// Elements and flows keep insertion order so list views stay stable.
/// Equality compares content only; id allocation state is ignored.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    elements: Vec<Element>,
    flows: Vec<DataFlow>,
    metadata: MappingMetadata,
    element_seq: u64,
    flow_seq: u64,
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
            && self.flows == other.flows
            && self.metadata == other.metadata
    }
}

impl Mapping {
    /// Empty mapping with default metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mapping with the given metadata.
    pub fn with_metadata(metadata: MappingMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Build a mapping from previously exported parts, checking every invariant.
    ///
    /// Id allocation resumes above the highest generated-style id present so
    /// later additions never collide with imported ids.
    pub fn from_parts(
        metadata: MappingMetadata,
        elements: Vec<Element>,
        flows: Vec<DataFlow>,
    ) -> Result<Self, MappingError> {
        let mut element_ids = HashSet::with_capacity(elements.len());
        for el in &elements {
            if !element_ids.insert(&el.id) {
                return Err(MappingError::DuplicateElement(el.id.clone()));
            }
            if !el.position.is_finite() {
                return Err(MappingError::NonFinitePosition(el.id.clone()));
            }
        }
        let mut flow_ids = HashSet::with_capacity(flows.len());
        for flow in &flows {
            if !flow_ids.insert(&flow.id) {
                return Err(MappingError::DuplicateFlow(flow.id.clone()));
            }
            for endpoint in [&flow.source, &flow.target] {
                if !element_ids.contains(endpoint) {
                    return Err(MappingError::DanglingFlow {
                        flow: flow.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
            if flow.source == flow.target {
                return Err(MappingError::SelfLoop(flow.source.clone()));
            }
        }
        let element_seq = elements
            .iter()
            .filter_map(|e| seq_of(e.id.as_str(), ELEMENT_PREFIX))
            .max()
            .unwrap_or(0);
        let flow_seq = flows
            .iter()
            .filter_map(|f| seq_of(f.id.as_str(), FLOW_PREFIX))
            .max()
            .unwrap_or(0);
        Ok(Self {
            elements,
            flows,
            metadata,
            element_seq,
            flow_seq,
        })
    }

    /// Decompose into `(metadata, elements, flows)`.
    pub fn into_parts(self) -> (MappingMetadata, Vec<Element>, Vec<DataFlow>) {
        (self.metadata, self.elements, self.flows)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// All flows in insertion order.
    pub fn flows(&self) -> &[DataFlow] {
        &self.flows
    }

    /// Mapping metadata.
    pub fn metadata(&self) -> &MappingMetadata {
        &self.metadata
    }

    /// Mutable metadata. Does not bump `last_updated`.
    pub fn metadata_mut(&mut self) -> &mut MappingMetadata {
        &mut self.metadata
    }

    /// Look up an element.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Look up a flow.
    pub fn flow(&self, id: &FlowId) -> Option<&DataFlow> {
        self.flows.iter().find(|f| &f.id == id)
    }

    /// Whether an element with `id` is present.
    pub fn contains_element(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// True when there are no elements (and therefore no flows).
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ids of every flow whose source or target is `id`, in flow order.
    pub fn connections_of(&self, id: &ElementId) -> Vec<&FlowId> {
        self.flows
            .iter()
            .filter(|f| f.touches(id))
            .map(|f| &f.id)
            .collect()
    }

    /// Number of flows with `cui_involved` set.
    pub fn cui_flow_count(&self) -> usize {
        self.flows.iter().filter(|f| f.cui_involved).count()
    }

    /// Create an element of `kind` at the default position.
    pub fn add_element(&mut self, kind: ElementKind) -> &Element {
        self.add_element_at(kind, DEFAULT_POSITION)
    }

    /// Create an element of `kind` at `position`.
    ///
    /// A non-finite `position` is replaced by [`DEFAULT_POSITION`].
    pub fn add_element_at(&mut self, kind: ElementKind, position: Position) -> &Element {
        let position = if position.is_finite() {
            position
        } else {
            debug!(x = position.x, y = position.y, "non-finite position replaced by default");
            DEFAULT_POSITION
        };
        let id = self.next_element_id();
        debug!(element = %id, kind = kind.as_str(), "add element");
        self.touch();
        let idx = self.elements.len();
        self.elements.push(Element::new(id, kind, position));
        &self.elements[idx]
    }

    /// Merge `patch` into the element with `id`.
    ///
    /// Returns false, changing nothing, if `id` is absent or the patch
    /// carries a non-finite position.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        if patch.position.is_some_and(|p| !p.is_finite()) {
            debug!(element = %id, "update ignored: non-finite position");
            return false;
        }
        let Some(el) = self.elements.iter_mut().find(|e| &e.id == id) else {
            debug!(element = %id, "update ignored: unknown element");
            return false;
        };
        patch.apply(el);
        debug!(element = %id, "update element");
        self.touch();
        true
    }

    /// Reposition an element; shorthand for a position-only update.
    pub fn move_element(&mut self, id: &ElementId, position: Position) -> bool {
        self.update_element(id, ElementPatch::move_to(position))
    }

    /// Remove the element with `id` and every flow touching it.
    ///
    /// Returns the removed element, or `None` if absent (no mutation).
    pub fn delete_element(&mut self, id: &ElementId) -> Option<Element> {
        let Some(idx) = self.elements.iter().position(|e| &e.id == id) else {
            debug!(element = %id, "delete ignored: unknown element");
            return None;
        };
        let removed = self.elements.remove(idx);
        let before = self.flows.len();
        self.flows.retain(|f| !f.touches(id));
        debug!(
            element = %id,
            cascaded = before - self.flows.len(),
            "delete element"
        );
        self.touch();
        Some(removed)
    }

    /// Connect `source` to `target` with a new default flow.
    ///
    /// Both endpoints must exist and differ; otherwise the mapping is left
    /// untouched and an error is returned. Parallel flows between the same
    /// pair are allowed.
    pub fn add_flow(
        &mut self,
        source: &ElementId,
        target: &ElementId,
    ) -> Result<&DataFlow, MappingError> {
        for endpoint in [source, target] {
            if !self.contains_element(endpoint) {
                debug!(element = %endpoint, "add flow rejected: unknown endpoint");
                return Err(MappingError::UnknownElement(endpoint.clone()));
            }
        }
        if source == target {
            return Err(MappingError::SelfLoop(source.clone()));
        }
        let id = self.next_flow_id();
        debug!(flow = %id, source = %source, target = %target, "add flow");
        self.touch();
        let idx = self.flows.len();
        self.flows.push(DataFlow::new(id, source.clone(), target.clone()));
        Ok(&self.flows[idx])
    }

    /// Merge `patch` into the flow with `id`. Returns false if absent.
    pub fn update_flow(&mut self, id: &FlowId, patch: FlowPatch) -> bool {
        let Some(flow) = self.flows.iter_mut().find(|f| &f.id == id) else {
            debug!(flow = %id, "update ignored: unknown flow");
            return false;
        };
        patch.apply(flow);
        debug!(flow = %id, "update flow");
        self.touch();
        true
    }

    /// Remove the flow with `id`. Never cascades.
    pub fn delete_flow(&mut self, id: &FlowId) -> Option<DataFlow> {
        let Some(idx) = self.flows.iter().position(|f| &f.id == id) else {
            debug!(flow = %id, "delete ignored: unknown flow");
            return None;
        };
        debug!(flow = %id, "delete flow");
        self.touch();
        Some(self.flows.remove(idx))
    }

    fn next_element_id(&mut self) -> ElementId {
        loop {
            // past u64::MAX, start over and keep skipping ids in use
            self.element_seq = self.element_seq.checked_add(1).unwrap_or(1);
            let id = ElementId::from_seq(self.element_seq);
            if !self.contains_element(&id) {
                return id;
            }
        }
    }

    fn next_flow_id(&mut self) -> FlowId {
        loop {
            self.flow_seq = self.flow_seq.checked_add(1).unwrap_or(1);
            let id = FlowId::from_seq(self.flow_seq);
            if self.flow(&id).is_none() {
                return id;
            }
        }
    }

    fn touch(&mut self) {
        self.metadata.last_updated = OffsetDateTime::now_utc();
    }
}
