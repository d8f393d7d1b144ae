// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical data-flow mapping shared across flowmap tools.
//!
//! A [`Mapping`] is a directed graph of [`Element`]s connected by
//! [`DataFlow`]s, annotated with CUI sensitivity metadata. The mapping is the
//! sole owner of both sets; all mutations go through it so the flow set never
//! references an element that is not present.
//!
//! # Invariants
//!
//! - Element and flow ids are unique for the lifetime of a mapping instance.
//! - Every flow's `source` and `target` resolve to an element in the mapping.
//! - Deleting an element deletes every flow that touches it.
//! - No flow connects an element to itself.
//! - Every element position is finite.

mod ids;
mod mapping;
mod model;
mod patch;

pub use ids::{ElementId, FlowId};
pub use mapping::Mapping;
pub use model::{
    DataFlow, Element, ElementKind, ElementMetadata, FlowType, MappingMetadata, Position,
    SecurityLevel, DEFAULT_ACCESS_CONTROLS, DEFAULT_CUI_CATEGORY, DEFAULT_POSITION,
    DEFAULT_PROTECTIONS,
};
pub use patch::{ElementMetadataPatch, ElementPatch, FlowPatch};

use thiserror::Error;

/// Errors raised by validated mapping construction and by `add_flow`.
///
/// The lenient CRUD entry points (`update_*`, `delete_*`) never produce these;
/// unknown ids there are a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A referenced element id is not present in the mapping.
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),
    /// A flow would connect an element to itself.
    #[error("self-loop flows are not allowed (element {0})")]
    SelfLoop(ElementId),
    /// Two elements share the same id.
    #[error("duplicate element id: {0}")]
    DuplicateElement(ElementId),
    /// Two flows share the same id.
    #[error("duplicate flow id: {0}")]
    DuplicateFlow(FlowId),
    /// An element position is NaN or infinite.
    #[error("element {0} has a non-finite position")]
    NonFinitePosition(ElementId),
    /// A flow references an element that is not present.
    #[error("flow {flow} references missing element {endpoint}")]
    DanglingFlow {
        /// Offending flow.
        flow: FlowId,
        /// Endpoint id that did not resolve.
        endpoint: ElementId,
    },
}
