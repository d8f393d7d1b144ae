// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Partial updates for elements and flows.
//!
//! Only `Some` fields are written; everything else keeps its prior value.
//! Ids and flow endpoints are not patchable.

use serde::{Deserialize, Serialize};

use crate::model::{DataFlow, Element, ElementKind, ElementMetadata, FlowType, Position, SecurityLevel};

/// Partial update for [`Element`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    /// New display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New classification tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cui_category: Option<String>,
    /// New security level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level: Option<SecurityLevel>,
    /// New canvas position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Metadata fields to merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ElementMetadataPatch>,
}

/// Partial update for [`ElementMetadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementMetadataPatch {
    /// New owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// New classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// New retention period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_period: Option<String>,
    /// Replacement access-control list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_controls: Option<Vec<String>>,
}

/// Partial update for [`DataFlow`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowPatch {
    /// New flow type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<FlowType>,
    /// New CUI flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cui_involved: Option<bool>,
    /// Replacement protections list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protections: Option<Vec<String>>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl ElementPatch {
    /// Patch that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that only moves.
    pub fn move_to(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, el: &mut Element) {
        merge(&mut el.name, self.name);
        merge(&mut el.kind, self.kind);
        merge(&mut el.description, self.description);
        merge(&mut el.cui_category, self.cui_category);
        merge(&mut el.security_level, self.security_level);
        merge(&mut el.position, self.position);
        if let Some(meta) = self.metadata {
            meta.apply(&mut el.metadata);
        }
    }
}

impl ElementMetadataPatch {
    fn apply(self, meta: &mut ElementMetadata) {
        merge(&mut meta.owner, self.owner);
        merge(&mut meta.classification, self.classification);
        merge(&mut meta.retention_period, self.retention_period);
        merge(&mut meta.access_controls, self.access_controls);
    }
}

impl FlowPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, flow: &mut DataFlow) {
        merge(&mut flow.flow_type, self.flow_type);
        merge(&mut flow.cui_involved, self.cui_involved);
        merge(&mut flow.protections, self.protections);
        merge(&mut flow.description, self.description);
    }
}
