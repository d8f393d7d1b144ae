// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Value types for mapping elements, flows, and mapping metadata.
//!
//! Field names serialize in camelCase and enum values in the lowercase /
//! snake_case vocabulary of the interchange format.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::{ElementId, FlowId};

/// Classification tag assigned to new elements.
pub const DEFAULT_CUI_CATEGORY: &str = "CRAD";
/// Access controls assigned to new elements.
pub const DEFAULT_ACCESS_CONTROLS: [&str; 2] = ["Encryption", "Access Logging"];
/// Protections assigned to new flows.
pub const DEFAULT_PROTECTIONS: [&str; 1] = ["Encryption"];
/// Canvas position assigned to new elements when the caller supplies none.
pub const DEFAULT_POSITION: Position = Position { x: 100.0, y: 100.0 };

/// Kind of graph node. Determines icon and color on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// An information system.
    System,
    /// A business or technical process.
    Process,
    /// A data store.
    Storage,
    /// A human user or role.
    User,
    /// A party outside the system boundary.
    External,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 5] = [
        Self::System,
        Self::Process,
        Self::Storage,
        Self::User,
        Self::External,
    ];

    /// Wire name (`"system"`, `"storage"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Process => "process",
            Self::Storage => "storage",
            Self::User => "user",
            Self::External => "external",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Process => "Process",
            Self::Storage => "Storage",
            Self::User => "User",
            Self::External => "External",
        }
    }

    /// Parse a wire name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }
}

/// Security level of an element. Determines border and fill styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Low impact.
    Low,
    /// Moderate impact.
    #[default]
    Moderate,
    /// High impact.
    High,
}

impl SecurityLevel {
    /// Every level, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::High];

    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Parse a wire name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == raw)
    }
}

/// Direction/purpose of a data flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowType {
    /// Data entering the target.
    #[default]
    DataInput,
    /// Data leaving the source.
    DataOutput,
    /// Data transformed in transit.
    DataProcessing,
    /// Data written to storage.
    DataStorage,
}

impl FlowType {
    /// Every flow type.
    pub const ALL: [Self; 4] = [
        Self::DataInput,
        Self::DataOutput,
        Self::DataProcessing,
        Self::DataStorage,
    ];

    /// Wire name (`"data_input"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataInput => "data_input",
            Self::DataOutput => "data_output",
            Self::DataProcessing => "data_processing",
            Self::DataStorage => "data_storage",
        }
    }

    /// Parse a wire name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

/// Canvas-space coordinates. Unconstrained; elements may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Construct a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite. Mappings only ever hold finite positions.
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Position {
    fn default() -> Self {
        DEFAULT_POSITION
    }
}

/// Ownership and handling metadata attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMetadata {
    /// Accountable owner.
    pub owner: String,
    /// Classification marking.
    pub classification: String,
    /// Retention period, free text.
    pub retention_period: String,
    /// Access controls in force.
    pub access_controls: Vec<String>,
}

impl Default for ElementMetadata {
    fn default() -> Self {
        Self {
            owner: String::new(),
            classification: String::new(),
            retention_period: String::new(),
            access_controls: DEFAULT_ACCESS_CONTROLS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// Graph node.
///
/// The interchange format also carries a `connections` list per element; it
/// is derived from the flow set on export (see [`crate::Mapping::connections_of`])
/// and not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Immutable unique id.
    pub id: ElementId,
    /// Display label.
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Free text.
    pub description: String,
    /// Classification tag.
    pub cui_category: String,
    /// Security level.
    pub security_level: SecurityLevel,
    /// Canvas anchor (top-left of the badge).
    pub position: Position,
    /// Handling metadata.
    pub metadata: ElementMetadata,
}

impl Element {
    /// New element with default attributes for `kind`.
    pub fn new(id: ElementId, kind: ElementKind, position: Position) -> Self {
        Self {
            id,
            name: format!("New {}", kind.label()),
            kind,
            description: String::new(),
            cui_category: DEFAULT_CUI_CATEGORY.to_owned(),
            security_level: SecurityLevel::default(),
            position,
            metadata: ElementMetadata::default(),
        }
    }
}

/// Directed graph edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlow {
    /// Unique id.
    pub id: FlowId,
    /// Origin element.
    pub source: ElementId,
    /// Destination element.
    pub target: ElementId,
    /// Flow purpose.
    pub flow_type: FlowType,
    /// Whether CUI travels over this flow.
    pub cui_involved: bool,
    /// Control names protecting the flow.
    pub protections: Vec<String>,
    /// Free text.
    pub description: String,
}

impl DataFlow {
    /// New flow with default attributes.
    pub fn new(id: FlowId, source: ElementId, target: ElementId) -> Self {
        Self {
            id,
            source,
            target,
            flow_type: FlowType::default(),
            cui_involved: true,
            protections: DEFAULT_PROTECTIONS.iter().map(|s| (*s).to_owned()).collect(),
            description: String::new(),
        }
    }

    /// Whether `element` is either endpoint.
    pub fn touches(&self, element: &ElementId) -> bool {
        &self.source == element || &self.target == element
    }
}

/// Mapping-level descriptive metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingMetadata {
    /// Name of the system being mapped.
    pub system_name: String,
    /// Mapping owner.
    pub owner: String,
    /// Time of the last mutation.
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    /// Document version.
    pub version: String,
    /// Compliance framework the mapping is assessed against.
    pub compliance_framework: String,
}

impl Default for MappingMetadata {
    fn default() -> Self {
        Self {
            system_name: "Untitled System".to_owned(),
            owner: String::new(),
            last_updated: OffsetDateTime::now_utc(),
            version: "1.0".to_owned(),
            compliance_framework: "NIST SP 800-171".to_owned(),
        }
    }
}
