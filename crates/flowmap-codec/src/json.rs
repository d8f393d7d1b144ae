// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON export envelope and import.

use flowmap_graph::{DataFlow, Element, FlowId, Mapping, MappingMetadata};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::{debug, warn};

use crate::CodecError;

/// Envelope format tag.
pub const FORMAT_TAG: &str = "cui-flowmap";
/// Highest envelope revision this codec reads and the one it writes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    format: &'static str,
    format_version: u32,
    #[serde(with = "time::serde::rfc3339")]
    exported_at: OffsetDateTime,
    metadata: &'a MappingMetadata,
    elements: Vec<ElementRecord<'a>>,
    flows: &'a [DataFlow],
}

#[derive(Serialize)]
struct ElementRecord<'a> {
    #[serde(flatten)]
    element: &'a Element,
    connections: Vec<&'a FlowId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportDocument {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    format_version: Option<u32>,
    metadata: MappingMetadata,
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    flows: Vec<DataFlow>,
}

/// Serialize the whole mapping as pretty-printed JSON.
///
/// Reads only; the mapping (including `lastUpdated`) is written verbatim.
pub fn export_json(mapping: &Mapping, exported_at: OffsetDateTime) -> Result<String, CodecError> {
    let doc = ExportDocument {
        format: FORMAT_TAG,
        format_version: FORMAT_VERSION,
        exported_at,
        metadata: mapping.metadata(),
        elements: mapping
            .elements()
            .iter()
            .map(|element| ElementRecord {
                element,
                connections: mapping.connections_of(&element.id),
            })
            .collect(),
        flows: mapping.flows(),
    };
    let text = serde_json::to_string_pretty(&doc)?;
    debug!(
        elements = mapping.elements().len(),
        flows = mapping.flows().len(),
        bytes = text.len(),
        "exported mapping"
    );
    Ok(text)
}

/// Parse an exported mapping and re-check its invariants.
pub fn import_json(text: &str) -> Result<Mapping, CodecError> {
    let doc: ImportDocument = serde_json::from_str(text)?;
    if let Some(tag) = doc.format {
        if tag != FORMAT_TAG {
            warn!(format = %tag, "rejecting import: unknown format tag");
            return Err(CodecError::UnsupportedFormat(tag));
        }
    }
    let version = doc.format_version.unwrap_or(FORMAT_VERSION);
    if version > FORMAT_VERSION {
        warn!(version, "rejecting import: newer format version");
        return Err(CodecError::UnsupportedVersion(version));
    }
    let mapping = Mapping::from_parts(doc.metadata, doc.elements, doc.flows).map_err(|e| {
        warn!(error = %e, "rejecting import: integrity violation");
        CodecError::Integrity(e)
    })?;
    debug!(
        elements = mapping.elements().len(),
        flows = mapping.flows().len(),
        "imported mapping"
    );
    Ok(mapping)
}

/// Download name for an export made on `date`: `cui-mapping-<YYYY-MM-DD>.json`.
pub fn export_file_name(date: Date) -> String {
    format!("cui-mapping-{date}.json")
}
