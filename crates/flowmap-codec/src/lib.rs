// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Interchange codec for CUI data-flow mappings.
//!
//! The export artifact is JSON:
//!
//! ```text
//! {
//!   "format": "cui-flowmap",
//!   "formatVersion": 1,
//!   "exportedAt": "<rfc3339>",
//!   "metadata": { systemName, owner, lastUpdated, version, complianceFramework },
//!   "elements": [ { id, name, type, description, cuiCategory, securityLevel,
//!                   position: {x, y}, connections: [flow ids],
//!                   metadata: { owner, classification, retentionPeriod, accessControls } } ],
//!   "flows": [ { id, source, target, flowType, cuiInvolved, protections, description } ]
//! }
//! ```
//!
//! `connections` is derived on export and ignored on import. Files without
//! the envelope fields (`format`, `formatVersion`) are accepted as version 1.

mod digest;
mod json;

pub use digest::{content_digest, digest_hex, Hash32};
pub use json::{export_file_name, export_json, import_json, FORMAT_TAG, FORMAT_VERSION};

use flowmap_graph::MappingError;
use thiserror::Error;

/// Errors raised while encoding or decoding mappings.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed or mistyped JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Canonical CBOR encoding failed.
    #[error("cbor encode error: {0}")]
    Cbor(String),
    /// The envelope names a different format.
    #[error("unsupported format tag: {0}")]
    UnsupportedFormat(String),
    /// The envelope is from a newer format revision.
    #[error("unsupported format version: {0} (max {max})", max = FORMAT_VERSION)]
    UnsupportedVersion(u32),
    /// Parsed content violates mapping invariants.
    #[error("integrity error: {0}")]
    Integrity(#[from] MappingError),
}
