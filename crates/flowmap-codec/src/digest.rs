// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical content digest.
//!
//! Canonical form: CBOR of `{ metadata (without lastUpdated), elements sorted
//! by id, flows sorted by (source, target, id) }`, hashed with BLAKE3.

use ciborium::ser::into_writer;
use flowmap_graph::{DataFlow, Element, Mapping};
use serde::Serialize;

use crate::CodecError;

/// BLAKE3 digest (32 bytes).
pub type Hash32 = [u8; 32];

#[derive(Serialize)]
struct CanonicalMapping<'a> {
    system_name: &'a str,
    owner: &'a str,
    version: &'a str,
    compliance_framework: &'a str,
    elements: Vec<&'a Element>,
    flows: Vec<&'a DataFlow>,
}

fn canonical_bytes(mapping: &Mapping) -> Result<Vec<u8>, CodecError> {
    let meta = mapping.metadata();
    let mut elements: Vec<&Element> = mapping.elements().iter().collect();
    elements.sort_by(|a, b| a.id.cmp(&b.id));
    let mut flows: Vec<&DataFlow> = mapping.flows().iter().collect();
    flows.sort_by(|a, b| (&a.source, &a.target, &a.id).cmp(&(&b.source, &b.target, &b.id)));
    let canonical = CanonicalMapping {
        system_name: &meta.system_name,
        owner: &meta.owner,
        version: &meta.version,
        compliance_framework: &meta.compliance_framework,
        elements,
        flows,
    };
    let mut bytes = Vec::new();
    into_writer(&canonical, &mut bytes).map_err(|e| CodecError::Cbor(e.to_string()))?;
    Ok(bytes)
}

/// Digest of the mapping's content, independent of list order and of
/// `lastUpdated`.
pub fn content_digest(mapping: &Mapping) -> Result<Hash32, CodecError> {
    let bytes = canonical_bytes(mapping)?;
    Ok(blake3::hash(&bytes).into())
}

/// Lowercase hex rendering of a digest.
pub fn digest_hex(digest: &Hash32) -> String {
    blake3::Hash::from(*digest).to_hex().to_string()
}
