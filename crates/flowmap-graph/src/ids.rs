// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Opaque identifiers for elements and flows.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque element identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

/// Opaque flow identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowId(pub String);

pub(crate) const ELEMENT_PREFIX: &str = "el-";
pub(crate) const FLOW_PREFIX: &str = "flow-";

impl ElementId {
    /// Borrow the raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_seq(seq: u64) -> Self {
        Self(format!("{ELEMENT_PREFIX}{seq}"))
    }
}

impl FlowId {
    /// Borrow the raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_seq(seq: u64) -> Self {
        Self(format!("{FLOW_PREFIX}{seq}"))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<&str> for FlowId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Numeric suffix of a generated id (`el-7` -> 7), if `raw` has that shape.
pub(crate) fn seq_of(raw: &str, prefix: &str) -> Option<u64> {
    raw.strip_prefix(prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;

    #[test]
    fn generated_ids_carry_their_sequence() {
        assert_eq!(ElementId::from_seq(3).as_str(), "el-3");
        assert_eq!(FlowId::from_seq(12).as_str(), "flow-12");
        assert_eq!(seq_of("el-41", ELEMENT_PREFIX), Some(41));
        assert_eq!(seq_of("flow-2", FLOW_PREFIX), Some(2));
    }

    #[test]
    fn foreign_ids_have_no_sequence() {
        assert_eq!(seq_of("1712345678901", ELEMENT_PREFIX), None);
        assert_eq!(seq_of("el-abc", ELEMENT_PREFIX), None);
        assert_eq!(seq_of("flow-", FLOW_PREFIX), None);
    }
}
