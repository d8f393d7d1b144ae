// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Highlight state for selection feedback.

use crate::types::NodeKey;

/// Which badge, if any, receives the selection emphasis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
    /// Currently selected badge.
    pub selected: Option<NodeKey>,
}

impl HighlightState {
    /// Highlight the badge for `key`.
    pub fn selecting(key: impl Into<String>) -> Self {
        Self {
            selected: Some(NodeKey(key.into())),
        }
    }

    /// Whether `key` is the selected badge.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.as_ref().is_some_and(|k| k.0 == key)
    }
}
