// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved preferences for flowmap tools (view, new-mapping defaults, report footer).
//!
//! Every group is `#[serde(default)]`, so a prefs file written by an older
//! build with fewer fields still loads.

use flowmap_graph::MappingMetadata;
use flowmap_report::{ReportContext, DEFAULT_DISTRIBUTION, DEFAULT_MARKING};
use flowmap_scene_port::{ViewState, ZoomLevel};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Config key the preferences are stored under.
pub const PREFS_KEY: &str = "prefs";

/// All saved preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowmapPrefs {
    /// Initial view.
    pub view: ViewPrefs,
    /// Metadata applied to freshly created mappings.
    pub defaults: MappingDefaults,
    /// Document-control text for generated reports.
    pub report: ReportPrefs,
}

/// Initial zoom and grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewPrefs {
    /// Zoom percentage; clamped and snapped on use.
    pub zoom_percent: u16,
    /// Draw the background grid.
    pub show_grid: bool,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            zoom_percent: ZoomLevel::DEFAULT,
            show_grid: true,
        }
    }
}

impl ViewPrefs {
    /// View state these prefs describe.
    pub fn view_state(&self) -> ViewState {
        ViewState::new(self.zoom_percent, self.show_grid)
    }
}

/// Metadata for new mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MappingDefaults {
    /// System name.
    pub system_name: String,
    /// Owner.
    pub owner: String,
    /// Document version.
    pub version: String,
    /// Compliance framework.
    pub compliance_framework: String,
}

impl Default for MappingDefaults {
    fn default() -> Self {
        let meta = MappingMetadata::default();
        Self {
            system_name: meta.system_name,
            owner: meta.owner,
            version: meta.version,
            compliance_framework: meta.compliance_framework,
        }
    }
}

impl MappingDefaults {
    /// Metadata for a mapping created at `now`.
    pub fn metadata(&self, now: OffsetDateTime) -> MappingMetadata {
        MappingMetadata {
            system_name: self.system_name.clone(),
            owner: self.owner.clone(),
            last_updated: now,
            version: self.version.clone(),
            compliance_framework: self.compliance_framework.clone(),
        }
    }
}

/// Report footer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportPrefs {
    /// Classification marking.
    pub classification_marking: String,
    /// Distribution statement.
    pub distribution_statement: String,
}

impl Default for ReportPrefs {
    fn default() -> Self {
        Self {
            classification_marking: DEFAULT_MARKING.to_owned(),
            distribution_statement: DEFAULT_DISTRIBUTION.to_owned(),
        }
    }
}

impl ReportPrefs {
    /// Report context stamped `generated_at` carrying this footer text.
    pub fn context(&self, generated_at: OffsetDateTime) -> ReportContext {
        ReportContext {
            classification_marking: self.classification_marking.clone(),
            distribution_statement: self.distribution_statement.clone(),
            ..ReportContext::at(generated_at)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;
    use time::macros::datetime;

    #[test]
    fn partial_file_fills_defaults() {
        let prefs: FlowmapPrefs =
            serde_json::from_str(r#"{"view": {"zoomPercent": 150}}"#).unwrap();
        assert_eq!(prefs.view.zoom_percent, 150);
        assert!(prefs.view.show_grid);
        assert_eq!(prefs.defaults, MappingDefaults::default());
        assert_eq!(prefs.report.classification_marking, "CUI");
    }

    #[test]
    fn out_of_range_zoom_is_clamped_on_use() {
        let view = ViewPrefs {
            zoom_percent: 900,
            show_grid: false,
        };
        let state = view.view_state();
        assert_eq!(state.zoom.percent(), ZoomLevel::MAX);
        assert!(!state.show_grid);
    }

    #[test]
    fn defaults_produce_metadata() {
        let defaults = MappingDefaults {
            system_name: "Enclave".into(),
            owner: "ISSM".into(),
            ..MappingDefaults::default()
        };
        let now = datetime!(2026-10-19 08:00 UTC);
        let meta = defaults.metadata(now);
        assert_eq!(meta.system_name, "Enclave");
        assert_eq!(meta.owner, "ISSM");
        assert_eq!(meta.compliance_framework, "NIST SP 800-171");
        assert_eq!(meta.last_updated, now);
    }

    #[test]
    fn report_prefs_override_footer() {
        let prefs = ReportPrefs {
            classification_marking: "CUI//SP-PRVCY".into(),
            ..ReportPrefs::default()
        };
        let ctx = prefs.context(datetime!(2026-10-19 08:00 UTC));
        assert_eq!(ctx.classification_marking, "CUI//SP-PRVCY");
        assert_eq!(ctx.distribution_statement, DEFAULT_DISTRIBUTION);
        assert!(ctx.content_digest.is_none());
    }
}
