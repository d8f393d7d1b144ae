// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Compliance report for CUI data-flow mappings.
//!
//! The report is a lossy, one-way text artifact. It never round-trips and
//! generating it never mutates the mapping.

use flowmap_graph::{ElementId, Mapping};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

/// Classification marking printed in the footer unless overridden.
pub const DEFAULT_MARKING: &str = "CUI";
/// Distribution statement printed in the footer unless overridden.
pub const DEFAULT_DISTRIBUTION: &str =
    "Distribution authorized to U.S. Government agencies and their contractors only.";

/// Inputs to report generation that do not come from the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Generation time; also seeds the document identifier.
    pub generated_at: OffsetDateTime,
    /// Footer classification marking.
    pub classification_marking: String,
    /// Footer distribution statement.
    pub distribution_statement: String,
    /// Content digest to print in the footer, if the caller computed one.
    pub content_digest: Option<String>,
}

impl ReportContext {
    /// Context with default footer text, stamped `generated_at`.
    pub fn at(generated_at: OffsetDateTime) -> Self {
        Self {
            generated_at,
            classification_marking: DEFAULT_MARKING.to_owned(),
            distribution_statement: DEFAULT_DISTRIBUTION.to_owned(),
            content_digest: None,
        }
    }
}

/// Counts printed in the report's summary section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    /// Number of elements.
    pub total_elements: usize,
    /// Number of flows.
    pub total_flows: usize,
    /// Number of flows carrying CUI.
    pub cui_flows: usize,
}

impl ReportSummary {
    /// Count `mapping`.
    pub fn of(mapping: &Mapping) -> Self {
        Self {
            total_elements: mapping.elements().len(),
            total_flows: mapping.flows().len(),
            cui_flows: mapping.cui_flow_count(),
        }
    }
}

/// Document identifier derived from the generation time (`CUI-MAP-<unix ms>`).
pub fn document_id(generated_at: OffsetDateTime) -> String {
    let millis = generated_at.unix_timestamp_nanos() / 1_000_000;
    format!("CUI-MAP-{millis}")
}

/// Download name for a report generated on `date`.
pub fn report_file_name(date: Date) -> String {
    format!("cui-mapping-report-{date}.txt")
}

fn timestamp(t: OffsetDateTime) -> String {
    t.format(&Rfc3339).unwrap_or_else(|_| t.to_string())
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_owned()
    } else {
        items.join(", ")
    }
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_owned());
    lines.push("-".repeat(title.chars().count()));
}

/// Render the full report text.
pub fn generate_report(mapping: &Mapping, ctx: &ReportContext) -> String {
    let meta = mapping.metadata();
    let summary = ReportSummary::of(mapping);
    let name_of = |id: &ElementId| {
        mapping
            .element(id)
            .map_or_else(|| format!("<unknown element {id}>"), |e| e.name.clone())
    };

    let title = "CUI DATA FLOW MAPPING REPORT";
    let mut lines = vec![title.to_owned(), "=".repeat(title.len()), String::new()];
    lines.push(format!("System Name: {}", meta.system_name));
    lines.push(format!("Owner: {}", meta.owner));
    lines.push(format!("Last Updated: {}", timestamp(meta.last_updated)));
    lines.push(format!("Version: {}", meta.version));
    lines.push(format!("Compliance Framework: {}", meta.compliance_framework));
    lines.push(String::new());

    heading(&mut lines, &format!("ELEMENTS ({})", summary.total_elements));
    if mapping.elements().is_empty() {
        lines.push("No elements defined.".to_owned());
        lines.push(String::new());
    }
    for (i, el) in mapping.elements().iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, el.name));
        lines.push(format!("   Type: {}", el.kind.label()));
        lines.push(format!("   CUI Category: {}", el.cui_category));
        lines.push(format!("   Security Level: {}", el.security_level.as_str()));
        lines.push(format!("   Owner: {}", el.metadata.owner));
        lines.push(format!("   Classification: {}", el.metadata.classification));
        lines.push(format!(
            "   Access Controls: {}",
            join_or_none(&el.metadata.access_controls)
        ));
        lines.push(String::new());
    }

    heading(&mut lines, &format!("DATA FLOWS ({})", summary.total_flows));
    if mapping.flows().is_empty() {
        lines.push("No data flows defined.".to_owned());
        lines.push(String::new());
    }
    for (i, flow) in mapping.flows().iter().enumerate() {
        lines.push(format!(
            "{}. {} -> {}",
            i + 1,
            name_of(&flow.source),
            name_of(&flow.target)
        ));
        lines.push(format!("   Type: {}", flow.flow_type.as_str()));
        lines.push(format!(
            "   CUI Involved: {}",
            if flow.cui_involved { "Yes" } else { "No" }
        ));
        lines.push(format!("   Protections: {}", join_or_none(&flow.protections)));
        if !flow.description.is_empty() {
            lines.push(format!("   Description: {}", flow.description));
        }
        lines.push(String::new());
    }

    heading(&mut lines, "SUMMARY");
    lines.push(format!("Total Elements: {}", summary.total_elements));
    lines.push(format!("Total Flows: {}", summary.total_flows));
    lines.push(format!("CUI-Involved Flows: {}", summary.cui_flows));
    lines.push(String::new());

    heading(&mut lines, "DOCUMENT CONTROL");
    lines.push(format!("Classification: {}", ctx.classification_marking));
    lines.push(format!("Distribution: {}", ctx.distribution_statement));
    lines.push(format!("Document ID: {}", document_id(ctx.generated_at)));
    lines.push(format!("Generated: {}", timestamp(ctx.generated_at)));
    if let Some(digest) = &ctx.content_digest {
        lines.push(format!("Content Digest: {digest}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn document_id_is_millis_since_epoch() {
        assert_eq!(
            document_id(datetime!(1970-01-01 00:00:01.5 UTC)),
            "CUI-MAP-1500"
        );
    }

    #[test]
    fn report_file_name_uses_iso_date() {
        assert_eq!(
            report_file_name(date!(2026 - 10 - 19)),
            "cui-mapping-report-2026-10-19.txt"
        );
    }

    #[test]
    fn empty_lists_render_as_none() {
        assert_eq!(join_or_none(&[]), "None");
        assert_eq!(join_or_none(&["A".into(), "B".into()]), "A, B");
    }
}
