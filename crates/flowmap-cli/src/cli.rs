// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use flowmap_graph::{ElementKind, FlowType, SecurityLevel};

#[derive(Parser, Debug)]
#[command(name = "flowmap", author, version)]
#[command(about = "Map where Controlled Unclassified Information flows through a system")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); overrides RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,
    /// Directory holding prefs.json (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) config_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create an empty mapping file
    New {
        /// Mapping file to create
        file: PathBuf,
        /// Name of the system being mapped
        #[arg(long)]
        system_name: Option<String>,
        /// Mapping owner
        #[arg(long)]
        owner: Option<String>,
        /// Document version
        #[arg(long = "doc-version")]
        doc_version: Option<String>,
        /// Compliance framework
        #[arg(long)]
        framework: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print elements, flows, and summary counts
    Show {
        /// Mapping file
        file: PathBuf,
    },
    /// Add an element; prints its id
    AddElement {
        /// Mapping file
        file: PathBuf,
        /// Element type
        #[arg(long = "type", value_parser = parse_kind, default_value = "system")]
        kind: ElementKind,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Canvas x coordinate
        #[arg(long, requires = "y", allow_negative_numbers = true, value_parser = parse_coord)]
        x: Option<f64>,
        /// Canvas y coordinate
        #[arg(long, requires = "x", allow_negative_numbers = true, value_parser = parse_coord)]
        y: Option<f64>,
    },
    /// Change fields of an element
    UpdateElement {
        /// Mapping file
        file: PathBuf,
        /// Element id
        id: String,
        #[command(flatten)]
        fields: ElementFields,
    },
    /// Delete an element and every flow touching it
    DeleteElement {
        /// Mapping file
        file: PathBuf,
        /// Element id
        id: String,
    },
    /// Add a flow from SOURCE to TARGET; prints its id
    Connect {
        /// Mapping file
        file: PathBuf,
        /// Source element id
        source: String,
        /// Target element id
        target: String,
    },
    /// Change fields of a flow
    UpdateFlow {
        /// Mapping file
        file: PathBuf,
        /// Flow id
        id: String,
        #[command(flatten)]
        fields: FlowFields,
    },
    /// Delete a flow
    DeleteFlow {
        /// Mapping file
        file: PathBuf,
        /// Flow id
        id: String,
    },
    /// Write a dated export (cui-mapping-<date>.json)
    Export {
        /// Mapping file
        file: PathBuf,
        /// Destination directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Write a dated compliance report (cui-mapping-report-<date>.txt)
    Report {
        /// Mapping file
        file: PathBuf,
        /// Destination directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Print the report instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Render the canvas as SVG
    Render {
        /// Mapping file
        file: PathBuf,
        /// SVG output path
        #[arg(long)]
        out: PathBuf,
        /// Zoom percent (50..=200, steps of 25)
        #[arg(long)]
        zoom: Option<u16>,
        /// Hide the background grid
        #[arg(long)]
        no_grid: bool,
        /// Element to draw as selected
        #[arg(long)]
        select: Option<String>,
    },
    /// Show or change saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ElementFields {
    /// Display name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Element type
    #[arg(long = "type", value_parser = parse_kind)]
    pub(crate) kind: Option<ElementKind>,
    /// Free-text description
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// CUI category tag
    #[arg(long)]
    pub(crate) cui_category: Option<String>,
    /// Security level
    #[arg(long, value_parser = parse_level)]
    pub(crate) security_level: Option<SecurityLevel>,
    /// Canvas x coordinate
    #[arg(long, requires = "y", allow_negative_numbers = true, value_parser = parse_coord)]
    pub(crate) x: Option<f64>,
    /// Canvas y coordinate
    #[arg(long, requires = "x", allow_negative_numbers = true, value_parser = parse_coord)]
    pub(crate) y: Option<f64>,
    /// Data owner
    #[arg(long)]
    pub(crate) owner: Option<String>,
    /// Classification
    #[arg(long)]
    pub(crate) classification: Option<String>,
    /// Retention period
    #[arg(long)]
    pub(crate) retention: Option<String>,
    /// Access control (repeat to list several; replaces the current list)
    #[arg(long = "access-control")]
    pub(crate) access_controls: Vec<String>,
    /// Clear the access-control list
    #[arg(long, conflicts_with = "access_controls")]
    pub(crate) clear_access_controls: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FlowFields {
    /// Flow type
    #[arg(long, value_parser = parse_flow_type)]
    pub(crate) flow_type: Option<FlowType>,
    /// Whether the flow carries CUI
    #[arg(long)]
    pub(crate) cui: Option<bool>,
    /// Protection (repeat to list several; replaces the current list)
    #[arg(long = "protection")]
    pub(crate) protections: Vec<String>,
    /// Clear the protections list
    #[arg(long, conflicts_with = "protections")]
    pub(crate) clear_protections: bool,
    /// Free-text description
    #[arg(long)]
    pub(crate) description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum PrefsAction {
    /// Print the effective preferences as JSON
    Show,
    /// Change and save preferences
    Set {
        /// Initial zoom percent
        #[arg(long)]
        zoom: Option<u16>,
        /// Draw the grid by default
        #[arg(long)]
        grid: Option<bool>,
        /// Default system name for new mappings
        #[arg(long)]
        system_name: Option<String>,
        /// Default owner for new mappings
        #[arg(long)]
        owner: Option<String>,
        /// Default compliance framework for new mappings
        #[arg(long)]
        framework: Option<String>,
        /// Report classification marking
        #[arg(long)]
        marking: Option<String>,
        /// Report distribution statement
        #[arg(long)]
        distribution: Option<String>,
    },
}

fn choices<T: Copy>(all: &[T], name: fn(T) -> &'static str) -> String {
    all.iter().map(|v| name(*v)).collect::<Vec<_>>().join(", ")
}

fn parse_kind(raw: &str) -> Result<ElementKind, String> {
    ElementKind::parse(raw).ok_or_else(|| {
        format!(
            "unknown element type `{raw}` (expected one of: {})",
            choices(&ElementKind::ALL, ElementKind::as_str)
        )
    })
}

fn parse_level(raw: &str) -> Result<SecurityLevel, String> {
    SecurityLevel::parse(raw).ok_or_else(|| {
        format!(
            "unknown security level `{raw}` (expected one of: {})",
            choices(&SecurityLevel::ALL, SecurityLevel::as_str)
        )
    })
}

fn parse_flow_type(raw: &str) -> Result<FlowType, String> {
    FlowType::parse(raw).ok_or_else(|| {
        format!(
            "unknown flow type `{raw}` (expected one of: {})",
            choices(&FlowType::ALL, FlowType::as_str)
        )
    })
}

fn parse_coord(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("coordinate `{raw}` must be a finite number"))
    }
}
