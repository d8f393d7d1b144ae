// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command handlers.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use comfy_table::{presets, Table};
use flowmap_app_core::config::ConfigService;
use flowmap_app_core::config_port::ConfigPort;
use flowmap_app_core::prefs::{FlowmapPrefs, PREFS_KEY};
use flowmap_app_core::EditorSession;
use flowmap_canvas::{Canvas, SvgAdapter};
use flowmap_codec::{content_digest, digest_hex, export_file_name, export_json, import_json};
use flowmap_config_fs::FsConfigStore;
use flowmap_graph::{
    ElementId, ElementMetadataPatch, ElementPatch, FlowId, FlowPatch, Mapping, Position,
};
use flowmap_report::{generate_report, report_file_name, ReportSummary};
use flowmap_scene_port::{ViewState, ZoomLevel};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::cli::{Cli, Command, ElementFields, FlowFields, PrefsAction};

type Config = ConfigService<FsConfigStore>;

pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = open_config(cli.config_dir.as_deref());
    let prefs = config
        .as_ref()
        .map(|c| c.prefs_or_default())
        .unwrap_or_default();

    match cli.command {
        Command::New {
            file,
            system_name,
            owner,
            doc_version,
            framework,
            force,
        } => {
            if file.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", file.display());
            }
            let mut session = EditorSession::from_prefs(&prefs, OffsetDateTime::now_utc());
            if system_name.is_some() || owner.is_some() || doc_version.is_some() || framework.is_some()
            {
                session.edit_metadata(|m| {
                    set_if(&mut m.system_name, system_name);
                    set_if(&mut m.owner, owner);
                    set_if(&mut m.version, doc_version);
                    set_if(&mut m.compliance_framework, framework);
                });
            }
            save(&file, session.mapping())?;
            println!("created {}", file.display());
        }
        Command::Show { file } => show(&load(&file)?)?,
        Command::AddElement {
            file,
            kind,
            name,
            x,
            y,
        } => {
            let mut session = open(&file, &prefs)?;
            let id = match (x, y) {
                (Some(x), Some(y)) => session.add_element_at(kind, Position::new(x, y)),
                _ => session.add_element(kind),
            };
            if let Some(name) = name {
                session.update_element(&id, ElementPatch::rename(name));
            }
            save(&file, session.mapping())?;
            println!("{id}");
        }
        Command::UpdateElement { file, id, fields } => {
            let mut session = open(&file, &prefs)?;
            let patch = element_patch(fields);
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let id = ElementId::from(id.as_str());
            if !session.update_element(&id, patch) {
                bail!("no element with id `{id}`");
            }
            save(&file, session.mapping())?;
        }
        Command::DeleteElement { file, id } => {
            let mut session = open(&file, &prefs)?;
            let before = session.mapping().flows().len();
            let id = ElementId::from(id.as_str());
            let Some(removed) = session.delete_element(&id) else {
                bail!("no element with id `{id}`");
            };
            let cascaded = before - session.mapping().flows().len();
            save(&file, session.mapping())?;
            println!("deleted {} ({}); {cascaded} flow(s) removed", removed.id, removed.name);
        }
        Command::Connect {
            file,
            source,
            target,
        } => {
            let mut session = open(&file, &prefs)?;
            let flow = session
                .add_flow(
                    &ElementId::from(source.as_str()),
                    &ElementId::from(target.as_str()),
                )
                .context("cannot connect")?;
            save(&file, session.mapping())?;
            println!("{flow}");
        }
        Command::UpdateFlow { file, id, fields } => {
            let mut session = open(&file, &prefs)?;
            let patch = flow_patch(fields);
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let id = FlowId::from(id.as_str());
            if !session.update_flow(&id, patch) {
                bail!("no flow with id `{id}`");
            }
            save(&file, session.mapping())?;
        }
        Command::DeleteFlow { file, id } => {
            let mut session = open(&file, &prefs)?;
            let id = FlowId::from(id.as_str());
            if session.delete_flow(&id).is_none() {
                bail!("no flow with id `{id}`");
            }
            save(&file, session.mapping())?;
            println!("deleted {id}");
        }
        Command::Export { file, out_dir } => {
            let mapping = load(&file)?;
            let now = OffsetDateTime::now_utc();
            let out = out_dir.join(export_file_name(now.date()));
            write_artifact(&out, &export_json(&mapping, now)?)?;
            println!("{}", out.display());
        }
        Command::Report {
            file,
            out_dir,
            stdout,
        } => {
            let mapping = load(&file)?;
            let now = OffsetDateTime::now_utc();
            let mut ctx = prefs.report.context(now);
            ctx.content_digest = Some(digest_hex(&content_digest(&mapping)?));
            let text = generate_report(&mapping, &ctx);
            if stdout {
                print!("{text}");
            } else {
                let out = out_dir.join(report_file_name(now.date()));
                write_artifact(&out, &text)?;
                println!("{}", out.display());
            }
        }
        Command::Render {
            file,
            out,
            zoom,
            no_grid,
            select,
        } => {
            let base = prefs.view.view_state();
            let view = ViewState::new(
                zoom.unwrap_or_else(|| base.zoom.percent()),
                base.show_grid && !no_grid,
            );
            let mut session = open(&file, &prefs)?.with_view(view);
            if let Some(id) = select {
                let id = ElementId::from(id.as_str());
                if !session.select(&id) {
                    bail!("no element with id `{id}`");
                }
            }
            let mut canvas = Canvas::new(SvgAdapter::new());
            let scene = canvas.redraw(session.mapping(), session.view(), &session.highlight())?;
            let svg = canvas
                .port_mut()
                .take_document()
                .context("renderer produced no document")?;
            canvas.into_port();
            write_artifact(&out, &svg)?;
            info!(
                badges = scene.badges.len(),
                connectors = scene.connectors.len(),
                "rendered"
            );
            println!("{}", out.display());
        }
        Command::Prefs { action } => prefs_command(config.as_ref(), prefs, action)?,
    }
    Ok(())
}

fn open_config(dir: Option<&Path>) -> Option<Config> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    };
    match store {
        Ok(store) => Some(ConfigService::new(store)),
        Err(e) => {
            warn!(error = %e, "config store unavailable; using default prefs");
            None
        }
    }
}

fn load(path: &Path) -> Result<Mapping> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&text).with_context(|| format!("failed to import {}", path.display()))
}

fn open(path: &Path, prefs: &FlowmapPrefs) -> Result<EditorSession> {
    Ok(EditorSession::new(load(path)?).with_view(prefs.view.view_state()))
}

fn save(path: &Path, mapping: &Mapping) -> Result<()> {
    let text = export_json(mapping, OffsetDateTime::now_utc())?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "saved mapping");
    Ok(())
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn set_if(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn replace_list(values: Vec<String>, clear: bool) -> Option<Vec<String>> {
    if clear {
        Some(Vec::new())
    } else if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn element_patch(f: ElementFields) -> ElementPatch {
    let metadata = ElementMetadataPatch {
        owner: f.owner,
        classification: f.classification,
        retention_period: f.retention,
        access_controls: replace_list(f.access_controls, f.clear_access_controls),
    };
    ElementPatch {
        name: f.name,
        kind: f.kind,
        description: f.description,
        cui_category: f.cui_category,
        security_level: f.security_level,
        position: f.x.zip(f.y).map(|(x, y)| Position::new(x, y)),
        metadata: (metadata != ElementMetadataPatch::default()).then_some(metadata),
    }
}

fn flow_patch(f: FlowFields) -> FlowPatch {
    FlowPatch {
        flow_type: f.flow_type,
        cui_involved: f.cui,
        protections: replace_list(f.protections, f.clear_protections),
        description: f.description,
    }
}

fn show(mapping: &Mapping) -> Result<()> {
    let meta = mapping.metadata();
    println!("{} (v{}, {})", meta.system_name, meta.version, meta.compliance_framework);
    if !meta.owner.is_empty() {
        println!("Owner: {}", meta.owner);
    }

    let mut elements = Table::new();
    elements.load_preset(presets::UTF8_FULL).set_header(vec![
        "Id", "Name", "Type", "Security", "CUI Category", "Position", "Flows",
    ]);
    for el in mapping.elements() {
        elements.add_row(vec![
            el.id.to_string(),
            el.name.clone(),
            el.kind.label().to_owned(),
            el.security_level.as_str().to_owned(),
            el.cui_category.clone(),
            format!("({}, {})", el.position.x, el.position.y),
            mapping.connections_of(&el.id).len().to_string(),
        ]);
    }
    println!("{elements}");

    let name_of = |id: &ElementId| {
        mapping
            .element(id)
            .map_or_else(|| format!("<{id}>"), |e| e.name.clone())
    };
    let mut flows = Table::new();
    flows.load_preset(presets::UTF8_FULL).set_header(vec![
        "Id", "From", "To", "Type", "CUI", "Protections",
    ]);
    for flow in mapping.flows() {
        flows.add_row(vec![
            flow.id.to_string(),
            name_of(&flow.source),
            name_of(&flow.target),
            flow.flow_type.as_str().to_owned(),
            if flow.cui_involved { "yes" } else { "no" }.to_owned(),
            flow.protections.join(", "),
        ]);
    }
    println!("{flows}");

    let summary = ReportSummary::of(mapping);
    println!(
        "Total Elements: {}  Total Flows: {}  CUI-Involved Flows: {}",
        summary.total_elements, summary.total_flows, summary.cui_flows
    );
    println!("Content Digest: {}", digest_hex(&content_digest(mapping)?));
    Ok(())
}

fn prefs_command(config: Option<&Config>, mut prefs: FlowmapPrefs, action: PrefsAction) -> Result<()> {
    match action {
        PrefsAction::Show => println!("{}", serde_json::to_string_pretty(&prefs)?),
        PrefsAction::Set {
            zoom,
            grid,
            system_name,
            owner,
            framework,
            marking,
            distribution,
        } => {
            let Some(config) = config else {
                bail!("no config directory available; pass --config-dir");
            };
            if let Some(zoom) = zoom {
                prefs.view.zoom_percent = ZoomLevel::new(zoom).percent();
            }
            if let Some(grid) = grid {
                prefs.view.show_grid = grid;
            }
            set_if(&mut prefs.defaults.system_name, system_name);
            set_if(&mut prefs.defaults.owner, owner);
            set_if(&mut prefs.defaults.compliance_framework, framework);
            set_if(&mut prefs.report.classification_marking, marking);
            set_if(&mut prefs.report.distribution_statement, distribution);
            config
                .save(PREFS_KEY, &prefs)
                .context("failed to save prefs")?;
            println!("{}", config.store().base().join(format!("{PREFS_KEY}.json")).display());
        }
    }
    Ok(())
}
