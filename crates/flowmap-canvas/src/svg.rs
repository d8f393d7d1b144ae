// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! SVG adapter: writes each presented scene as a standalone SVG document.

use core::fmt::Write as _;

use flowmap_scene_port::{
    BadgeDef, ColorRgba8, ConnectorDef, Emphasis, GridDef, Icon, LineStyle, PresentError, Scene,
    ScenePort,
};

use crate::style::SELECTION_RING;

const CORNER_RADIUS: f64 = 8.0;
const RING_GAP: f64 = 4.0;

/// `ScenePort` that renders to an SVG string.
#[derive(Debug, Default)]
pub struct SvgAdapter {
    document: Option<String>,
    frames: u64,
}

impl SvgAdapter {
    /// Create an adapter with no document yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently presented document.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Take the most recently presented document.
    pub fn take_document(&mut self) -> Option<String> {
        self.document.take()
    }

    /// Number of scenes presented since creation or the last dispose.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl ScenePort for SvgAdapter {
    fn present(&mut self, scene: &Scene) -> Result<(), PresentError> {
        let mut out = String::new();
        write_scene(&mut out, scene)?;
        self.document = Some(out);
        self.frames += 1;
        Ok(())
    }

    fn dispose(&mut self) {
        self.document = None;
        self.frames = 0;
    }
}

fn write_scene(out: &mut String, scene: &Scene) -> core::fmt::Result {
    let (w, h) = (scene.extent.width, scene.extent.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(out, "<defs>")?;
    if let Some(grid) = &scene.grid {
        write_grid_pattern(out, grid)?;
    }
    writeln!(out, "</defs>")?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, hex([255, 255, 255, 255]))?;
    if scene.grid.is_some() {
        writeln!(out, r#"<rect width="100%" height="100%" fill="url(#grid)"/>"#)?;
    }

    writeln!(out, r#"<g class="connectors">"#)?;
    for c in &scene.connectors {
        write_connector(out, c)?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r#"<g class="badges">"#)?;
    for b in &scene.badges {
        write_badge(out, b, scene.scale)?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")
}

fn write_grid_pattern(out: &mut String, grid: &GridDef) -> core::fmt::Result {
    let s = grid.spacing;
    writeln!(
        out,
        r#"<pattern id="grid" width="{s}" height="{s}" patternUnits="userSpaceOnUse"><path d="M {s} 0 L 0 0 0 {s}" fill="none" stroke="{}" stroke-width="1"/></pattern>"#,
        hex(grid.color)
    )
}

fn write_connector(out: &mut String, c: &ConnectorDef) -> core::fmt::Result {
    let dash = match c.style {
        LineStyle::Solid => String::new(),
        LineStyle::Dashed => {
            let d = c.width * 3.0;
            format!(r#" stroke-dasharray="{d} {d}""#)
        }
    };
    let color = hex(c.color);
    writeln!(
        out,
        r#"<g data-flow="{}"><line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{color}" stroke-width="{}"{dash}/><polygon points="{},{} {},{} {},{}" fill="{color}"/></g>"#,
        escape_xml(&c.key.0),
        c.start.x,
        c.start.y,
        c.arrow.tip.x,
        c.arrow.tip.y,
        c.width,
        c.arrow.tip.x,
        c.arrow.tip.y,
        c.arrow.left.x,
        c.arrow.left.y,
        c.arrow.right.x,
        c.arrow.right.y,
    )
}

fn write_badge(out: &mut String, b: &BadgeDef, scale: f64) -> core::fmt::Result {
    let (x, y) = (b.origin.x, b.origin.y);
    let (w, h) = (b.size.width, b.size.height);
    let r = CORNER_RADIUS * scale;
    writeln!(out, r#"<g data-element="{}">"#, escape_xml(&b.key.0))?;
    if b.emphasis == Emphasis::Selected {
        let gap = RING_GAP * scale;
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            x - gap,
            y - gap,
            w + 2.0 * gap,
            h + 2.0 * gap,
            r + gap,
            hex(SELECTION_RING),
            2.0 * scale,
        )?;
    }
    writeln!(
        out,
        r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{r}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        hex(b.style.fill),
        hex(b.style.border),
        b.style.border_width,
    )?;
    let cx = x + w / 2.0;
    writeln!(
        out,
        r#"<text x="{cx}" y="{}" font-size="{}" text-anchor="middle" fill="{}">{}</text>"#,
        y + h * 0.35,
        18.0 * scale,
        hex(b.accent),
        glyph(b.icon),
    )?;
    writeln!(
        out,
        r#"<text x="{cx}" y="{}" font-size="{}" text-anchor="middle" font-weight="600">{}</text>"#,
        y + h * 0.62,
        12.0 * scale,
        escape_xml(&b.label),
    )?;
    writeln!(
        out,
        r#"<text x="{cx}" y="{}" font-size="{}" text-anchor="middle" fill="{}">{}</text>"#,
        y + h * 0.85,
        10.0 * scale,
        hex([75, 85, 99, 255]),
        escape_xml(&b.caption),
    )?;
    writeln!(out, "</g>")
}

const fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Server => "\u{1f5a5}",
        Icon::Cog => "\u{2699}",
        Icon::Database => "\u{1f5c4}",
        Icon::Person => "\u{1f464}",
        Icon::Globe => "\u{1f310}",
    }
}

fn hex(c: ColorRgba8) -> String {
    if c[3] == 255 {
        format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c[0], c[1], c[2], c[3])
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
