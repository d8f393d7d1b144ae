// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core scene types for the rendering port contract.
//!
//! These are pure drawing primitives. All coordinates are screen-space
//! (zoom already applied).

/// Key type for badges (the element id text).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(pub String);

impl AsRef<str> for NodeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Key type for connectors (the flow id text).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(pub String);

impl AsRef<str> for EdgeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// RGBA color with 8-bit components.
pub type ColorRgba8 = [u8; 4];

/// Point in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height pair in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

/// Pictogram drawn inside a badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Server/monitor.
    Server,
    /// Gear.
    Cog,
    /// Database cylinder.
    Database,
    /// Person silhouette.
    Person,
    /// Globe.
    Globe,
}

/// Border and background treatment of a badge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgeStyle {
    /// Background fill.
    pub fill: ColorRgba8,
    /// Border stroke.
    pub border: ColorRgba8,
    /// Border stroke width.
    pub border_width: f64,
}

/// Visual emphasis applied to a badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Emphasis {
    /// Drawn as-is.
    #[default]
    None,
    /// Scaled up about its center with a highlight ring.
    Selected,
}

/// Fixed-size element badge.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeDef {
    /// Unique key for this badge.
    pub key: NodeKey,
    /// Top-left corner.
    pub origin: Point,
    /// Badge extent.
    pub size: Size,
    /// Primary label.
    pub label: String,
    /// Secondary label (kind and CUI category).
    pub caption: String,
    /// Pictogram.
    pub icon: Icon,
    /// Icon/accent color.
    pub accent: ColorRgba8,
    /// Border/fill styling.
    pub style: BadgeStyle,
    /// Selection emphasis.
    pub emphasis: Emphasis,
}

impl BadgeDef {
    /// Visual center; the anchor connectors attach to.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }
}

/// Connector stroke pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// Solid line.
    Solid,
    /// Dashed line.
    Dashed,
}

/// Filled triangle marking the target end of a connector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
    /// Point touching the target badge.
    pub tip: Point,
    /// Base corner left of the travel direction.
    pub left: Point,
    /// Base corner right of the travel direction.
    pub right: Point,
}

/// Directed connector between two badges.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorDef {
    /// Unique key for this connector.
    pub key: EdgeKey,
    /// Source badge key.
    pub from: NodeKey,
    /// Target badge key.
    pub to: NodeKey,
    /// Source anchor (source badge center).
    pub start: Point,
    /// Target anchor (target badge center).
    pub end: Point,
    /// Arrowhead at the target end, on the target badge border.
    pub arrow: ArrowHead,
    /// Stroke width.
    pub width: f64,
    /// Stroke pattern.
    pub style: LineStyle,
    /// Stroke color.
    pub color: ColorRgba8,
}

/// Background grid overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDef {
    /// Distance between grid lines.
    pub spacing: f64,
    /// Line color.
    pub color: ColorRgba8,
}

/// Complete drawable scene.
///
/// Adapters paint grid, then connectors, then badges.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scene {
    /// Scrollable extent of the canvas.
    pub extent: Size,
    /// Zoom factor baked into every coordinate (1.0 = 100%).
    pub scale: f64,
    /// Grid overlay, when enabled.
    pub grid: Option<GridDef>,
    /// Element badges in mapping order.
    pub badges: Vec<BadgeDef>,
    /// Flow connectors in mapping order.
    pub connectors: Vec<ConnectorDef>,
}

impl Scene {
    /// Badge by key.
    pub fn badge(&self, key: &str) -> Option<&BadgeDef> {
        self.badges.iter().find(|b| b.key.0 == key)
    }

    /// Connector by key.
    pub fn connector(&self, key: &str) -> Option<&ConnectorDef> {
        self.connectors.iter().find(|c| c.key.0 == key)
    }
}
