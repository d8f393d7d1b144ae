// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style lookup tables keyed by the closed mapping enumerations.

use flowmap_graph::{ElementKind, SecurityLevel};
use flowmap_scene_port::{BadgeStyle, ColorRgba8, Icon, LineStyle};

/// Icon and accent color for an element kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindStyle {
    /// Pictogram.
    pub icon: Icon,
    /// Accent color.
    pub accent: ColorRgba8,
}

/// Stroke treatment for a flow connector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowStroke {
    /// Stroke pattern.
    pub style: LineStyle,
    /// Stroke color.
    pub color: ColorRgba8,
    /// Stroke width at 100% zoom.
    pub width: f64,
}

/// Ring color drawn around the selected badge.
pub const SELECTION_RING: ColorRgba8 = [37, 99, 235, 255];
/// Grid line color.
pub const GRID_LINE: ColorRgba8 = [229, 231, 235, 255];

/// Icon and accent for `kind`.
pub const fn kind_style(kind: ElementKind) -> KindStyle {
    match kind {
        ElementKind::System => KindStyle {
            icon: Icon::Server,
            accent: [59, 130, 246, 255],
        },
        ElementKind::Process => KindStyle {
            icon: Icon::Cog,
            accent: [34, 197, 94, 255],
        },
        ElementKind::Storage => KindStyle {
            icon: Icon::Database,
            accent: [168, 85, 247, 255],
        },
        ElementKind::User => KindStyle {
            icon: Icon::Person,
            accent: [249, 115, 22, 255],
        },
        ElementKind::External => KindStyle {
            icon: Icon::Globe,
            accent: [107, 114, 128, 255],
        },
    }
}

/// Border and fill for `level`.
pub const fn security_style(level: SecurityLevel) -> BadgeStyle {
    match level {
        SecurityLevel::Low => BadgeStyle {
            fill: [240, 253, 244, 255],
            border: [34, 197, 94, 255],
            border_width: 2.0,
        },
        SecurityLevel::Moderate => BadgeStyle {
            fill: [254, 252, 232, 255],
            border: [234, 179, 8, 255],
            border_width: 2.0,
        },
        SecurityLevel::High => BadgeStyle {
            fill: [254, 242, 242, 255],
            border: [239, 68, 68, 255],
            border_width: 3.0,
        },
    }
}

/// CUI flows are solid warning-red; everything else is dashed neutral gray.
pub const fn flow_stroke(cui_involved: bool) -> FlowStroke {
    if cui_involved {
        FlowStroke {
            style: LineStyle::Solid,
            color: [220, 38, 38, 255],
            width: 2.0,
        }
    } else {
        FlowStroke {
            style: LineStyle::Dashed,
            color: [156, 163, 175, 255],
            width: 1.5,
        }
    }
}
