// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed color palette offered to presentation layers.
//!
//! Color values are opaque tokens to the store; only presentation code maps
//! them back to names.

use crate::counter::{CountField, Counter};

/// A named palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    /// Display name.
    pub name: &'static str,
    /// Color code stored on counters.
    pub value: &'static str,
}

/// The eight selectable colors, in presentation order.
pub const PALETTE: [PaletteColor; 8] = [
    PaletteColor {
        name: "Blue",
        value: "#2563eb",
    },
    PaletteColor {
        name: "Green",
        value: "#10b981",
    },
    PaletteColor {
        name: "Purple",
        value: "#8b5cf6",
    },
    PaletteColor {
        name: "Red",
        value: "#ef4444",
    },
    PaletteColor {
        name: "Orange",
        value: "#f97316",
    },
    PaletteColor {
        name: "Pink",
        value: "#ec4899",
    },
    PaletteColor {
        name: "Indigo",
        value: "#6366f1",
    },
    PaletteColor {
        name: "Teal",
        value: "#14b8a6",
    },
];

/// Marks of the "Bezahlt" tally are always drawn in this color.
pub const PAID_MARK_COLOR: &str = "#ef4444";

/// First palette entry; preselected for new counters.
pub fn default_color() -> PaletteColor {
    PALETTE[0]
}

/// Entry whose value equals `value` (case-insensitive hex).
pub fn by_value(value: &str) -> Option<PaletteColor> {
    PALETTE
        .iter()
        .copied()
        .find(|c| c.value.eq_ignore_ascii_case(value))
}

/// Entry whose name equals `name`, ignoring case.
pub fn by_name(name: &str) -> Option<PaletteColor> {
    PALETTE
        .iter()
        .copied()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Accept either a palette name or a palette value.
pub fn resolve(input: &str) -> Option<PaletteColor> {
    let input = input.trim();
    by_name(input).or_else(|| by_value(input))
}

/// Palette entry used to describe a stored token; unknown tokens fall back to the default.
pub fn describe(value: &str) -> PaletteColor {
    by_value(value).unwrap_or_else(default_color)
}

/// Color used to draw the marks of `which` on `counter`.
pub fn mark_color(counter: &Counter, which: CountField) -> &str {
    match which {
        CountField::Count1 => &counter.color,
        CountField::Count2 => PAID_MARK_COLOR,
    }
}
