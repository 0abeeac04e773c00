//! Data model for a sandbox design.
//!
//! A design is an ordered stack of `PlacedComponent`s on a 2D plane. Order
//! is insertion order: later components paint on top and win hit tests.
//! Footprint and cost are copied from the catalog when a component is
//! placed, so catalog edits never reach into an existing design.

use crate::id::{ComponentId, TypeName};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a `0xRRGGBB` literal.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::rgba(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let byte = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };

        match bytes.len() {
            6 => Some(Self::rgba(
                byte(0)? as f32 / 255.0,
                byte(2)? as f32 / 255.0,
                byte(4)? as f32 / 255.0,
                1.0,
            )),
            8 => Some(Self::rgba(
                byte(0)? as f32 / 255.0,
                byte(2)? as f32 / 255.0,
                byte(4)? as f32 / 255.0,
                byte(6)? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let r = (self.r * 255.0).round() as u8;
        let g = (self.g * 255.0).round() as u8;
        let b = (self.b * 255.0).round() as u8;
        let a = (self.a * 255.0).round() as u8;
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Cost categories ─────────────────────────────────────────────────────

/// Ledger bucket a component's cost is booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Structural,
    Openings,
    Finishes,
    Fixtures,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Structural,
        Category::Openings,
        Category::Finishes,
        Category::Fixtures,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Structural => "structural",
            Category::Openings => "openings",
            Category::Finishes => "finishes",
            Category::Fixtures => "fixtures",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Placed components ───────────────────────────────────────────────────

/// One catalog item dropped into the design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedComponent {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: TypeName,
    /// Copied from the catalog at placement time.
    pub unit_cost: u32,
    /// Cost bucket copied from the catalog; `None` for furniture-like items.
    pub category: Option<Category>,
    /// Grid-snapped top-left corner.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Degrees, kept in [0, 360).
    pub rotation: i32,
}

impl PlacedComponent {
    /// Axis-aligned containment test. Rotation is ignored and edges are
    /// inclusive, so a point on the border hits.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (x, y) = (self.x as f64, self.y as f64);
        px >= x && px <= x + self.width as f64 && py >= y && py <= y + self.height as f64
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Round a raw coordinate to the nearest grid multiple, halves rounding up
/// (toward +∞) on each axis. Non-finite input snaps to 0.
pub fn snap_to_grid(value: f64, grid: u32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let grid = grid.max(1) as f64;
    let cells = (value / grid + 0.5).floor();
    (cells * grid).clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// Normalize an angle in degrees to [0, 360).
pub fn normalize_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}
