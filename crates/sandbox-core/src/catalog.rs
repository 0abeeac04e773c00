//! Component catalog: type name → footprint, price, cost category.
//!
//! Lookups are total. A type the catalog does not know resolves to
//! [`CatalogEntry::FALLBACK`] (40×40, free, uncategorized).

use crate::id::TypeName;
use crate::model::{Category, Color};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid fill color {color:?} for {kind}")]
    Color { kind: String, color: String },
}

/// Reference data for one component type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub width: u32,
    pub height: u32,
    pub unit_cost: u32,
    pub category: Option<Category>,
    /// 2D fill color.
    pub fill: Color,
    /// Vertical extent of the 3D box, in scene units.
    pub extent_3d: f64,
}

impl CatalogEntry {
    pub const FALLBACK: CatalogEntry = CatalogEntry {
        width: 40,
        height: 40,
        unit_cost: 0,
        category: None,
        fill: Color::from_rgb_u32(0x6C757D),
        extent_3d: 1.0,
    };

    const fn new(width: u32, height: u32, unit_cost: u32, category: Option<Category>, fill: u32) -> Self {
        Self {
            width,
            height,
            unit_cost,
            category,
            fill: Color::from_rgb_u32(fill),
            extent_3d: 1.0,
        }
    }

    const fn tall(mut self, extent_3d: f64) -> Self {
        self.extent_3d = extent_3d;
        self
    }
}

use Category::*;

const BUILTIN: &[(&str, CatalogEntry)] = &[
    ("wall", CatalogEntry::new(100, 20, 500, Some(Structural), 0x396851).tall(3.0)),
    ("beam", CatalogEntry::new(80, 20, 800, Some(Structural), 0x2B2B2B)),
    ("column", CatalogEntry::new(20, 80, 600, Some(Structural), 0xBD9264)),
    ("door", CatalogEntry::new(30, 60, 350, Some(Openings), 0xC19A6B)),
    ("window", CatalogEntry::new(40, 40, 450, Some(Openings), 0x396851)),
    ("sliding-door", CatalogEntry::new(50, 60, 1200, Some(Openings), 0xC19A6B)),
    ("flooring", CatalogEntry::new(80, 80, 300, Some(Finishes), 0xBD9264)),
    ("countertop", CatalogEntry::new(60, 20, 900, Some(Finishes), 0x8B8680)),
    ("cabinet", CatalogEntry::new(40, 60, 700, Some(Finishes), 0xBD9264)),
    ("lighting", CatalogEntry::new(20, 20, 150, Some(Fixtures), 0xFFD700)),
    ("plumbing", CatalogEntry::new(20, 20, 400, Some(Fixtures), 0x396851)),
    ("sofa", CatalogEntry::new(80, 40, 800, None, 0x6C757D)),
    ("table", CatalogEntry::new(60, 60, 350, None, 0xC19A6B)),
];

/// On-disk shape of one catalog row.
#[derive(Debug, Deserialize, Serialize)]
struct EntryDef {
    width: u32,
    height: u32,
    unit_cost: u32,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    fill: Option<String>,
    #[serde(default = "default_extent")]
    extent_3d: f64,
}

fn default_extent() -> f64 {
    1.0
}

/// Static mapping from component type to its reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<TypeName, CatalogEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// An empty catalog: every lookup falls back.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The thirteen stock component types.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, entry)| (TypeName::intern(name), *entry))
            .collect();
        Self { entries }
    }

    /// Load a catalog from a JSON object keyed by type name:
    ///
    /// ```json
    /// { "wall": { "width": 100, "height": 20, "unit_cost": 500,
    ///             "category": "structural", "fill": "#396851", "extent_3d": 3 } }
    /// ```
    ///
    /// `fill` defaults to the fallback grey, `category` to none.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let defs: HashMap<String, EntryDef> = serde_json::from_str(text)?;
        let mut entries = HashMap::with_capacity(defs.len());
        for (name, def) in defs {
            let fill = match def.fill {
                Some(hex) => Color::from_hex(&hex).ok_or_else(|| CatalogError::Color {
                    kind: name.clone(),
                    color: hex.clone(),
                })?,
                None => CatalogEntry::FALLBACK.fill,
            };
            entries.insert(
                TypeName::intern(&name),
                CatalogEntry {
                    width: def.width,
                    height: def.height,
                    unit_cost: def.unit_cost,
                    category: def.category,
                    fill,
                    extent_3d: def.extent_3d,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Insert or replace one entry.
    pub fn with_entry(mut self, kind: &str, entry: CatalogEntry) -> Self {
        self.entries.insert(TypeName::intern(kind), entry);
        self
    }

    /// Entry for a type given by name. A name that was never interned
    /// cannot be in the catalog, so it falls back without being interned.
    pub fn lookup(&self, kind: &str) -> CatalogEntry {
        TypeName::get(kind).map_or(CatalogEntry::FALLBACK, |kind| self.lookup_type(kind))
    }

    pub fn lookup_type(&self, kind: TypeName) -> CatalogEntry {
        self.entries.get(&kind).copied().unwrap_or(CatalogEntry::FALLBACK)
    }

    pub fn contains(&self, kind: TypeName) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known type names, sorted alphabetically.
    pub fn types(&self) -> Vec<TypeName> {
        let mut names: Vec<TypeName> = self.entries.keys().copied().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }
}
