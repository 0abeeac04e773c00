//! A design: placement store and cost ledger moving as one unit.
//!
//! Every public mutation updates the store and books the matching ledger
//! change before returning, so the ledger always equals a recompute over
//! the current components.

use crate::catalog::Catalog;
use crate::config::SandboxConfig;
use crate::id::ComponentId;
use crate::ledger::CostLedger;
use crate::model::{PlacedComponent, normalize_rotation, snap_to_grid};
use crate::snapshot::{CostTotals, DesignSnapshot};
use crate::store::PlacementStore;

#[derive(Debug, Clone)]
pub struct Design {
    catalog: Catalog,
    store: PlacementStore,
    ledger: CostLedger,
    labor_multiplier: f64,
}

impl Default for Design {
    fn default() -> Self {
        Self::new(Catalog::builtin(), &SandboxConfig::default())
    }
}

impl Design {
    pub fn new(catalog: Catalog, config: &SandboxConfig) -> Self {
        Self {
            catalog,
            store: PlacementStore::new(config.grid_size),
            ledger: CostLedger::new(),
            labor_multiplier: config.labor_multiplier,
        }
    }

    /// Rebuild a design from a snapshot. Totals are recomputed from the
    /// components; the snapshot's own totals are not trusted.
    ///
    /// Positions are re-snapped to this design's grid and rotations
    /// normalized. A component whose id is 0, out of range, or already
    /// taken gets a fresh id, so every component in the snapshot survives.
    pub fn from_snapshot(snapshot: &DesignSnapshot, catalog: Catalog, config: &SandboxConfig) -> Self {
        let mut design = Self::new(catalog, config);
        let grid = design.store.grid_size();
        for component in &snapshot.components {
            let mut component = component.clone();
            component.x = snap_to_grid(component.x as f64, grid);
            component.y = snap_to_grid(component.y as f64, grid);
            component.rotation = normalize_rotation(component.rotation);
            component.id = match ComponentId::from_raw(component.id.get()) {
                Some(id) if design.store.get(id).is_none() => id,
                _ => {
                    let fresh = ComponentId::next();
                    log::warn!("snapshot id {} is unusable; restored as {fresh}", component.id);
                    fresh
                }
            };
            let end = design.store.len();
            design.store.insert(end, component);
        }
        design.recompute_ledger();
        design
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &CostLedger {
        &self.ledger
    }

    pub fn grid_size(&self) -> u32 {
        self.store.grid_size()
    }

    pub fn labor_multiplier(&self) -> f64 {
        self.labor_multiplier
    }

    pub fn grand_total(&self) -> u64 {
        self.ledger.grand_total_with(self.labor_multiplier)
    }

    pub fn totals(&self) -> CostTotals {
        CostTotals::from_ledger(&self.ledger, self.labor_multiplier)
    }

    /// Components bottom-to-top.
    pub fn components(&self) -> &[PlacedComponent] {
        self.store.as_slice()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, id: ComponentId) -> Option<&PlacedComponent> {
        self.store.get(id)
    }

    pub fn find_at(&self, x: f64, y: f64) -> Option<&PlacedComponent> {
        self.store.find_at(x, y)
    }

    pub fn snapshot(&self) -> DesignSnapshot {
        DesignSnapshot {
            components: self.store.as_slice().to_vec(),
            totals: self.totals(),
        }
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    pub fn place(&mut self, kind: &str, x: f64, y: f64) -> PlacedComponent {
        let component = self.store.place(&self.catalog, kind, x, y);
        self.ledger.add(&component);
        log::debug!(
            "placed {} {} at ({}, {})",
            component.kind,
            component.id,
            component.x,
            component.y
        );
        component
    }

    pub fn remove_at(&mut self, x: f64, y: f64) -> Option<PlacedComponent> {
        let component = self.store.remove_at(x, y)?;
        self.ledger.remove(&component);
        log::debug!("removed {} {}", component.kind, component.id);
        Some(component)
    }

    /// Remove by id. Returns the stacking index the component held, for
    /// [`Design::restore`].
    pub fn remove(&mut self, id: ComponentId) -> Option<(usize, PlacedComponent)> {
        let (index, component) = self.store.remove(id)?;
        self.ledger.remove(&component);
        log::debug!("removed {} {}", component.kind, component.id);
        Some((index, component))
    }

    /// Re-insert a previously removed component at its old stacking index.
    /// Returns `false` (and changes nothing) if its id is already present.
    pub fn restore(&mut self, index: usize, component: PlacedComponent) -> bool {
        let booked = component.clone();
        if !self.store.insert(index, component) {
            return false;
        }
        self.ledger.add(&booked);
        true
    }

    /// Empty the design and zero the ledger. Returns what was removed,
    /// bottom-to-top.
    pub fn clear(&mut self) -> Vec<PlacedComponent> {
        let removed = self.store.clear();
        self.ledger.reset();
        log::debug!("cleared {} components", removed.len());
        removed
    }

    /// Move a component to a new grid-snapped position. Returns its old
    /// position. Cost and id are untouched.
    pub fn move_to(&mut self, id: ComponentId, x: f64, y: f64) -> Option<(i32, i32)> {
        self.store.move_to(id, x, y)
    }

    /// Rotate a component by `delta` degrees. Returns its old rotation.
    pub fn rotate(&mut self, id: ComponentId, delta: i32) -> Option<i32> {
        self.store.rotate(id, delta)
    }

    pub fn set_rotation(&mut self, id: ComponentId, degrees: i32) -> Option<i32> {
        self.store.set_rotation(id, degrees)
    }

    /// Rebuild the ledger from the store.
    pub fn recompute_ledger(&mut self) {
        self.ledger = CostLedger::recompute(self.store.iter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn place_books_cost() {
        let mut design = Design::default();
        design.place("wall", 0.0, 0.0);
        assert_eq!(design.ledger().structural, 500);
        assert_eq!(design.grand_total(), 1250);
    }

    #[test]
    fn restore_rebooks_cost() {
        let mut design = Design::default();
        let door = design.place("door", 0.0, 0.0);
        let (index, removed) = design.remove(door.id).unwrap();
        assert_eq!(design.ledger().openings, 0);
        assert!(design.restore(index, removed));
        assert_eq!(design.ledger().openings, 350);
    }

    #[test]
    fn restore_rejects_duplicate_id() {
        let mut design = Design::default();
        let door = design.place("door", 0.0, 0.0);
        assert!(!design.restore(0, door));
        assert_eq!(design.ledger().openings, 350);
        assert_eq!(design.len(), 1);
    }

    #[test]
    fn custom_multiplier_applies() {
        let config = SandboxConfig {
            labor_multiplier: 3.0,
            ..SandboxConfig::default()
        };
        let mut design = Design::new(Catalog::builtin(), &config);
        design.place("lighting", 0.0, 0.0);
        assert_eq!(design.totals().grand_total, 450);
    }

    #[test]
    fn snapshot_rebuilds_same_totals() {
        let mut design = Design::default();
        design.place("wall", 0.0, 0.0);
        design.place("sofa", 200.0, 0.0);
        design.place("plumbing", 400.0, 0.0);
        let snapshot = design.snapshot();

        let rebuilt = Design::from_snapshot(&snapshot, Catalog::builtin(), &SandboxConfig::default());
        assert_eq!(rebuilt.components(), design.components());
        assert_eq!(rebuilt.totals(), snapshot.totals);
    }

    fn snapshot_with(components: &str) -> DesignSnapshot {
        DesignSnapshot::from_json(&format!(
            r#"{{ "components": [{components}],
                 "totals": {{ "structural": 0, "openings": 0, "finishes": 0,
                             "fixtures": 0, "subtotal": 0, "grand_total": 0 }} }}"#
        ))
        .unwrap()
    }

    fn door_json(id: u64, x: i32, y: i32, rotation: i32) -> String {
        format!(
            r#"{{ "id": {id}, "type": "door", "unit_cost": 350, "category": "openings",
                 "x": {x}, "y": {y}, "width": 30, "height": 60, "rotation": {rotation} }}"#
        )
    }

    #[test]
    fn unusable_snapshot_ids_are_reassigned() {
        let taken = ComponentId::next().get();
        let snapshot = snapshot_with(&[
            door_json(u64::MAX, 0, 0, 0),
            door_json(0, 100, 0, 0),
            door_json(taken, 200, 0, 0),
            door_json(taken, 300, 0, 0),
        ]
        .join(","));
        let mut design = Design::from_snapshot(&snapshot, Catalog::builtin(), &SandboxConfig::default());
        design.place("door", 400.0, 0.0);
        design.place("door", 500.0, 0.0);

        let mut ids: Vec<u64> = design.components().iter().map(|c| c.id.get()).collect();
        assert_eq!(ids.len(), 6);
        assert!(ids.iter().all(|&id| id != 0 && id <= crate::id::MAX_RAW_ID));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6, "ids must stay unique");
        assert_eq!(design.ledger().openings, 6 * 350);
    }

    #[test]
    fn snapshot_positions_are_resnapped() {
        let id = ComponentId::next().get();
        let snapshot = snapshot_with(&door_json(id, 7, 13, 725));
        let design = Design::from_snapshot(&snapshot, Catalog::builtin(), &SandboxConfig::default());
        let door = &design.components()[0];
        assert_eq!((door.x, door.y, door.rotation), (0, 20, 5));
        assert_eq!(door.id.get(), id);
    }
}
