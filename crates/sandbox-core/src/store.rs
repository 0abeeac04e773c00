//! Placement store: the ordered stack of components in a design.
//!
//! Mutators are crate-private. Outside this crate the store is reachable
//! only through [`Design`](crate::design::Design), which books every
//! change into the cost ledger in the same call.

use crate::catalog::Catalog;
use crate::id::{ComponentId, TypeName};
use crate::model::{PlacedComponent, normalize_rotation, snap_to_grid};

#[derive(Debug, Clone)]
pub struct PlacementStore {
    /// Insertion order; the last element is the topmost.
    items: Vec<PlacedComponent>,
    grid_size: u32,
}

impl PlacementStore {
    pub fn new(grid_size: u32) -> Self {
        Self {
            items: Vec::new(),
            grid_size: grid_size.max(1),
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Components bottom-to-top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PlacedComponent> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[PlacedComponent] {
        &self.items
    }

    pub fn get(&self, id: ComponentId) -> Option<&PlacedComponent> {
        self.items.iter().find(|c| c.id == id)
    }

    /// Topmost component whose box contains the point.
    pub fn find_at(&self, x: f64, y: f64) -> Option<&PlacedComponent> {
        self.position_at(x, y).map(|i| &self.items[i])
    }

    fn position_at(&self, x: f64, y: f64) -> Option<usize> {
        self.items.iter().rposition(|c| c.contains(x, y))
    }

    fn position_of(&self, id: ComponentId) -> Option<usize> {
        self.items.iter().position(|c| c.id == id)
    }

    pub(crate) fn place(&mut self, catalog: &Catalog, kind: &str, x: f64, y: f64) -> PlacedComponent {
        let kind = TypeName::intern(kind);
        if !catalog.contains(kind) {
            log::info!("unknown component type {kind:?}, using default footprint");
        }
        let entry = catalog.lookup_type(kind);
        let component = PlacedComponent {
            id: ComponentId::next(),
            kind,
            unit_cost: entry.unit_cost,
            category: entry.category,
            x: snap_to_grid(x, self.grid_size),
            y: snap_to_grid(y, self.grid_size),
            width: entry.width,
            height: entry.height,
            rotation: 0,
        };
        self.items.push(component.clone());
        component
    }

    pub(crate) fn remove_at(&mut self, x: f64, y: f64) -> Option<PlacedComponent> {
        let index = self.position_at(x, y)?;
        Some(self.items.remove(index))
    }

    /// Remove by id, returning the stacking index it occupied.
    pub(crate) fn remove(&mut self, id: ComponentId) -> Option<(usize, PlacedComponent)> {
        let index = self.position_of(id)?;
        Some((index, self.items.remove(index)))
    }

    /// Put a component back at `index` (clamped to the end). Ids already in
    /// the store are rejected so uniqueness holds.
    pub(crate) fn insert(&mut self, index: usize, component: PlacedComponent) -> bool {
        if self.position_of(component.id).is_some() {
            return false;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, component);
        true
    }

    pub(crate) fn clear(&mut self) -> Vec<PlacedComponent> {
        std::mem::take(&mut self.items)
    }

    /// Move to a new (re-snapped) position. Returns the old position.
    pub(crate) fn move_to(&mut self, id: ComponentId, x: f64, y: f64) -> Option<(i32, i32)> {
        let grid = self.grid_size;
        let c = self.items.iter_mut().find(|c| c.id == id)?;
        let old = (c.x, c.y);
        c.x = snap_to_grid(x, grid);
        c.y = snap_to_grid(y, grid);
        Some(old)
    }

    /// Rotate by `delta` degrees. Returns the old rotation.
    pub(crate) fn rotate(&mut self, id: ComponentId, delta: i32) -> Option<i32> {
        let c = self.items.iter_mut().find(|c| c.id == id)?;
        let old = c.rotation;
        c.rotation = normalize_rotation(old.wrapping_add(delta));
        Some(old)
    }

    pub(crate) fn set_rotation(&mut self, id: ComponentId, degrees: i32) -> Option<i32> {
        let c = self.items.iter_mut().find(|c| c.id == id)?;
        let old = c.rotation;
        c.rotation = normalize_rotation(degrees);
        Some(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_snaps_and_copies_catalog_data() {
        let catalog = Catalog::builtin();
        let mut store = PlacementStore::new(20);
        let wall = store.place(&catalog, "wall", 31.0, 49.0);
        assert_eq!((wall.x, wall.y), (40, 40));
        assert_eq!((wall.width, wall.height), (100, 20));
        assert_eq!(wall.unit_cost, 500);
        assert_eq!(wall.rotation, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn find_at_prefers_most_recent() {
        let catalog = Catalog::builtin();
        let mut store = PlacementStore::new(20);
        let a = store.place(&catalog, "flooring", 0.0, 0.0);
        let b = store.place(&catalog, "window", 20.0, 20.0);
        assert_eq!(store.find_at(30.0, 30.0).map(|c| c.id), Some(b.id));
        assert_eq!(store.find_at(5.0, 5.0).map(|c| c.id), Some(a.id));
        assert!(store.find_at(500.0, 500.0).is_none());
    }

    #[test]
    fn remove_at_takes_topmost() {
        let catalog = Catalog::builtin();
        let mut store = PlacementStore::new(20);
        let a = store.place(&catalog, "flooring", 0.0, 0.0);
        let b = store.place(&catalog, "window", 0.0, 0.0);
        assert_eq!(store.remove_at(10.0, 10.0).map(|c| c.id), Some(b.id));
        assert_eq!(store.remove_at(10.0, 10.0).map(|c| c.id), Some(a.id));
        assert!(store.remove_at(10.0, 10.0).is_none());
    }

    #[test]
    fn insert_restores_stacking_position() {
        let catalog = Catalog::builtin();
        let mut store = PlacementStore::new(20);
        let a = store.place(&catalog, "wall", 0.0, 0.0);
        let b = store.place(&catalog, "door", 200.0, 0.0);
        let (index, removed) = store.remove(a.id).unwrap();
        assert_eq!(index, 0);
        assert!(store.insert(index, removed.clone()));
        assert!(!store.insert(0, removed));
        let ids: Vec<_> = store.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn move_and_rotate_keep_id() {
        let catalog = Catalog::builtin();
        let mut store = PlacementStore::new(20);
        let a = store.place(&catalog, "table", 0.0, 0.0);
        assert_eq!(store.move_to(a.id, 95.0, 41.0), Some((0, 0)));
        assert_eq!(store.rotate(a.id, -90), Some(0));
        let moved = store.get(a.id).unwrap();
        assert_eq!((moved.x, moved.y, moved.rotation), (100, 40, 270));
        assert_eq!(store.set_rotation(a.id, 720), Some(270));
        assert_eq!(store.get(a.id).unwrap().rotation, 0);
    }

    #[test]
    fn zero_grid_is_treated_as_one() {
        let store = PlacementStore::new(0);
        assert_eq!(store.grid_size(), 1);
    }
}
