//! Running cost totals, one per category.

use crate::model::{Category, PlacedComponent};
use serde::{Deserialize, Serialize};

/// Labor-and-overhead factor applied to the material subtotal.
pub const DEFAULT_LABOR_MULTIPLIER: f64 = 2.5;

/// Four non-negative running totals, one per [`Category`].
///
/// Uncategorized components (furniture) never touch the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLedger {
    pub structural: u64,
    pub openings: u64,
    pub finishes: u64,
    pub fixtures: u64,
}

impl CostLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild totals from scratch over `components`.
    pub fn recompute<'a>(components: impl IntoIterator<Item = &'a PlacedComponent>) -> Self {
        let mut ledger = Self::new();
        for c in components {
            ledger.add(c);
        }
        ledger
    }

    pub fn add(&mut self, component: &PlacedComponent) {
        if let Some(category) = component.category {
            let slot = self.slot_mut(category);
            *slot = slot.saturating_add(component.unit_cost as u64);
        }
    }

    /// Reverse an earlier `add`. Clamps at zero.
    pub fn remove(&mut self, component: &PlacedComponent) {
        if let Some(category) = component.category {
            let slot = self.slot_mut(category);
            *slot = slot.saturating_sub(component.unit_cost as u64);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Structural => self.structural,
            Category::Openings => self.openings,
            Category::Finishes => self.finishes,
            Category::Fixtures => self.fixtures,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut u64 {
        match category {
            Category::Structural => &mut self.structural,
            Category::Openings => &mut self.openings,
            Category::Finishes => &mut self.finishes,
            Category::Fixtures => &mut self.fixtures,
        }
    }

    pub fn subtotal(&self) -> u64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Subtotal with the default 2.5× labor multiplier, rounded.
    pub fn grand_total(&self) -> u64 {
        self.grand_total_with(DEFAULT_LABOR_MULTIPLIER)
    }

    /// Subtotal × `multiplier`, rounded half-up to the nearest integer.
    /// A negative or non-finite multiplier yields 0.
    pub fn grand_total_with(&self, multiplier: f64) -> u64 {
        let total = (self.subtotal() as f64 * multiplier + 0.5).floor();
        if total.is_finite() && total > 0.0 {
            total as u64
        } else {
            0
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{ComponentId, TypeName};

    fn component(kind: &str, unit_cost: u32, category: Option<Category>) -> PlacedComponent {
        PlacedComponent {
            id: ComponentId::next(),
            kind: TypeName::intern(kind),
            unit_cost,
            category,
            x: 0,
            y: 0,
            width: 40,
            height: 40,
            rotation: 0,
        }
    }

    #[test]
    fn add_books_into_category() {
        let mut ledger = CostLedger::new();
        ledger.add(&component("wall", 500, Some(Category::Structural)));
        ledger.add(&component("door", 350, Some(Category::Openings)));
        assert_eq!(ledger.structural, 500);
        assert_eq!(ledger.openings, 350);
        assert_eq!(ledger.subtotal(), 850);
        assert_eq!(ledger.grand_total(), 2125);
    }

    #[test]
    fn uncategorized_is_ignored() {
        let mut ledger = CostLedger::new();
        ledger.add(&component("sofa", 800, None));
        assert!(ledger.is_zero());
    }

    #[test]
    fn remove_clamps_at_zero() {
        let wall = component("wall", 500, Some(Category::Structural));
        let mut ledger = CostLedger::new();
        ledger.add(&wall);
        ledger.remove(&wall);
        ledger.remove(&wall);
        assert_eq!(ledger.structural, 0);
    }

    #[test]
    fn grand_total_rounds_half_up() {
        let mut ledger = CostLedger::new();
        ledger.add(&component("lighting", 1, Some(Category::Fixtures)));
        // 1 × 2.5 = 2.5 → 3
        assert_eq!(ledger.grand_total(), 3);
        assert_eq!(ledger.grand_total_with(1.0), 1);
        assert_eq!(ledger.grand_total_with(-2.0), 0);
        assert_eq!(ledger.grand_total_with(f64::NAN), 0);
    }

    #[test]
    fn recompute_matches_incremental() {
        let items = vec![
            component("wall", 500, Some(Category::Structural)),
            component("cabinet", 700, Some(Category::Finishes)),
            component("table", 350, None),
        ];
        let mut incremental = CostLedger::new();
        for c in &items {
            incremental.add(c);
        }
        incremental.remove(&items[1]);
        incremental.add(&items[1]);
        assert_eq!(CostLedger::recompute(&items), incremental);
    }
}
