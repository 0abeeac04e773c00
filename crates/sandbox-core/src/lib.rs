pub mod catalog;
pub mod config;
pub mod design;
pub mod id;
pub mod intent;
pub mod ledger;
pub mod model;
pub mod snapshot;
pub mod store;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use config::{ConfigError, SandboxConfig};
pub use design::Design;
pub use id::{ComponentId, MAX_RAW_ID, TypeName};
pub use intent::{Intent, classify};
pub use ledger::CostLedger;
pub use model::*;
pub use snapshot::{CostTotals, DesignSnapshot, SnapshotError};
pub use store::PlacementStore;
