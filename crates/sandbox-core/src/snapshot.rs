//! Serializable picture of a design, handed to the lead/storage layer.

use crate::ledger::CostLedger;
use crate::model::PlacedComponent;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot encode: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("snapshot decode: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Ledger totals as shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTotals {
    pub structural: u64,
    pub openings: u64,
    pub finishes: u64,
    pub fixtures: u64,
    pub subtotal: u64,
    pub grand_total: u64,
}

impl CostTotals {
    pub fn from_ledger(ledger: &CostLedger, labor_multiplier: f64) -> Self {
        Self {
            structural: ledger.structural,
            openings: ledger.openings,
            finishes: ledger.finishes,
            fixtures: ledger.fixtures,
            subtotal: ledger.subtotal(),
            grand_total: ledger.grand_total_with(labor_multiplier),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    pub components: Vec<PlacedComponent>,
    pub totals: CostTotals,
}

impl DesignSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, SnapshotError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Compact MessagePack encoding, used for local persistence.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}
