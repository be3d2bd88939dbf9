//! Custody ledger types
//!
//! A `CustodyRecord` exists for exactly as long as the registry holds the
//! underlying asset. Its `owner` is the beneficial owner tracked by the
//! registry, not the collection-level holder (which is the registry itself).

use crate::ids::{AssetId, Identity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger key: the collection holding the asset plus the asset's id there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetKey {
    pub backend: Identity,
    pub asset_id: AssetId,
}

impl AssetKey {
    pub fn new(backend: Identity, asset_id: AssetId) -> Self {
        Self { backend, asset_id }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.backend, self.asset_id)
    }
}

/// Per-asset custody entry
///
/// Invariants:
/// - `owner` is never the null identity
/// - `single_approval` is cleared whenever `owner` changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyRecord {
    pub owner: Identity,
    /// Tree count declared when the asset entered custody
    pub tree_number: u64,
    /// At most one delegate for this asset
    pub single_approval: Option<Identity>,
    /// Tree count confirmed by the most recent audit, 0 if never audited
    pub audited_count: u64,
}

impl CustodyRecord {
    /// Fresh record for an asset entering custody.
    pub fn new(owner: Identity, tree_number: u64) -> Self {
        Self {
            owner,
            tree_number,
            single_approval: None,
            audited_count: 0,
        }
    }

    /// Reassign beneficial ownership, dropping any outstanding delegate.
    pub fn reassign(&mut self, to: Identity) {
        self.owner = to;
        self.single_approval = None;
    }

    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        self.owner == *identity
    }

    pub fn is_approved(&self, identity: &Identity) -> bool {
        self.single_approval.as_ref() == Some(identity)
    }

    pub fn has_been_audited(&self) -> bool {
        self.audited_count != 0
    }
}

/// Lifecycle state of a ledger key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustodyState {
    /// Never taken into custody, or withdrawn
    NonExistent,
    /// Held by the registry on behalf of a beneficial owner
    Custodied,
}
