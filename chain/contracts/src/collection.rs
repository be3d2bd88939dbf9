//! Tree collection — in-memory collectible asset contract
//!
//! Standard non-fungible collection semantics:
//! - Sequential asset ids starting at 0
//! - Per-holder balances and per-asset metadata URIs
//! - Single-asset approvals, cleared on every transfer
//! - Operator approvals covering all of a holder's assets
//!
//! Serves as the registry's own minting backend and, deployed separately,
//! as an externally issued collection.

use std::collections::{HashMap, HashSet};

use custody_types::ids::{AssetId, Identity};
use tracing::{debug, info};

use crate::backend::AssetBackend;
use crate::errors::BackendError;
use crate::events::{ContractEvent, TokenApproval, TokenApprovalForAll, Transfer};

#[derive(Debug)]
pub struct TreeCollection {
    address: Identity,
    next_id: AssetId,
    /// Holder of every minted asset
    owners: HashMap<AssetId, Identity>,
    balances: HashMap<Identity, u64>,
    token_uris: HashMap<AssetId, String>,
    token_approvals: HashMap<AssetId, Identity>,
    /// (holder, operator) pairs
    operator_approvals: HashSet<(Identity, Identity)>,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl TreeCollection {
    /// Deploy an empty collection at `address`.
    pub fn new(address: Identity) -> Self {
        info!(collection = %address, "Tree collection deployed");
        Self {
            address,
            next_id: AssetId::new(0),
            owners: HashMap::new(),
            balances: HashMap::new(),
            token_uris: HashMap::new(),
            token_approvals: HashMap::new(),
            operator_approvals: HashSet::new(),
            events: Vec::new(),
        }
    }

    /// Mint the next asset to `to` with metadata `uri`. Open to any caller.
    pub fn safe_mint(&mut self, to: Identity, uri: &str) -> Result<AssetId, BackendError> {
        if to.is_zero() {
            return Err(BackendError::ZeroIdentity);
        }

        let asset_id = self.next_id;
        let next_id = asset_id.next().ok_or(BackendError::IdsExhausted)?;
        let balance = self.balances.get(&to).copied().unwrap_or(0);
        let new_balance = balance.checked_add(1).ok_or(BackendError::IdsExhausted)?;

        self.next_id = next_id;
        self.owners.insert(asset_id, to);
        self.balances.insert(to, new_balance);
        if !uri.is_empty() {
            self.token_uris.insert(asset_id, uri.to_string());
        }

        debug!(collection = %self.address, asset_id = asset_id.value(), to = %to, "Minted");
        self.events.push(ContractEvent::Transfer(Transfer {
            from: Identity::ZERO,
            to,
            asset_id,
        }));
        Ok(asset_id)
    }

    /// Number of assets held by `holder`.
    pub fn balance_of(&self, holder: &Identity) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Metadata URI of an asset; empty if minted without one.
    pub fn token_uri(&self, asset_id: AssetId) -> Result<&str, BackendError> {
        self.require_minted(asset_id)?;
        Ok(self
            .token_uris
            .get(&asset_id)
            .map(String::as_str)
            .unwrap_or(""))
    }

    /// Approved spender of an asset, if any.
    pub fn get_approved(&self, asset_id: AssetId) -> Result<Option<Identity>, BackendError> {
        self.require_minted(asset_id)?;
        Ok(self.token_approvals.get(&asset_id).copied())
    }

    /// Grant or revoke `operator` over all of `caller`'s assets.
    pub fn set_approval_for_all(
        &mut self,
        caller: &Identity,
        operator: Identity,
        enabled: bool,
    ) -> Result<(), BackendError> {
        if *caller == operator {
            return Err(BackendError::SelfApproval);
        }

        if enabled {
            self.operator_approvals.insert((*caller, operator));
        } else {
            self.operator_approvals.remove(&(*caller, operator));
        }

        self.events
            .push(ContractEvent::TokenApprovalForAll(TokenApprovalForAll {
                owner: *caller,
                operator,
                enabled,
            }));
        Ok(())
    }

    pub fn is_approved_for_all(&self, holder: &Identity, operator: &Identity) -> bool {
        self.operator_approvals.contains(&(*holder, *operator))
    }

    /// Total assets ever minted.
    pub fn total_minted(&self) -> u64 {
        self.next_id.value()
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    fn require_minted(&self, asset_id: AssetId) -> Result<Identity, BackendError> {
        self.owners
            .get(&asset_id)
            .copied()
            .ok_or_else(|| BackendError::NonexistentAsset {
                asset: asset_id.to_string(),
            })
    }
}

impl AssetBackend for TreeCollection {
    fn address(&self) -> Identity {
        self.address
    }

    fn mint(&mut self, _minter: &Identity, to: Identity, uri: &str) -> Result<AssetId, BackendError> {
        self.safe_mint(to, uri)
    }

    fn owner_of(&self, asset_id: AssetId) -> Result<Identity, BackendError> {
        self.require_minted(asset_id)
    }

    fn transfer_ownership(
        &mut self,
        caller: &Identity,
        asset_id: AssetId,
        from: Identity,
        to: Identity,
    ) -> Result<(), BackendError> {
        let holder = self.require_minted(asset_id)?;
        if !self.is_approved_or_owner(asset_id, caller) {
            return Err(BackendError::NotAuthorized {
                caller: caller.to_string(),
            });
        }
        if holder != from {
            return Err(BackendError::NotOwner {
                from: from.to_string(),
            });
        }
        if to.is_zero() {
            return Err(BackendError::ZeroIdentity);
        }

        self.token_approvals.remove(&asset_id);
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance = balance.saturating_sub(1);
        }
        *self.balances.entry(to).or_insert(0) += 1;
        self.owners.insert(asset_id, to);

        debug!(
            collection = %self.address,
            asset_id = asset_id.value(),
            from = %from,
            to = %to,
            "Transferred"
        );
        self.events
            .push(ContractEvent::Transfer(Transfer { from, to, asset_id }));
        Ok(())
    }

    fn approve(&mut self, caller: &Identity, asset_id: AssetId, spender: Identity) -> Result<(), BackendError> {
        let holder = self.require_minted(asset_id)?;
        if spender == holder {
            return Err(BackendError::SelfApproval);
        }
        if *caller != holder && !self.is_approved_for_all(&holder, caller) {
            return Err(BackendError::NotAuthorized {
                caller: caller.to_string(),
            });
        }

        self.token_approvals.insert(asset_id, spender);
        self.events.push(ContractEvent::TokenApproval(TokenApproval {
            owner: holder,
            spender,
            asset_id,
        }));
        Ok(())
    }

    fn is_approved_or_owner(&self, asset_id: AssetId, actor: &Identity) -> bool {
        let Some(holder) = self.owners.get(&asset_id) else {
            return false;
        };
        holder == actor
            || self.token_approvals.get(&asset_id) == Some(actor)
            || self.is_approved_for_all(holder, actor)
    }
}
