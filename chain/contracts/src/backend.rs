//! Asset backend capability
//!
//! The registry never tracks collection-level holdership itself; it drives a
//! collection through this trait. Any collection that honours these
//! semantics can be custodied, whether the registry mints into it or the
//! assets were issued elsewhere.

use custody_types::ids::{AssetId, Identity};

use crate::errors::BackendError;

pub trait AssetBackend {
    /// Identity the collection is deployed under.
    fn address(&self) -> Identity;

    /// Mint a fresh asset to `to`, recording `uri` as its metadata.
    fn mint(&mut self, minter: &Identity, to: Identity, uri: &str) -> Result<AssetId, BackendError>;

    fn owner_of(&self, asset_id: AssetId) -> Result<Identity, BackendError>;

    /// Move `asset_id` from `from` to `to` on behalf of `caller`.
    ///
    /// Fails if `from` is not the current holder or `caller` is neither the
    /// holder nor approved for the asset.
    fn transfer_ownership(
        &mut self,
        caller: &Identity,
        asset_id: AssetId,
        from: Identity,
        to: Identity,
    ) -> Result<(), BackendError>;

    /// Approve `spender` for a single asset on behalf of `caller`.
    fn approve(&mut self, caller: &Identity, asset_id: AssetId, spender: Identity) -> Result<(), BackendError>;

    /// True if `actor` holds the asset or may move it.
    fn is_approved_or_owner(&self, asset_id: AssetId, actor: &Identity) -> bool;
}
