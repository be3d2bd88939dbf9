//! Custody Registry — custody ledger, delegated transfer, audit gate
//!
//! The registry is the collection-level holder of every asset it custodies
//! and keeps its own ledger of beneficial owners:
//! - Take custody of an externally issued asset, or mint straight into custody
//! - Owner-driven transfer, single-asset approval, operator approval
//! - Audit of the recorded tree count by allow-listed auditors
//! - Withdrawal back to the beneficial owner
//!
//! Every operation either applies all of its effects or none. Ledger changes
//! are staged and only committed once the collection call they depend on has
//! succeeded.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use custody_types::custody::{AssetKey, CustodyRecord, CustodyState};
use custody_types::ids::{AssetId, Identity};
use tracing::{debug, error, info, warn};

use crate::auditor::AuditorGate;
use crate::backend::AssetBackend;
use crate::config::RegistryConfig;
use crate::errors::{ConfigError, RegistryError};
use crate::events::{
    Approval, ApprovalForAll, AssetAdded, AssetWithdrawn, ContractEvent, OwnershipTransferred,
    TreeAdded, TreeAudited,
};

/// Custody ledger and approval layer over one or more collections.
///
/// Records are keyed by `(collection, asset)`. Collections and the auditor
/// allow-list are handed in by the host per call; the registry checks them
/// against the identities it was configured with where the binding matters.
#[derive(Debug)]
pub struct CustodyRegistry {
    config: RegistryConfig,
    records: HashMap<AssetKey, CustodyRecord>,
    /// (owner, operator) pairs
    operator_approvals: HashSet<(Identity, Identity)>,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl CustodyRegistry {
    /// Construct a registry bound to the collection and allow-list named in `config`.
    pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            registry = %config.address,
            minting_backend = %config.minting_backend,
            auditor_registry = %config.auditor_registry,
            "Custody registry deployed"
        );
        Ok(Self {
            config,
            records: HashMap::new(),
            operator_approvals: HashSet::new(),
            events: Vec::new(),
        })
    }

    /// Identity the registry holds custodied assets under.
    pub fn address(&self) -> Identity {
        self.config.address
    }

    // ───────────────────────── Custody Intake ─────────────────────────

    /// Take custody of an asset the caller already holds in `backend`.
    ///
    /// The caller must hold the asset and must have approved the registry
    /// for it at collection level.
    pub fn add_existing_asset(
        &mut self,
        caller: &Identity,
        backend: &mut dyn AssetBackend,
        asset_id: AssetId,
        tree_number: u64,
    ) -> Result<ContractEvent, RegistryError> {
        let key = AssetKey::new(backend.address(), asset_id);
        if self.records.contains_key(&key) {
            return Err(RegistryError::AlreadyCustodied {
                asset: key.to_string(),
            });
        }

        let holder = backend.owner_of(asset_id).map_err(|e| {
            debug!(caller = %caller, asset = %key, error = %e, "Collection reports no holder");
            RegistryError::NotOwner {
                caller: caller.to_string(),
            }
        })?;
        if holder != *caller {
            warn!(caller = %caller, asset = %key, "Custody intake by non-holder");
            return Err(RegistryError::NotOwner {
                caller: caller.to_string(),
            });
        }

        let registry = self.config.address;
        if !backend.is_approved_or_owner(asset_id, &registry) {
            warn!(caller = %caller, asset = %key, "Registry not approved for intake");
            return Err(RegistryError::NotApproved {
                asset: key.to_string(),
            });
        }

        let record = CustodyRecord::new(*caller, tree_number);

        backend
            .transfer_ownership(&registry, asset_id, *caller, registry)
            .map_err(|e| {
                error!(asset = %key, error = %e, "Collection rejected custody intake");
                RegistryError::BackendTransferFailed {
                    reason: e.to_string(),
                }
            })?;

        self.records.insert(key, record);
        info!(asset = %key, owner = %caller, tree_number, "Asset taken into custody");

        let event = ContractEvent::AssetAdded(AssetAdded {
            backend: key.backend,
            asset_id,
            owner: *caller,
            tree_number,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Mint a fresh asset straight into custody, owned by the caller.
    ///
    /// `backend` must be the minting collection this registry was configured
    /// with. Emits `TreeAdded` carrying the new asset id.
    pub fn mint_new(
        &mut self,
        caller: &Identity,
        backend: &mut dyn AssetBackend,
        tree_number: u64,
        metadata_uri: &str,
    ) -> Result<AssetId, RegistryError> {
        if backend.address() != self.config.minting_backend {
            return Err(RegistryError::UnknownBackend {
                backend: backend.address().to_string(),
            });
        }
        if caller.is_zero() {
            return Err(RegistryError::ZeroIdentity);
        }

        let registry = self.config.address;
        let asset_id = backend.mint(&registry, registry, metadata_uri).map_err(|e| {
            error!(error = %e, "Collection rejected mint");
            RegistryError::BackendMintFailed {
                reason: e.to_string(),
            }
        })?;

        let key = AssetKey::new(self.config.minting_backend, asset_id);
        match self.records.entry(key) {
            Entry::Occupied(_) => {
                error!(asset = %key, "Collection minted an id already in custody");
                return Err(RegistryError::AlreadyCustodied {
                    asset: key.to_string(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(CustodyRecord::new(*caller, tree_number));
            }
        }
        info!(asset = %key, owner = %caller, tree_number, "Tree minted into custody");

        self.events.push(ContractEvent::TreeAdded(TreeAdded {
            backend: key.backend,
            asset_id,
            owner: *caller,
            tree_number,
        }));
        Ok(asset_id)
    }

    // ───────────────────────── Ledger Queries ─────────────────────────

    /// True iff the asset is custodied and `identity` is its recorded owner.
    pub fn check_owner(&self, identity: &Identity, backend: Identity, asset_id: AssetId) -> bool {
        self.records
            .get(&AssetKey::new(backend, asset_id))
            .is_some_and(|record| record.is_owned_by(identity))
    }

    /// Recorded owner of a custodied asset.
    pub fn owner_of(&self, backend: Identity, asset_id: AssetId) -> Result<Identity, RegistryError> {
        self.require_record(&AssetKey::new(backend, asset_id))
            .map(|record| record.owner)
    }

    pub fn record(&self, backend: Identity, asset_id: AssetId) -> Option<&CustodyRecord> {
        self.records.get(&AssetKey::new(backend, asset_id))
    }

    pub fn state(&self, backend: Identity, asset_id: AssetId) -> CustodyState {
        if self.records.contains_key(&AssetKey::new(backend, asset_id)) {
            CustodyState::Custodied
        } else {
            CustodyState::NonExistent
        }
    }

    /// Outstanding single-asset delegate.
    pub fn get_approved(&self, backend: Identity, asset_id: AssetId) -> Result<Option<Identity>, RegistryError> {
        self.require_record(&AssetKey::new(backend, asset_id))
            .map(|record| record.single_approval)
    }

    pub fn is_approved_for_all(&self, owner: &Identity, operator: &Identity) -> bool {
        self.operator_approvals.contains(&(*owner, *operator))
    }

    /// Keys of every asset recorded as owned by `owner`, in key order.
    pub fn assets_of(&self, owner: &Identity) -> Vec<AssetKey> {
        let mut keys: Vec<AssetKey> = self
            .records
            .iter()
            .filter(|(_, record)| record.is_owned_by(owner))
            .map(|(key, _)| *key)
            .collect();
        keys.sort();
        keys
    }

    pub fn custodied_count(&self) -> usize {
        self.records.len()
    }

    // ───────────────────────── Approvals ─────────────────────────

    /// Set the single delegate for an asset. Owner-only.
    ///
    /// Approving the zero identity clears the delegate.
    pub fn approve(
        &mut self,
        caller: &Identity,
        delegate: Identity,
        backend: Identity,
        asset_id: AssetId,
    ) -> Result<ContractEvent, RegistryError> {
        let key = AssetKey::new(backend, asset_id);
        let record = Self::owned_record_mut(&mut self.records, &key, caller)?;

        record.single_approval = (!delegate.is_zero()).then_some(delegate);
        info!(asset = %key, delegate = %delegate, "Delegate approved");

        let event = ContractEvent::Approval(Approval {
            backend,
            asset_id,
            owner: *caller,
            delegate,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Grant or revoke `operator` over every asset the caller owns, now or later.
    pub fn set_approval_for_all(&mut self, caller: &Identity, operator: Identity, enabled: bool) -> ContractEvent {
        if enabled {
            self.operator_approvals.insert((*caller, operator));
        } else {
            self.operator_approvals.remove(&(*caller, operator));
        }
        info!(owner = %caller, operator = %operator, enabled, "Operator approval updated");

        let event = ContractEvent::ApprovalForAll(ApprovalForAll {
            owner: *caller,
            operator,
            enabled,
        });
        self.events.push(event.clone());
        event
    }

    // ───────────────────────── Transfers ─────────────────────────

    /// Move beneficial ownership to `to`. Owner-only.
    pub fn transfer(
        &mut self,
        caller: &Identity,
        to: Identity,
        backend: Identity,
        asset_id: AssetId,
    ) -> Result<ContractEvent, RegistryError> {
        let key = AssetKey::new(backend, asset_id);
        let record = Self::owned_record_mut(&mut self.records, &key, caller)?;
        if to.is_zero() {
            return Err(RegistryError::ZeroIdentity);
        }

        record.reassign(to);
        info!(asset = %key, from = %caller, to = %to, "Ownership transferred");

        let event = ContractEvent::OwnershipTransferred(OwnershipTransferred {
            backend,
            asset_id,
            from: *caller,
            to,
            operator: *caller,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Move beneficial ownership from `from` to `to`.
    ///
    /// Allowed for `from` itself, the asset's single delegate, or an operator
    /// of `from`. The delegate is cleared whichever path authorized the call.
    pub fn transfer_from(
        &mut self,
        caller: &Identity,
        from: Identity,
        to: Identity,
        backend: Identity,
        asset_id: AssetId,
    ) -> Result<ContractEvent, RegistryError> {
        let key = AssetKey::new(backend, asset_id);
        let is_operator = self.operator_approvals.contains(&(from, *caller));
        let record = self
            .records
            .get_mut(&key)
            .ok_or_else(|| RegistryError::NoRecord {
                asset: key.to_string(),
            })?;

        if !record.is_owned_by(&from) {
            return Err(RegistryError::OwnerMismatch {
                stated: from.to_string(),
                recorded: record.owner.to_string(),
            });
        }
        if *caller != from && !record.is_approved(caller) && !is_operator {
            warn!(caller = %caller, asset = %key, "Unauthorized transfer_from");
            return Err(RegistryError::NotOwnerNorApproved {
                caller: caller.to_string(),
            });
        }
        if to.is_zero() {
            return Err(RegistryError::ZeroIdentity);
        }

        record.reassign(to);
        info!(asset = %key, from = %from, to = %to, operator = %caller, "Ownership transferred");

        let event = ContractEvent::OwnershipTransferred(OwnershipTransferred {
            backend,
            asset_id,
            from,
            to,
            operator: *caller,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Withdrawal ─────────────────────────

    /// Release the asset to its owner at collection level and drop the record.
    ///
    /// If the collection rejects the transfer the record is left untouched.
    pub fn withdraw(
        &mut self,
        caller: &Identity,
        backend: &mut dyn AssetBackend,
        asset_id: AssetId,
    ) -> Result<ContractEvent, RegistryError> {
        let key = AssetKey::new(backend.address(), asset_id);
        let owner = Self::owned_record_mut(&mut self.records, &key, caller)?.owner;

        let registry = self.config.address;
        backend
            .transfer_ownership(&registry, asset_id, registry, owner)
            .map_err(|e| {
                error!(asset = %key, error = %e, "Collection rejected withdrawal");
                RegistryError::BackendTransferFailed {
                    reason: e.to_string(),
                }
            })?;

        self.records.remove(&key);
        info!(asset = %key, owner = %owner, "Asset withdrawn from custody");

        let event = ContractEvent::AssetWithdrawn(AssetWithdrawn {
            backend: key.backend,
            asset_id,
            owner,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Audit ─────────────────────────

    /// Record an audited tree count. Auditor-only; ownership is unaffected.
    ///
    /// Membership is read from `auditors` on every call.
    pub fn audit(
        &mut self,
        caller: &Identity,
        auditors: &dyn AuditorGate,
        backend: Identity,
        asset_id: AssetId,
        new_tree_number: u64,
    ) -> Result<ContractEvent, RegistryError> {
        if auditors.address() != self.config.auditor_registry {
            return Err(RegistryError::AuditorRegistryMismatch {
                registry: auditors.address().to_string(),
            });
        }
        if !auditors.is_auditor(caller) {
            warn!(caller = %caller, "Audit attempted by non-auditor");
            return Err(RegistryError::NotAuditor);
        }

        let key = AssetKey::new(backend, asset_id);
        let record = self
            .records
            .get_mut(&key)
            .ok_or_else(|| RegistryError::NoRecord {
                asset: key.to_string(),
            })?;

        record.audited_count = new_tree_number;
        info!(asset = %key, auditor = %caller, tree_number = new_tree_number, "Tree audited");

        let event = ContractEvent::TreeAudited(TreeAudited {
            backend,
            asset_id,
            auditor: *caller,
            tree_number: new_tree_number,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    fn require_record(&self, key: &AssetKey) -> Result<&CustodyRecord, RegistryError> {
        self.records.get(key).ok_or_else(|| RegistryError::NoRecord {
            asset: key.to_string(),
        })
    }

    fn owned_record_mut<'a>(
        records: &'a mut HashMap<AssetKey, CustodyRecord>,
        key: &AssetKey,
        caller: &Identity,
    ) -> Result<&'a mut CustodyRecord, RegistryError> {
        let record = records.get_mut(key).ok_or_else(|| RegistryError::NoRecord {
            asset: key.to_string(),
        })?;
        if !record.is_owned_by(caller) {
            warn!(caller = %caller, asset = %key, "Rejected call from non-owner");
            return Err(RegistryError::NotOwner {
                caller: caller.to_string(),
            });
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::AuditorRegistry;
    use crate::collection::TreeCollection;

    struct Fixture {
        registry: CustodyRegistry,
        nft: TreeCollection,
        auditors: AuditorRegistry,
        admin: Identity,
        alice: Identity,
    }

    fn setup() -> Fixture {
        let admin = Identity::new();
        let nft = TreeCollection::new(Identity::new());
        let auditors = AuditorRegistry::new(Identity::new(), admin);
        let config = RegistryConfig::new(Identity::new(), nft.address(), auditors.address());
        Fixture {
            registry: CustodyRegistry::new(config).unwrap(),
            nft,
            auditors,
            admin,
            alice: Identity::new(),
        }
    }

    fn mint(f: &mut Fixture) -> AssetId {
        f.registry.mint_new(&f.alice, &mut f.nft, 1000, "").unwrap()
    }

    // ─── Construction ───

    #[test]
    fn test_new_rejects_zero_config() {
        let config = RegistryConfig::new(Identity::ZERO, Identity::new(), Identity::new());
        assert_eq!(
            CustodyRegistry::new(config).unwrap_err(),
            ConfigError::ZeroIdentity { field: "address" }
        );
    }

    // ─── Mint tests ───

    #[test]
    fn test_mint_creates_record() {
        let mut f = setup();
        let id = mint(&mut f);
        let backend = f.nft.address();

        assert!(f.registry.check_owner(&f.alice, backend, id));
        let record = f.registry.record(backend, id).unwrap();
        assert_eq!(record.tree_number, 1000);
        assert_eq!(record.audited_count, 0);
        assert_eq!(record.single_approval, None);
        assert_eq!(f.registry.state(backend, id), CustodyState::Custodied);
    }

    #[test]
    fn test_mint_held_by_registry() {
        let mut f = setup();
        let id = mint(&mut f);
        assert_eq!(f.nft.owner_of(id).unwrap(), f.registry.address());
        assert_eq!(f.nft.balance_of(&f.alice), 0);
    }

    #[test]
    fn test_mint_emits_tree_added() {
        let mut f = setup();
        let id = mint(&mut f);
        assert_eq!(
            f.registry.events().last(),
            Some(&ContractEvent::TreeAdded(TreeAdded {
                backend: f.nft.address(),
                asset_id: id,
                owner: f.alice,
                tree_number: 1000,
            }))
        );
    }

    #[test]
    fn test_mint_stores_metadata_uri() {
        let mut f = setup();
        let id = f
            .registry
            .mint_new(&f.alice, &mut f.nft, 12, "ipfs://grove")
            .unwrap();
        assert_eq!(f.nft.token_uri(id).unwrap(), "ipfs://grove");
    }

    #[test]
    fn test_mint_rejects_unbound_collection() {
        let mut f = setup();
        let mut other = TreeCollection::new(Identity::new());
        let result = f.registry.mint_new(&f.alice, &mut other, 1, "");
        assert!(matches!(result, Err(RegistryError::UnknownBackend { .. })));
        assert_eq!(other.total_minted(), 0);
    }

    #[test]
    fn test_mint_by_zero_caller_rejected() {
        let mut f = setup();
        let result = f.registry.mint_new(&Identity::ZERO, &mut f.nft, 1, "");
        assert_eq!(result, Err(RegistryError::ZeroIdentity));
        assert_eq!(f.nft.total_minted(), 0);
        assert_eq!(f.registry.custodied_count(), 0);
    }

    // ─── Intake tests ───

    #[test]
    fn test_add_existing_asset() {
        let mut f = setup();
        let mut external = TreeCollection::new(Identity::new());
        let id = external.safe_mint(f.alice, "").unwrap();
        external.approve(&f.alice, id, f.registry.address()).unwrap();

        f.registry
            .add_existing_asset(&f.alice, &mut external, id, 1000)
            .unwrap();

        assert!(f.registry.check_owner(&f.alice, external.address(), id));
        assert_eq!(external.owner_of(id).unwrap(), f.registry.address());
    }

    #[test]
    fn test_add_existing_asset_without_approval() {
        let mut f = setup();
        let mut external = TreeCollection::new(Identity::new());
        let id = external.safe_mint(f.alice, "").unwrap();

        let result = f.registry.add_existing_asset(&f.alice, &mut external, id, 1000);
        assert!(matches!(result, Err(RegistryError::NotApproved { .. })));
        assert_eq!(f.registry.custodied_count(), 0);
        assert_eq!(external.owner_of(id).unwrap(), f.alice);
    }

    #[test]
    fn test_add_existing_asset_by_non_holder() {
        let mut f = setup();
        let mut external = TreeCollection::new(Identity::new());
        let id = external.safe_mint(f.alice, "").unwrap();
        external.approve(&f.alice, id, f.registry.address()).unwrap();

        let eve = Identity::new();
        let result = f.registry.add_existing_asset(&eve, &mut external, id, 1000);
        assert!(matches!(result, Err(RegistryError::NotOwner { .. })));
    }

    #[test]
    fn test_add_unminted_asset() {
        let mut f = setup();
        let mut external = TreeCollection::new(Identity::new());
        let result = f
            .registry
            .add_existing_asset(&f.alice, &mut external, AssetId::new(3), 1000);
        assert!(matches!(result, Err(RegistryError::NotOwner { .. })));
        assert_eq!(f.registry.custodied_count(), 0);
    }

    // ─── Approval tests ───

    #[test]
    fn test_approve_sets_and_clears_delegate() {
        let mut f = setup();
        let id = mint(&mut f);
        let backend = f.nft.address();
        let bob = Identity::new();

        f.registry.approve(&f.alice, bob, backend, id).unwrap();
        assert_eq!(f.registry.get_approved(backend, id).unwrap(), Some(bob));

        f.registry
            .approve(&f.alice, Identity::ZERO, backend, id)
            .unwrap();
        assert_eq!(f.registry.get_approved(backend, id).unwrap(), None);
    }

    #[test]
    fn test_approve_by_non_owner() {
        let mut f = setup();
        let id = mint(&mut f);
        let eve = Identity::new();
        let result = f.registry.approve(&eve, eve, f.nft.address(), id);
        assert!(matches!(result, Err(RegistryError::NotOwner { .. })));
    }

    #[test]
    fn test_approve_without_record() {
        let mut f = setup();
        let result = f
            .registry
            .approve(&f.alice, Identity::new(), f.nft.address(), AssetId::new(5));
        assert!(matches!(result, Err(RegistryError::NoRecord { .. })));
    }

    #[test]
    fn test_set_approval_for_all_toggle() {
        let mut f = setup();
        let operator = Identity::new();
        f.registry.set_approval_for_all(&f.alice, operator, true);
        assert!(f.registry.is_approved_for_all(&f.alice, &operator));
        f.registry.set_approval_for_all(&f.alice, operator, false);
        assert!(!f.registry.is_approved_for_all(&f.alice, &operator));
    }

    // ─── Transfer tests ───

    #[test]
    fn test_transfer_clears_delegate() {
        let mut f = setup();
        let id = mint(&mut f);
        let backend = f.nft.address();
        let bob = Identity::new();
        let delegate = Identity::new();

        f.registry.approve(&f.alice, delegate, backend, id).unwrap();
        f.registry.transfer(&f.alice, bob, backend, id).unwrap();

        assert!(f.registry.check_owner(&bob, backend, id));
        assert!(!f.registry.check_owner(&f.alice, backend, id));
        assert_eq!(f.registry.get_approved(backend, id).unwrap(), None);
    }

    #[test]
    fn test_transfer_to_zero_rejected() {
        let mut f = setup();
        let id = mint(&mut f);
        let result = f.registry.transfer(&f.alice, Identity::ZERO, f.nft.address(), id);
        assert_eq!(result, Err(RegistryError::ZeroIdentity));
        assert!(f.registry.check_owner(&f.alice, f.nft.address(), id));
    }

    #[test]
    fn test_transfer_from_owner_mismatch() {
        let mut f = setup();
        let id = mint(&mut f);
        let bob = Identity::new();
        let result = f
            .registry
            .transfer_from(&bob, bob, f.alice, f.nft.address(), id);
        assert!(matches!(result, Err(RegistryError::OwnerMismatch { .. })));
    }

    #[test]
    fn test_transfer_from_by_owner() {
        let mut f = setup();
        let id = mint(&mut f);
        let bob = Identity::new();
        f.registry
            .transfer_from(&f.alice, f.alice, bob, f.nft.address(), id)
            .unwrap();
        assert!(f.registry.check_owner(&bob, f.nft.address(), id));
    }

    #[test]
    fn test_transfer_from_to_zero_rejected() {
        let mut f = setup();
        let id = mint(&mut f);
        let delegate = Identity::new();
        f.registry.approve(&f.alice, delegate, f.nft.address(), id).unwrap();

        let result = f
            .registry
            .transfer_from(&delegate, f.alice, Identity::ZERO, f.nft.address(), id);
        assert_eq!(result, Err(RegistryError::ZeroIdentity));
        assert!(f.registry.check_owner(&f.alice, f.nft.address(), id));
        assert_eq!(f.registry.get_approved(f.nft.address(), id).unwrap(), Some(delegate));
    }

    // ─── Withdraw tests ───

    #[test]
    fn test_withdraw_removes_record() {
        let mut f = setup();
        let id = mint(&mut f);
        let backend = f.nft.address();

        f.registry.withdraw(&f.alice, &mut f.nft, id).unwrap();
        assert_eq!(f.nft.balance_of(&f.alice), 1);
        assert_eq!(f.registry.state(backend, id), CustodyState::NonExistent);
        assert!(matches!(
            f.registry.owner_of(backend, id),
            Err(RegistryError::NoRecord { .. })
        ));
    }

    #[test]
    fn test_withdraw_by_non_owner() {
        let mut f = setup();
        let id = mint(&mut f);
        let eve = Identity::new();
        let result = f.registry.withdraw(&eve, &mut f.nft, id);
        assert!(matches!(result, Err(RegistryError::NotOwner { .. })));
        assert_eq!(f.registry.custodied_count(), 1);
    }

    // ─── Audit tests ───

    #[test]
    fn test_audit_by_auditor() {
        let mut f = setup();
        let id = mint(&mut f);
        let auditor = Identity::new();
        f.auditors.add_auditor(&f.admin, auditor).unwrap();

        let event = f
            .registry
            .audit(&auditor, &f.auditors, f.nft.address(), id, 1200)
            .unwrap();
        assert!(matches!(event, ContractEvent::TreeAudited(_)));

        let record = f.registry.record(f.nft.address(), id).unwrap();
        assert_eq!(record.audited_count, 1200);
        assert_eq!(record.tree_number, 1000);
        assert_eq!(record.owner, f.alice);
    }

    #[test]
    fn test_audit_by_non_auditor() {
        let mut f = setup();
        let id = mint(&mut f);
        let result = f
            .registry
            .audit(&f.alice, &f.auditors, f.nft.address(), id, 1000);
        assert_eq!(result, Err(RegistryError::NotAuditor));
    }

    #[test]
    fn test_audit_with_foreign_allow_list() {
        let mut f = setup();
        let id = mint(&mut f);
        let rogue_admin = Identity::new();
        let mut rogue = AuditorRegistry::new(Identity::new(), rogue_admin);
        rogue.add_auditor(&rogue_admin, rogue_admin).unwrap();

        let result = f
            .registry
            .audit(&rogue_admin, &rogue, f.nft.address(), id, 1);
        assert!(matches!(result, Err(RegistryError::AuditorRegistryMismatch { .. })));
    }

    // ─── Event log ───

    #[test]
    fn test_drain_events() {
        let mut f = setup();
        mint(&mut f);
        f.registry.set_approval_for_all(&f.alice, Identity::new(), true);

        let drained = f.registry.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], ContractEvent::TreeAdded(_)));
        assert!(matches!(drained[1], ContractEvent::ApprovalForAll(_)));
        assert!(f.registry.events().is_empty());
    }

    #[test]
    fn test_assets_of() {
        let mut f = setup();
        let a = mint(&mut f);
        let b = mint(&mut f);
        let bob = Identity::new();
        f.registry.transfer(&f.alice, bob, f.nft.address(), b).unwrap();

        assert_eq!(
            f.registry.assets_of(&f.alice),
            vec![AssetKey::new(f.nft.address(), a)]
        );
        assert_eq!(
            f.registry.assets_of(&bob),
            vec![AssetKey::new(f.nft.address(), b)]
        );
    }
}
