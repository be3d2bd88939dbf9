//! Auditor allow-list
//!
//! A standalone set of identities permitted to audit custodied trees. The
//! deploying identity is the only admin and the only one who may change
//! membership; the admin is not implicitly an auditor.

use std::collections::HashSet;

use custody_types::ids::Identity;
use tracing::{debug, info, warn};

use crate::errors::AuditorError;
use crate::events::{AuditorAdded, AuditorRemoved, ContractEvent};
use crate::security::AdminControl;

/// Read-only auditor capability consumed by the registry.
pub trait AuditorGate {
    /// Identity the gate is deployed under.
    fn address(&self) -> Identity;

    /// Current membership, evaluated at call time.
    fn is_auditor(&self, identity: &Identity) -> bool;
}

/// Admin-governed set of auditors.
#[derive(Debug)]
pub struct AuditorRegistry {
    address: Identity,
    access_control: AdminControl,
    auditors: HashSet<Identity>,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl AuditorRegistry {
    /// Deploy a new allow-list at `address`, administered by `admin`.
    pub fn new(address: Identity, admin: Identity) -> Self {
        info!(registry = %address, admin = %admin, "Auditor registry deployed");
        Self {
            address,
            access_control: AdminControl::new(admin),
            auditors: HashSet::new(),
            events: Vec::new(),
        }
    }

    /// Add an auditor. Admin-only; adding a current member is a no-op.
    pub fn add_auditor(&mut self, caller: &Identity, auditor: Identity) -> Result<(), AuditorError> {
        self.check_admin(caller)?;

        if !self.auditors.insert(auditor) {
            debug!(auditor = %auditor, "Auditor already present");
            return Ok(());
        }

        info!(auditor = %auditor, "Auditor added");
        self.events
            .push(ContractEvent::AuditorAdded(AuditorAdded { auditor }));
        Ok(())
    }

    /// Remove an auditor. Admin-only; removing a non-member is a no-op.
    pub fn remove_auditor(&mut self, caller: &Identity, auditor: &Identity) -> Result<(), AuditorError> {
        self.check_admin(caller)?;

        if !self.auditors.remove(auditor) {
            debug!(auditor = %auditor, "Auditor not present");
            return Ok(());
        }

        info!(auditor = %auditor, "Auditor removed");
        self.events
            .push(ContractEvent::AuditorRemoved(AuditorRemoved { auditor: *auditor }));
        Ok(())
    }

    pub fn is_auditor(&self, identity: &Identity) -> bool {
        self.auditors.contains(identity)
    }

    pub fn admin(&self) -> Identity {
        self.access_control.admin()
    }

    pub fn address(&self) -> Identity {
        self.address
    }

    pub fn auditor_count(&self) -> usize {
        self.auditors.len()
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    fn check_admin(&self, caller: &Identity) -> Result<(), AuditorError> {
        if !self.access_control.is_admin(caller) {
            warn!(caller = %caller, "Rejected allow-list change from non-admin");
            return Err(AuditorError::Unauthorized);
        }
        Ok(())
    }
}

impl AuditorGate for AuditorRegistry {
    fn address(&self) -> Identity {
        self.address
    }

    fn is_auditor(&self, identity: &Identity) -> bool {
        AuditorRegistry::is_auditor(self, identity)
    }
}
