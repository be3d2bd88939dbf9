//! Shared security primitives for contract modules
//!
//! Provides the fixed-admin check used by the auditor allow-list.

use custody_types::ids::Identity;

/// Single, immutable administrator.
///
/// Set once at construction and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminControl {
    admin: Identity,
}

impl AdminControl {
    pub fn new(admin: Identity) -> Self {
        Self { admin }
    }

    /// Check if a caller is admin.
    pub fn is_admin(&self, caller: &Identity) -> bool {
        self.admin == *caller
    }

    /// Get the admin identity.
    pub fn admin(&self) -> Identity {
        self.admin
    }
}
