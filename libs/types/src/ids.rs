//! Identifier types for registry participants and custodied assets
//!
//! Every participant (holder, auditor, registry, collection, allow-list) is
//! addressed by an `Identity`. Assets are addressed by the `AssetId` their
//! collection allocated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque participant identity
///
/// Fresh identities use UUID v7. The nil UUID is the null identity and is
/// never a valid owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Uuid);

impl Identity {
    /// The null identity
    pub const ZERO: Identity = Identity(Uuid::nil());

    /// Create a new identity with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// True for the null identity
    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Asset identifier allocated by a collection
///
/// Collections hand these out sequentially; the same number may exist in
/// several collections, so registry lookups always pair it with the
/// collection identity (see `AssetKey`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(u64);

impl AssetId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
