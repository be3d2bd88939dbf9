//! Types library for the tree custody registry
//!
//! Shared definitions used by the registry contracts and anything that
//! inspects their state.
//!
//! # Modules
//! - `ids`: Participant identities and asset identifiers
//! - `custody`: Ledger keys, custody records and lifecycle states

pub mod ids;
pub mod custody;

