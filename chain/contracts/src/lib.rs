//! Contract Logic for Tree Custody & Audit
//!
//! This crate implements the contract layer of the tree registry: custody of
//! collectible tree assets, a delegated-transfer approval layer on top of the
//! custody ledger, and an auditor allow-list gating audits.
//!
//! # Modules
//! - `events`: Contract events emitted by every component
//! - `errors`: Contract-specific error types
//! - `security`: Fixed-admin access control
//! - `config`: Registry construction-time configuration
//! - `auditor`: Admin-governed auditor allow-list
//! - `backend`: Asset collection capability consumed by the registry
//! - `collection`: In-memory tree collection implementing that capability
//! - `registry`: Custody ledger, approvals, transfers, withdrawal, audit
//!
//! # Version
//! v0.1.0 — initial implementation

pub mod errors;
pub mod events;
pub mod security;
pub mod config;
pub mod auditor;
pub mod backend;
pub mod collection;
pub mod registry;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
