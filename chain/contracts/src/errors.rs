//! Contract-specific error types
//!
//! Error taxonomy for the auditor allow-list, asset collections, the custody
//! registry and its configuration.

use thiserror::Error;

/// Auditor allow-list errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditorError {
    #[error("Unauthorized: caller is not admin")]
    Unauthorized,
}

/// Errors raised by an asset collection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Asset does not exist: {asset}")]
    NonexistentAsset { asset: String },

    #[error("Transfer from incorrect owner: {from}")]
    NotOwner { from: String },

    #[error("Caller is not token owner or approved: {caller}")]
    NotAuthorized { caller: String },

    #[error("Zero identity is not a valid holder")]
    ZeroIdentity,

    #[error("Approval to current owner")]
    SelfApproval,

    #[error("Asset id space exhausted")]
    IdsExhausted,
}

/// Custody registry errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("You are not an auditor")]
    NotAuditor,

    #[error("Not the owner: {caller}")]
    NotOwner { caller: String },

    #[error("Owner mismatch: stated {stated}, recorded {recorded}")]
    OwnerMismatch { stated: String, recorded: String },

    #[error("Caller is neither owner nor approved: {caller}")]
    NotOwnerNorApproved { caller: String },

    #[error("Registry is not approved to take custody of {asset}")]
    NotApproved { asset: String },

    #[error("No custody record for {asset}")]
    NoRecord { asset: String },

    #[error("Asset already in custody: {asset}")]
    AlreadyCustodied { asset: String },

    #[error("Zero identity is not a valid owner")]
    ZeroIdentity,

    #[error("Backend mint failed: {reason}")]
    BackendMintFailed { reason: String },

    #[error("Backend transfer failed: {reason}")]
    BackendTransferFailed { reason: String },

    #[error("Unknown minting backend: {backend}")]
    UnknownBackend { backend: String },

    #[error("Auditor registry mismatch: {registry}")]
    AuditorRegistryMismatch { registry: String },
}

/// Registry configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid registry config: {0}")]
    Parse(String),

    #[error("Config field `{field}` must not be the zero identity")]
    ZeroIdentity { field: &'static str },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
