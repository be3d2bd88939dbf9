//! Registry construction-time configuration
//!
//! Binds a registry to its own identity, the collection it mints into and
//! the auditor allow-list it consults. Values are fixed once the registry is
//! constructed.

use custody_types::ids::Identity;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Identity the registry holds custodied assets under
    pub address: Identity,
    /// Collection `mint_new` mints into
    pub minting_backend: Identity,
    /// Allow-list consulted by `audit`
    pub auditor_registry: Identity,
}

impl RegistryConfig {
    pub fn new(address: Identity, minting_backend: Identity, auditor_registry: Identity) -> Self {
        Self {
            address,
            minting_backend,
            auditor_registry,
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject null identities in any field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("address", self.address),
            ("minting_backend", self.minting_backend),
            ("auditor_registry", self.auditor_registry),
        ];
        for (field, identity) in fields {
            if identity.is_zero() {
                return Err(ConfigError::ZeroIdentity { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegistryConfig {
        RegistryConfig::new(Identity::new(), Identity::new(), Identity::new())
    }

    #[test]
    fn test_json_round_trip() {
        let config = sample();
        let json = config.to_json().unwrap();
        assert_eq!(RegistryConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_literal() {
        let json = r#"{
            "address": "0190c2a4-5d3e-7c11-8a2b-3f4e5d6c7b8a",
            "minting_backend": "0190c2a4-5d3e-7c11-8a2b-3f4e5d6c7b8b",
            "auditor_registry": "0190c2a4-5d3e-7c11-8a2b-3f4e5d6c7b8c"
        }"#;
        let config = RegistryConfig::from_json(json).unwrap();
        assert_eq!(
            config.minting_backend.to_string(),
            "0190c2a4-5d3e-7c11-8a2b-3f4e5d6c7b8b"
        );
    }

    #[test]
    fn test_zero_identity_rejected() {
        let mut config = sample();
        config.auditor_registry = Identity::ZERO;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroIdentity {
                field: "auditor_registry"
            })
        );
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = RegistryConfig::from_json(r#"{"address": "0190c2a4-5d3e-7c11-8a2b-3f4e5d6c7b8a"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
