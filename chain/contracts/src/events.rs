//! Contract events
//!
//! Events are immutable records emitted by contract operations. Each
//! component keeps its own append-only log; all of them share the
//! `ContractEvent` wrapper so consumers can handle them uniformly.

use custody_types::ids::{AssetId, Identity};
use serde::{Deserialize, Serialize};

/// Externally issued asset taken into custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAdded {
    pub backend: Identity,
    pub asset_id: AssetId,
    pub owner: Identity,
    pub tree_number: u64,
}

/// Asset minted by the registry directly into custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeAdded {
    pub backend: Identity,
    pub asset_id: AssetId,
    pub owner: Identity,
    pub tree_number: u64,
}

/// Single-asset delegate set by the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub backend: Identity,
    pub asset_id: AssetId,
    pub owner: Identity,
    pub delegate: Identity,
}

/// Standing operator delegation granted or revoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalForAll {
    pub owner: Identity,
    pub operator: Identity,
    pub enabled: bool,
}

/// Beneficial ownership moved inside the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    pub backend: Identity,
    pub asset_id: AssetId,
    pub from: Identity,
    pub to: Identity,
    pub operator: Identity,
}

/// Tree count confirmed by an auditor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeAudited {
    pub backend: Identity,
    pub asset_id: AssetId,
    pub auditor: Identity,
    pub tree_number: u64,
}

/// Asset released from custody to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWithdrawn {
    pub backend: Identity,
    pub asset_id: AssetId,
    pub owner: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditorAdded {
    pub auditor: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditorRemoved {
    pub auditor: Identity,
}

/// Collection-level holder change. `from` is zero for mints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Identity,
    pub to: Identity,
    pub asset_id: AssetId,
}

/// Collection-level single-token approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenApproval {
    pub owner: Identity,
    pub spender: Identity,
    pub asset_id: AssetId,
}

/// Collection-level operator approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenApprovalForAll {
    pub owner: Identity,
    pub operator: Identity,
    pub enabled: bool,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    AssetAdded(AssetAdded),
    TreeAdded(TreeAdded),
    Approval(Approval),
    ApprovalForAll(ApprovalForAll),
    OwnershipTransferred(OwnershipTransferred),
    TreeAudited(TreeAudited),
    AssetWithdrawn(AssetWithdrawn),
    AuditorAdded(AuditorAdded),
    AuditorRemoved(AuditorRemoved),
    Transfer(Transfer),
    TokenApproval(TokenApproval),
    TokenApprovalForAll(TokenApprovalForAll),
}

impl ContractEvent {
    /// Asset the event refers to, if any.
    pub fn asset_id(&self) -> Option<AssetId> {
        match self {
            ContractEvent::AssetAdded(e) => Some(e.asset_id),
            ContractEvent::TreeAdded(e) => Some(e.asset_id),
            ContractEvent::Approval(e) => Some(e.asset_id),
            ContractEvent::OwnershipTransferred(e) => Some(e.asset_id),
            ContractEvent::TreeAudited(e) => Some(e.asset_id),
            ContractEvent::AssetWithdrawn(e) => Some(e.asset_id),
            ContractEvent::Transfer(e) => Some(e.asset_id),
            ContractEvent::TokenApproval(e) => Some(e.asset_id),
            ContractEvent::ApprovalForAll(_)
            | ContractEvent::AuditorAdded(_)
            | ContractEvent::AuditorRemoved(_)
            | ContractEvent::TokenApprovalForAll(_) => None,
        }
    }

    /// Event name as it appears in logs
    pub fn name(&self) -> &'static str {
        match self {
            ContractEvent::AssetAdded(_) => "AssetAdded",
            ContractEvent::TreeAdded(_) => "TreeAdded",
            ContractEvent::Approval(_) => "Approval",
            ContractEvent::ApprovalForAll(_) => "ApprovalForAll",
            ContractEvent::OwnershipTransferred(_) => "OwnershipTransferred",
            ContractEvent::TreeAudited(_) => "TreeAudited",
            ContractEvent::AssetWithdrawn(_) => "AssetWithdrawn",
            ContractEvent::AuditorAdded(_) => "AuditorAdded",
            ContractEvent::AuditorRemoved(_) => "AuditorRemoved",
            ContractEvent::Transfer(_) => "Transfer",
            ContractEvent::TokenApproval(_) => "TokenApproval",
            ContractEvent::TokenApprovalForAll(_) => "TokenApprovalForAll",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_added_serialization() {
        let event = TreeAdded {
            backend: Identity::new(),
            asset_id: AssetId::new(0),
            owner: Identity::new(),
            tree_number: 1000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: TreeAdded = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_contract_event_asset_id() {
        let event = ContractEvent::TreeAudited(TreeAudited {
            backend: Identity::new(),
            asset_id: AssetId::new(9),
            auditor: Identity::new(),
            tree_number: 1200,
        });
        assert_eq!(event.asset_id(), Some(AssetId::new(9)));
        assert_eq!(event.name(), "TreeAudited");

        let event = ContractEvent::AuditorAdded(AuditorAdded {
            auditor: Identity::new(),
        });
        assert_eq!(event.asset_id(), None);
    }

    #[test]
    fn test_contract_event_enum_serialization() {
        let event = ContractEvent::ApprovalForAll(ApprovalForAll {
            owner: Identity::new(),
            operator: Identity::new(),
            enabled: true,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with("{\"ApprovalForAll\""));
        let deser: ContractEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }
}
