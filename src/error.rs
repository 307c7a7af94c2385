//! Fatal error taxonomy for a bridge test run

use std::path::PathBuf;

use thiserror::Error;

/// Setup errors that abort the run, plus the chain-id mismatch that fails
/// an approve or bridge step.
///
/// Failures of the approval and bridge steps are not errors: they are
/// reported through [`crate::domain::RunOutcome`] and the process still
/// exits cleanly.
#[derive(Debug, Error)]
pub enum BridgeTestError {
    #[error("{name} not found in environment")]
    MissingSetting { name: &'static str },

    #[error("invalid {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("ABI not found at {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("invalid contract artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("connected to chain {actual}, expected chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl BridgeTestError {
    pub(crate) fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::InvalidSetting {
            name,
            reason: reason.to_string(),
        }
    }

    /// Follow-up hint printed after the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingSetting { .. } => Some(
                "Create a .env file in this folder with PRIVATE_KEY, BRIDGE_LAYER_ADDRESS, etc.",
            ),
            Self::ArtifactNotFound { .. } => {
                Some("Make sure you have compiled the smart contracts with \"forge build\"")
            }
            Self::ChainMismatch { .. } => Some("Point RPC_URL at the chain passed via --chain-id"),
            Self::InvalidSetting { .. } | Self::InvalidArtifact { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_message() {
        let err = BridgeTestError::MissingSetting {
            name: "PRIVATE_KEY",
        };
        assert_eq!(err.to_string(), "PRIVATE_KEY not found in environment");
        assert!(err.hint().unwrap().contains("PRIVATE_KEY"));
    }

    #[test]
    fn test_artifact_hint_mentions_forge() {
        let err = BridgeTestError::ArtifactNotFound {
            path: PathBuf::from("out/BridgeLayer.sol/BridgeLayer.json"),
        };
        assert!(err.to_string().contains("out/BridgeLayer.sol/BridgeLayer.json"));
        assert!(err.hint().unwrap().contains("forge build"));
    }
}
