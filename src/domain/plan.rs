//! Bridge request and run results

use std::fmt;

use alloy::primitives::{Address, Bytes, B256, U256};

use super::token::{to_base_units, TokenChoice};
use crate::error::BridgeTestError;

/// Everything the bridge call carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgePlan {
    pub token: TokenChoice,
    /// Amount in token base units
    pub amount: U256,
    pub dst_chain_id: u64,
    pub recipient: Address,
    pub extra_data: Bytes,
    /// Native value attached to the bridge transaction
    pub fee: U256,
}

impl BridgePlan {
    /// Build a plan bridging `whole_amount` tokens, with empty extra data
    pub fn new(
        token: TokenChoice,
        whole_amount: &str,
        dst_chain_id: u64,
        recipient: Address,
        fee: U256,
    ) -> Result<Self, BridgeTestError> {
        let amount = to_base_units(whole_amount, token.decimals)?;
        Ok(Self {
            token,
            amount,
            dst_chain_id,
            recipient,
            extra_data: Bytes::new(),
            fee,
        })
    }
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Revert,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TxStatus::Success => "success",
            TxStatus::Revert => "reverted",
        };
        f.write_str(label)
    }
}

/// A mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub hash: B256,
    pub block_number: Option<u64>,
    pub status: TxStatus,
}

/// How a run ended. None of these are process failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No address configured for the selected token
    NoToken { symbol: String },
    /// Approval could not be submitted or confirmed; bridge was skipped
    ApprovalFailed { reason: String },
    /// Bridge transaction could not be submitted or confirmed
    BridgeFailed { reason: String },
    /// Bridge transaction mined (it may still have reverted)
    Bridged(TxOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_uses_token_decimals() {
        let token = TokenChoice {
            symbol: "MUSDT".to_string(),
            address: Address::repeat_byte(0x22),
            decimals: 6,
        };
        let plan = BridgePlan::new(token, "1000", 84532, Address::repeat_byte(0xaa), U256::ZERO)
            .unwrap();
        assert_eq!(plan.amount, U256::from(1_000_000_000u64));
        assert!(plan.extra_data.is_empty());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TxStatus::Success.to_string(), "success");
        assert_eq!(TxStatus::Revert.to_string(), "reverted");
    }
}
