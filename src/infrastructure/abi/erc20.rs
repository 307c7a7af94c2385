//! Minimal ERC-20 interface used by the run

use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use anyhow::{Context, Result};

sol! {
    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

/// Calldata for `allowance(owner, spender)`
pub fn encode_allowance(owner: Address, spender: Address) -> Bytes {
    IERC20::allowanceCall { owner, spender }.abi_encode().into()
}

/// Decode the `allowance` return value
pub fn decode_allowance(data: &[u8]) -> Result<U256> {
    IERC20::allowanceCall::abi_decode_returns(data).context("Failed to decode allowance")
}

/// Calldata for `approve(spender, amount)`
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        // approve(address,uint256) -> 0x095ea7b3
        let data = encode_approve(Address::ZERO, U256::ZERO);
        assert_eq!(&data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);

        // allowance(address,address) -> 0xdd62ed3e
        let data = encode_allowance(Address::ZERO, Address::ZERO);
        assert_eq!(&data[..4], &[0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(data.len(), 4 + 64);
    }

    #[test]
    fn test_decode_allowance() {
        let mut word = [0u8; 32];
        word[31] = 0x2a;
        assert_eq!(decode_allowance(&word).unwrap(), U256::from(42u64));
        assert!(decode_allowance(&[0u8; 4]).is_err());
    }
}
