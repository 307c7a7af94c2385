//! ABI infrastructure - contract artifact loading and calldata encoding

mod artifact;
pub mod erc20;

pub use artifact::{BridgeArtifact, BRIDGE_FUNCTION};
