//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Alloy-based signing provider behind the `BridgeChain` trait
//! - Contract artifact loading and calldata encoding
//! - Logging setup

pub mod abi;
pub mod ethereum;
pub mod logging;

pub use abi::BridgeArtifact;
pub use ethereum::{connect, AlloyChain, BridgeChain};
