//! Ethereum infrastructure - Alloy provider implementation

mod provider;

pub use provider::{connect, AlloyChain, BridgeChain};
