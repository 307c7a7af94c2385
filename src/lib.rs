//! End-to-end manual test for a deployed BridgeLayer contract.
//!
//! Checks the ERC-20 allowance granted to BridgeLayer, approves when it is
//! short, then calls `bridge` and waits for the receipt.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use app::{launch, Runner};
pub use config::{Args, Settings};
pub use domain::{BridgePlan, RunOutcome, TokenChoice, TxOutcome, TxStatus};
pub use error::BridgeTestError;
pub use infrastructure::{BridgeArtifact, BridgeChain};
