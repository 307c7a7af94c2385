//! Domain models for a bridge test run
//!
//! Token selection, the bridge request, and the shapes results come back in.
//! Nothing here talks to the network.

mod plan;
mod token;

pub use plan::{BridgePlan, RunOutcome, TxOutcome, TxStatus};
pub use token::{
    format_units, select_token, to_base_units, token_symbol, KnownToken, TokenAddresses,
    TokenChoice, BUILTIN_TOKENS, DEFAULT_DECIMALS, DEFAULT_TOKEN,
};
