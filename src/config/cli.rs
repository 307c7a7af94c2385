use std::path::PathBuf;

use clap::Parser;

/// Command line, with the environment (and `.env`) as fallback for every flag
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "bridge-test",
    version,
    about = "Approve a token and call BridgeLayer.bridge against a live node"
)]
pub struct Args {
    /// Token to bridge: MIDRX, MUSDT, MUSDC, a symbol from the token file,
    /// or anything else to use TOKEN_ADDRESS
    #[arg(value_name = "TOKEN")]
    pub token: Option<String>,

    /// HTTP JSON-RPC endpoint
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Hex private key of the signing account
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// BridgeLayer contract address
    #[arg(long, env = "BRIDGE_LAYER_ADDRESS")]
    pub bridge_layer: Option<String>,

    /// Axelar adapter address (informational)
    #[arg(long, env = "AXELAR_ADAPTER_ADDRESS")]
    pub axelar_adapter: Option<String>,

    #[arg(long, env = "MIDRX_ADDRESS")]
    pub midrx_address: Option<String>,

    #[arg(long, env = "MUSDT_ADDRESS")]
    pub musdt_address: Option<String>,

    #[arg(long, env = "MUSDC_ADDRESS")]
    pub musdc_address: Option<String>,

    /// Address used for token symbols that are not otherwise known
    #[arg(long, env = "TOKEN_ADDRESS")]
    pub token_address: Option<String>,

    /// Amount to bridge, in whole tokens [default: 1000]
    #[arg(long)]
    pub amount: Option<String>,

    /// Destination chain id [default: 84532]
    #[arg(long)]
    pub dst_chain_id: Option<u64>,

    /// Native fee attached to the bridge call, in ether [default: 0.01]
    #[arg(long)]
    pub fee: Option<String>,

    /// Recipient on the destination chain [default: the signer]
    #[arg(long)]
    pub recipient: Option<String>,

    /// Chain id the RPC endpoint must report [default: 5003]
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// BridgeLayer build artifact
    #[arg(long, env = "BRIDGE_LAYER_ARTIFACT")]
    pub artifact: Option<PathBuf>,

    /// Receipt polling interval in milliseconds [default: 1000]
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_token_and_flags() {
        let args = Args::try_parse_from([
            "bridge-test",
            "musdc",
            "--amount",
            "5",
            "--dst-chain-id",
            "11155111",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.token.as_deref(), Some("musdc"));
        assert_eq!(args.amount.as_deref(), Some("5"));
        assert_eq!(args.dst_chain_id, Some(11155111));
        assert!(args.verbose);
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
