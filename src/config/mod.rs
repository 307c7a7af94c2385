mod cli;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::utils::parse_ether;
use serde::Deserialize;

use crate::domain::{select_token, token_symbol, KnownToken, TokenAddresses, TokenChoice};
use crate::error::BridgeTestError;

pub use cli::Args;

pub const DEFAULT_RPC_URL: &str = "https://rpc.sepolia.mantle.xyz";
/// Mantle Sepolia
pub const DEFAULT_CHAIN_ID: u64 = 5003;
/// Base Sepolia
pub const DEFAULT_DST_CHAIN_ID: u64 = 84532;
pub const DEFAULT_AMOUNT: &str = "1000";
pub const DEFAULT_FEE: &str = "0.01";
pub const DEFAULT_ARTIFACT: &str = "../out/BridgeLayer.sol/BridgeLayer.json";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSpec {
    pub address: String,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
}

/// Optional token file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tokens: Vec<TokenSpec>,
}

impl Config {
    /// Tokens that carry a usable symbol
    pub fn known_tokens(&self) -> Vec<KnownToken> {
        self.tokens
            .iter()
            .filter_map(|spec| {
                let symbol = spec.symbol.as_deref()?.trim();
                if symbol.is_empty() {
                    return None;
                }
                Some(KnownToken {
                    symbol: symbol.to_string(),
                    address: spec.address.trim().to_string(),
                    decimals: spec.decimals,
                })
            })
            .collect()
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Ignoring token file {}: {}", path.display(), err);
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("BRIDGE_TEST_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("bridge-test").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("bridge-test").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "bridge-test", "bridge-test")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Fully resolved settings for one run
#[derive(Clone)]
pub struct Settings {
    pub rpc_url: String,
    pub signer: PrivateKeySigner,
    pub bridge_layer: Address,
    pub axelar_adapter: Option<Address>,
    /// Upper-cased token selection
    pub token_symbol: String,
    /// `None` when no address is configured for `token_symbol`
    pub token: Option<TokenChoice>,
    /// Whole tokens to bridge
    pub amount: String,
    pub dst_chain_id: u64,
    /// Native fee in wei
    pub fee: U256,
    pub recipient: Option<Address>,
    pub chain_id: u64,
    pub artifact: PathBuf,
    pub poll_interval: Duration,
}

impl Settings {
    /// Validate arguments into settings. Touches neither the network nor the
    /// filesystem.
    pub fn resolve(args: Args, known: &[KnownToken]) -> Result<Self, BridgeTestError> {
        let private_key = required(args.private_key, "PRIVATE_KEY")?;
        let bridge_layer = required(args.bridge_layer, "BRIDGE_LAYER_ADDRESS")?;

        let signer = private_key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|err| BridgeTestError::invalid("PRIVATE_KEY", err))?;
        let bridge_layer = parse_address("BRIDGE_LAYER_ADDRESS", &bridge_layer)?;
        let axelar_adapter = non_empty(args.axelar_adapter)
            .map(|raw| parse_address("AXELAR_ADAPTER_ADDRESS", &raw))
            .transpose()?;
        let recipient = non_empty(args.recipient)
            .map(|raw| parse_address("recipient", &raw))
            .transpose()?;

        let fee_raw = non_empty(args.fee).unwrap_or_else(|| DEFAULT_FEE.to_string());
        let fee = parse_ether(fee_raw.trim())
            .map_err(|err| BridgeTestError::invalid("fee", format!("{fee_raw}: {err}")))?;

        let token_symbol = token_symbol(args.token.as_deref());
        let addresses = TokenAddresses {
            midrx: args.midrx_address,
            musdt: args.musdt_address,
            musdc: args.musdc_address,
            fallback: args.token_address,
        };
        let token = select_token(&token_symbol, &addresses, known)?;

        let poll_interval_ms = args.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        if poll_interval_ms == 0 {
            return Err(BridgeTestError::invalid(
                "poll interval",
                "must be at least 1 millisecond",
            ));
        }

        Ok(Self {
            rpc_url: non_empty(args.rpc_url).unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            signer,
            bridge_layer,
            axelar_adapter,
            token_symbol,
            token,
            amount: non_empty(args.amount).unwrap_or_else(|| DEFAULT_AMOUNT.to_string()),
            dst_chain_id: args.dst_chain_id.unwrap_or(DEFAULT_DST_CHAIN_ID),
            fee,
            recipient,
            chain_id: args.chain_id.unwrap_or(DEFAULT_CHAIN_ID),
            artifact: args
                .artifact
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT)),
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn required(value: Option<String>, name: &'static str) -> Result<String, BridgeTestError> {
    non_empty(value).ok_or(BridgeTestError::MissingSetting { name })
}

fn parse_address(name: &'static str, raw: &str) -> Result<Address, BridgeTestError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|err| BridgeTestError::invalid(name, format!("{raw}: {err}")))
}
