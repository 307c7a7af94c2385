//! Token selection and unit conversion

use alloy::primitives::{Address, U256};
use alloy_primitives::utils::{self, parse_units, ParseUnits};

use crate::error::BridgeTestError;

/// Token used when no argument is given
pub const DEFAULT_TOKEN: &str = "MIDRX";

/// Decimals assumed for tokens that are not known up front
pub const DEFAULT_DECIMALS: u8 = 18;

/// Built-in test tokens: (symbol, environment variable, decimals)
pub const BUILTIN_TOKENS: [(&str, &str, u8); 3] = [
    ("MIDRX", "MIDRX_ADDRESS", 18),
    ("MUSDT", "MUSDT_ADDRESS", 6),
    ("MUSDC", "MUSDC_ADDRESS", 6),
];

/// The token a run bridges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenChoice {
    /// Upper-cased symbol as selected on the command line
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

/// A token listed in the optional token file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownToken {
    pub symbol: String,
    pub address: String,
    pub decimals: Option<u8>,
}

/// Raw token addresses as they came from the environment
#[derive(Debug, Clone, Default)]
pub struct TokenAddresses {
    pub midrx: Option<String>,
    pub musdt: Option<String>,
    pub musdc: Option<String>,
    /// `TOKEN_ADDRESS`, used for any symbol that is not otherwise known
    pub fallback: Option<String>,
}

impl TokenAddresses {
    fn builtin(&self, symbol: &str) -> Option<Option<&str>> {
        let slot = match symbol {
            "MIDRX" => &self.midrx,
            "MUSDT" => &self.musdt,
            "MUSDC" => &self.musdc,
            _ => return None,
        };
        Some(slot.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// Normalize the command-line token argument
pub fn token_symbol(arg: Option<&str>) -> String {
    arg.map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_TOKEN.to_string())
}

/// Resolve the token for `symbol`.
///
/// Built-in symbols take their address from their own variable only. Other
/// symbols are looked up in `known`, then fall back to `TOKEN_ADDRESS` with
/// 18 decimals. `Ok(None)` means no address is configured for the selection.
pub fn select_token(
    symbol: &str,
    addresses: &TokenAddresses,
    known: &[KnownToken],
) -> Result<Option<TokenChoice>, BridgeTestError> {
    let (raw, decimals) = if let Some(raw) = addresses.builtin(symbol) {
        let decimals = BUILTIN_TOKENS
            .iter()
            .find(|(name, _, _)| *name == symbol)
            .map(|(_, _, decimals)| *decimals)
            .unwrap_or(DEFAULT_DECIMALS);
        (raw, decimals)
    } else if let Some(token) = known
        .iter()
        .find(|token| token.symbol.trim().eq_ignore_ascii_case(symbol))
    {
        (
            Some(token.address.as_str()),
            token.decimals.unwrap_or(DEFAULT_DECIMALS),
        )
    } else {
        (
            addresses
                .fallback
                .as_deref()
                .filter(|s| !s.trim().is_empty()),
            DEFAULT_DECIMALS,
        )
    };

    let Some(raw) = raw else {
        return Ok(None);
    };

    let address = raw
        .trim()
        .parse::<Address>()
        .map_err(|err| BridgeTestError::invalid("token address", format!("{raw}: {err}")))?;

    Ok(Some(TokenChoice {
        symbol: symbol.to_string(),
        address,
        decimals,
    }))
}

/// Convert a non-negative decimal amount in whole tokens into base units
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, BridgeTestError> {
    match parse_units(amount.trim(), decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(BridgeTestError::invalid(
            "amount",
            format!("{amount}: must not be negative"),
        )),
        Err(err) => Err(BridgeTestError::invalid("amount", format!("{amount}: {err}"))),
    }
}

/// Format base units with decimals, trimming trailing zeros
pub fn format_units(value: U256, decimals: u8) -> String {
    match utils::format_units(value, decimals) {
        Ok(formatted) if formatted.contains('.') => formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        Ok(formatted) => formatted,
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIDRX: &str = "0x1111111111111111111111111111111111111111";
    const MUSDT: &str = "0x2222222222222222222222222222222222222222";
    const FALLBACK: &str = "0x3333333333333333333333333333333333333333";

    fn addresses() -> TokenAddresses {
        TokenAddresses {
            midrx: Some(MIDRX.to_string()),
            musdt: Some(MUSDT.to_string()),
            musdc: None,
            fallback: Some(FALLBACK.to_string()),
        }
    }

    #[test]
    fn test_token_symbol_defaults_and_uppercases() {
        assert_eq!(token_symbol(None), "MIDRX");
        assert_eq!(token_symbol(Some("  ")), "MIDRX");
        assert_eq!(token_symbol(Some("musdt")), "MUSDT");
    }

    #[test]
    fn test_builtin_tokens_use_their_decimals() {
        let midrx = select_token("MIDRX", &addresses(), &[]).unwrap().unwrap();
        assert_eq!(midrx.address, MIDRX.parse::<Address>().unwrap());
        assert_eq!(midrx.decimals, 18);

        let musdt = select_token("MUSDT", &addresses(), &[]).unwrap().unwrap();
        assert_eq!(musdt.decimals, 6);
    }

    #[test]
    fn test_builtin_without_address_does_not_fall_back() {
        assert_eq!(select_token("MUSDC", &addresses(), &[]).unwrap(), None);
    }

    #[test]
    fn test_unknown_symbol_uses_token_address() {
        let token = select_token("FOO", &addresses(), &[]).unwrap().unwrap();
        assert_eq!(token.address, FALLBACK.parse::<Address>().unwrap());
        assert_eq!(token.decimals, 18);
        assert_eq!(token.symbol, "FOO");

        let none = TokenAddresses::default();
        assert_eq!(select_token("FOO", &none, &[]).unwrap(), None);
    }

    #[test]
    fn test_known_token_takes_precedence_over_fallback() {
        let known = vec![KnownToken {
            symbol: "wbtc".to_string(),
            address: "0x4444444444444444444444444444444444444444".to_string(),
            decimals: Some(8),
        }];
        let token = select_token("WBTC", &addresses(), &known).unwrap().unwrap();
        assert_eq!(token.decimals, 8);
        assert_eq!(
            token.address,
            "0x4444444444444444444444444444444444444444"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn test_invalid_address_is_an_error() {
        let addresses = TokenAddresses {
            midrx: Some("0xnot-an-address".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            select_token("MIDRX", &addresses, &[]),
            Err(BridgeTestError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(
            to_base_units("1000", 18).unwrap(),
            U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64))
        );
        assert_eq!(to_base_units("1000", 6).unwrap(), U256::from(1_000_000_000u64));
        assert_eq!(to_base_units("0.5", 6).unwrap(), U256::from(500_000u64));
        assert!(to_base_units("abc", 6).is_err());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        assert!(matches!(
            to_base_units("-5", 6),
            Err(BridgeTestError::InvalidSetting { name: "amount", .. })
        ));
        assert!(matches!(
            to_base_units(" -0.5 ", 18),
            Err(BridgeTestError::InvalidSetting { name: "amount", .. })
        ));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(1_000_000_000u64), 6), "1000");
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
        assert_eq!(format_units(U256::from(1000u64), 2), "10");
        assert_eq!(format_units(U256::ZERO, 18), "0");
    }
}
