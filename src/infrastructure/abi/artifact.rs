//! BridgeLayer build artifact - loads the ABI and encodes the bridge call

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::{Bytes, U256};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::{Function, JsonAbi};
use anyhow::{bail, Context, Result};

use crate::domain::BridgePlan;
use crate::error::BridgeTestError;

/// Name of the BridgeLayer entry point
pub const BRIDGE_FUNCTION: &str = "bridge";

/// ABI of the BridgeLayer contract as compiled by forge
#[derive(Debug, Clone)]
pub struct BridgeArtifact {
    path: PathBuf,
    abi: JsonAbi,
}

impl BridgeArtifact {
    /// Read an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BridgeTestError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BridgeTestError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|err| BridgeTestError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::parse(path, &content)
    }

    /// Parse artifact JSON: either a forge artifact with an `abi` field or a
    /// bare ABI array
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, BridgeTestError> {
        let path = path.into();
        let invalid = |reason: String| BridgeTestError::InvalidArtifact {
            path: path.clone(),
            reason,
        };

        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|err| invalid(err.to_string()))?;

        let abi_value = if value.is_array() {
            value
        } else if let Some(abi) = value.get("abi") {
            abi.clone()
        } else {
            return Err(invalid("no \"abi\" field".to_string()));
        };

        let abi: JsonAbi =
            serde_json::from_value(abi_value).map_err(|err| invalid(err.to_string()))?;

        Ok(Self { path, abi })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// The artifact's `bridge` function
    pub fn bridge_function(&self) -> Result<&Function> {
        self.abi
            .function(BRIDGE_FUNCTION)
            .and_then(|overloads| overloads.first())
            .with_context(|| {
                format!(
                    "no `{}` function in {}",
                    BRIDGE_FUNCTION,
                    self.path.display()
                )
            })
    }

    /// Encode `bridge(token, amount, dstChainId, recipient, extraData)` calldata
    pub fn encode_bridge(&self, plan: &BridgePlan) -> Result<Bytes> {
        let function = self.bridge_function()?;
        let values = vec![
            DynSolValue::Address(plan.token.address),
            DynSolValue::Uint(plan.amount, 256),
            DynSolValue::Uint(U256::from(plan.dst_chain_id), 256),
            DynSolValue::Address(plan.recipient),
            DynSolValue::Bytes(plan.extra_data.to_vec()),
        ];
        encode_call(function, values)
    }
}

/// Selector followed by ABI-encoded arguments, checked against the
/// function's declared inputs
fn encode_call(function: &Function, values: Vec<DynSolValue>) -> Result<Bytes> {
    if values.len() != function.inputs.len() {
        bail!(
            "Argument count mismatch for {}: expected {} arguments, got {}",
            function.signature(),
            function.inputs.len(),
            values.len()
        );
    }

    for (i, (param, value)) in function.inputs.iter().zip(values.iter()).enumerate() {
        let kind = param.selector_type();
        let ty = kind
            .parse::<DynSolType>()
            .with_context(|| format!("Failed to parse type '{}' for param '{}'", kind, param.name))?;
        if !ty.matches(value) {
            bail!(
                "Argument {} of {} must be {}",
                i + 1,
                function.signature(),
                kind
            );
        }
    }

    let mut calldata = function.selector().to_vec();
    calldata.extend_from_slice(&DynSolValue::Tuple(values).abi_encode_params());
    Ok(calldata.into())
}
