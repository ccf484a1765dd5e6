//!
//! The compiled contract artifacts.
//!

pub mod error;
pub mod hardhat;
pub mod truffle;
pub mod zero_ex;

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::abi::Entry;

use self::error::Error;
use self::hardhat::HardhatArtifacts;
use self::truffle::TruffleArtifacts;
use self::zero_ex::ZeroExArtifacts;

///
/// The pre-existing on-chain deployment, e.g. made by a migration script.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployed {
    /// The contract address.
    pub address: web3::types::Address,
    /// The deployment transaction hash.
    pub transaction_hash: web3::types::H256,
}

///
/// The compiler settings the artifact was built with.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolcInfo {
    /// The compiler version.
    pub version: String,
    /// Whether the optimizer was enabled.
    pub optimizer: bool,
    /// The optimizer runs.
    pub runs: u64,
}

///
/// The build-system agnostic contract artifact.
///
#[derive(Debug, Clone, Default)]
pub struct ContractArtifact {
    /// The contract ABI.
    pub abi: Vec<Entry>,
    /// The `0x`-prefixed creation bytecode, which may carry library placeholders.
    pub bytecode: String,
    /// The `0x`-prefixed runtime bytecode, which may carry library placeholders.
    pub deployed_bytecode: String,
    /// The pre-existing deployment on the current network.
    pub deployed: Option<Deployed>,
    /// The compiler settings.
    pub solc: Option<SolcInfo>,
}

impl ContractArtifact {
    ///
    /// Whether the contract is an interface or an abstract contract.
    ///
    pub fn is_interface(&self) -> bool {
        crate::utils::hex_normalized(self.bytecode.as_str()).is_empty()
    }
}

///
/// The contract artifact loader.
///
pub trait ArtifactSource {
    ///
    /// Loads the artifact of the contract.
    ///
    fn load(&self, name: &str) -> Result<ContractArtifact, Error>;
}

impl<F> ArtifactSource for F
where
    F: Fn(&str) -> Result<ContractArtifact, Error>,
{
    fn load(&self, name: &str) -> Result<ContractArtifact, Error> {
        self(name)
    }
}

///
/// The supported artifact formats.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ArtifactType {
    /// Truffle v5 and ethPM artifacts.
    #[default]
    Truffle,
    /// Hardhat and Buidler artifacts.
    Hardhat,
    /// 0x Project `sol-compiler` v2 artifacts.
    ZeroEx,
}

impl ArtifactType {
    ///
    /// Creates the artifact loader over the directory.
    ///
    /// The network identifier selects the pre-existing deployments of Truffle artifacts.
    ///
    pub fn source(self, directory: PathBuf, network_id: String) -> Box<dyn ArtifactSource> {
        match self {
            Self::Truffle => Box::new(TruffleArtifacts::new(directory, network_id)),
            Self::Hardhat => Box::new(HardhatArtifacts::new(directory)),
            Self::ZeroEx => Box::new(ZeroExArtifacts::new(directory)),
        }
    }

    ///
    /// Returns the artifact directory the build system writes to by default.
    ///
    pub fn default_directory(self) -> PathBuf {
        match self {
            Self::Truffle => PathBuf::from("build/contracts"),
            Self::Hardhat | Self::ZeroEx => PathBuf::from("artifacts"),
        }
    }
}

impl FromStr for ArtifactType {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "truffle-v5" | "truffle" | "ethpm" => Ok(Self::Truffle),
            "hardhat-v2" | "hardhat" | "buidler-v1" => Ok(Self::Hardhat),
            "0xProject-v2" => Ok(Self::ZeroEx),
            string => anyhow::bail!(
                "Unknown artifact type `{string}`. Supported types: truffle-v5, ethpm, hardhat-v2, buidler-v1, 0xProject-v2"
            ),
        }
    }
}

impl TryFrom<String> for ArtifactType {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truffle => write!(f, "truffle-v5"),
            Self::Hardhat => write!(f, "hardhat-v2"),
            Self::ZeroEx => write!(f, "0xProject-v2"),
        }
    }
}

///
/// Brings the artifact bytecode to the `0x`-prefixed form.
///
/// Missing or empty bytecode becomes `0x`, the interface marker.
///
pub fn normalize_bytecode(name: &str, bytecode: Option<&str>) -> Result<String, Error> {
    let bytecode = match bytecode {
        Some(bytecode) => bytecode.trim(),
        None => return Ok("0x".to_owned()),
    };
    let digits = bytecode
        .strip_prefix("0x")
        .or_else(|| bytecode.strip_prefix("0X"))
        .unwrap_or(bytecode);

    if let Some(character) = digits
        .chars()
        .find(|character| !(character.is_ascii_alphanumeric() || matches!(character, '_' | '$')))
    {
        return Err(Error::InvalidBytecode {
            name: name.to_owned(),
            reason: format!("unexpected character `{character}`"),
        });
    }

    Ok(format!("0x{digits}"))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::ArtifactType;
    use super::ContractArtifact;

    #[test]
    fn normalize_bytecode() {
        assert_eq!(
            super::normalize_bytecode("A", Some("6080")).expect("Always valid"),
            "0x6080"
        );
        assert_eq!(
            super::normalize_bytecode("A", Some("0x6080")).expect("Always valid"),
            "0x6080"
        );
        assert_eq!(
            super::normalize_bytecode("A", Some("")).expect("Always valid"),
            "0x"
        );
        assert_eq!(
            super::normalize_bytecode("A", None).expect("Always valid"),
            "0x"
        );
        assert_eq!(
            super::normalize_bytecode("A", Some("0x73__$1234$__")).expect("Always valid"),
            "0x73__$1234$__"
        );
        assert!(super::normalize_bytecode("A", Some("0x60 80")).is_err());
    }

    #[test]
    fn artifact_type_aliases() {
        assert_eq!(
            ArtifactType::from_str("ethpm").expect("Always valid"),
            ArtifactType::Truffle
        );
        assert_eq!(
            ArtifactType::from_str("buidler-v1").expect("Always valid"),
            ArtifactType::Hardhat
        );
        assert_eq!(
            ArtifactType::from_str("0xProject-v2").expect("Always valid"),
            ArtifactType::ZeroEx
        );
        assert_eq!(ArtifactType::ZeroEx.to_string(), "0xProject-v2");
        assert!(ArtifactType::from_str("waffle").is_err());

        let parsed: ArtifactType =
            serde_json::from_value(serde_json::json!("hardhat")).expect("Always valid");
        assert_eq!(parsed, ArtifactType::Hardhat);
    }

    #[test]
    fn interface_marker() {
        let artifact = ContractArtifact {
            bytecode: "0x".to_owned(),
            ..Default::default()
        };
        assert!(artifact.is_interface());
    }

    #[test]
    fn closure_source() {
        let source = |name: &str| -> Result<ContractArtifact, super::error::Error> {
            Err(super::error::Error::NotFound {
                name: name.to_owned(),
            })
        };
        let source: &dyn super::ArtifactSource = &source;
        assert!(source.load("Missing").expect_err("Always fails").is_not_found());
    }
}
