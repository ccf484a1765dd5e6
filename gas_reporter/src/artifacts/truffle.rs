//!
//! The Truffle artifacts.
//!

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::abi::Entry;

use super::error::Error;
use super::ArtifactSource;
use super::ContractArtifact;
use super::Deployed;
use super::SolcInfo;

///
/// The Truffle artifact file.
///
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    /// The contract ABI.
    #[serde(default)]
    abi: Vec<Entry>,
    /// The creation bytecode.
    #[serde(default)]
    bytecode: Option<String>,
    /// The runtime bytecode.
    #[serde(default)]
    deployed_bytecode: Option<String>,
    /// The deployments by network identifier.
    #[serde(default)]
    networks: HashMap<String, Network>,
    /// The solc metadata JSON string.
    #[serde(default)]
    metadata: Option<String>,
}

///
/// The Truffle artifact network entry.
///
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Network {
    /// The contract address.
    #[serde(default)]
    address: Option<web3::types::Address>,
    /// The deployment transaction hash.
    #[serde(default)]
    transaction_hash: Option<web3::types::H256>,
}

///
/// The subset of the solc metadata the report shows.
///
#[derive(Debug, Deserialize)]
struct Metadata {
    /// The compiler section.
    compiler: MetadataCompiler,
    /// The settings section.
    settings: MetadataSettings,
}

///
/// The solc metadata compiler section.
///
#[derive(Debug, Deserialize)]
struct MetadataCompiler {
    /// The compiler version.
    version: String,
}

///
/// The solc metadata settings section.
///
#[derive(Debug, Deserialize)]
struct MetadataSettings {
    /// The optimizer settings.
    #[serde(default)]
    optimizer: MetadataOptimizer,
}

///
/// The solc metadata optimizer settings.
///
#[derive(Debug, Default, Deserialize)]
struct MetadataOptimizer {
    /// Whether the optimizer is enabled.
    #[serde(default)]
    enabled: bool,
    /// The optimizer runs.
    #[serde(default)]
    runs: u64,
}

impl From<Metadata> for SolcInfo {
    fn from(metadata: Metadata) -> Self {
        Self {
            version: metadata.compiler.version,
            optimizer: metadata.settings.optimizer.enabled,
            runs: metadata.settings.optimizer.runs,
        }
    }
}

///
/// The Truffle artifacts directory, e.g. `build/contracts`.
///
#[derive(Debug, Clone)]
pub struct TruffleArtifacts {
    /// The artifacts directory.
    directory: PathBuf,
    /// The current network identifier.
    network_id: String,
}

impl TruffleArtifacts {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(directory: PathBuf, network_id: String) -> Self {
        Self {
            directory,
            network_id,
        }
    }

    ///
    /// Parses the artifact file.
    ///
    fn parse(&self, name: &str, path: &Path) -> Result<ContractArtifact, Error> {
        let text = std::fs::read_to_string(path).map_err(|error| Error::Reading {
            path: path.to_owned(),
            error,
        })?;
        let artifact: Artifact =
            serde_json::from_str(text.as_str()).map_err(|error| Error::Parsing {
                path: path.to_owned(),
                error,
            })?;

        let deployed = artifact
            .networks
            .get(self.network_id.as_str())
            .and_then(|network| match (network.address, network.transaction_hash) {
                (Some(address), Some(transaction_hash)) => Some(Deployed {
                    address,
                    transaction_hash,
                }),
                _ => None,
            });

        let solc = artifact.metadata.as_deref().and_then(|metadata| {
            match serde_json::from_str::<Metadata>(metadata) {
                Ok(metadata) => Some(SolcInfo::from(metadata)),
                Err(error) => {
                    tracing::debug!("Contract `{name}` metadata is ignored: {error}");
                    None
                }
            }
        });

        Ok(ContractArtifact {
            abi: artifact.abi,
            bytecode: super::normalize_bytecode(name, artifact.bytecode.as_deref())?,
            deployed_bytecode: super::normalize_bytecode(
                name,
                artifact.deployed_bytecode.as_deref(),
            )?,
            deployed,
            solc,
        })
    }
}

impl ArtifactSource for TruffleArtifacts {
    fn load(&self, name: &str) -> Result<ContractArtifact, Error> {
        let path = self.directory.join(format!("{name}.json"));
        if !path.exists() {
            return Err(Error::NotFound {
                name: name.to_owned(),
            });
        }
        self.parse(name, path.as_path())
    }
}
