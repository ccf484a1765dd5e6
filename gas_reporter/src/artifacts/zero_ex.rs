//!
//! The 0x Project `sol-compiler` artifacts.
//!

use std::path::PathBuf;

use serde::Deserialize;

use crate::abi::Entry;

use super::error::Error;
use super::ArtifactSource;
use super::ContractArtifact;
use super::SolcInfo;

///
/// The 0x Project v2 artifact file.
///
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    /// The solc standard JSON output of the contract.
    compiler_output: CompilerOutput,
    /// The compiler the artifact was built with.
    #[serde(default)]
    compiler: Option<Compiler>,
}

///
/// The solc standard JSON output of the contract.
///
#[derive(Debug, Deserialize)]
struct CompilerOutput {
    /// The contract ABI.
    #[serde(default)]
    abi: Vec<Entry>,
    /// The EVM section.
    #[serde(default)]
    evm: Evm,
}

///
/// The solc output EVM section.
///
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Evm {
    /// The creation bytecode.
    #[serde(default)]
    bytecode: Option<Bytecode>,
    /// The runtime bytecode.
    #[serde(default)]
    deployed_bytecode: Option<Bytecode>,
}

///
/// The solc output bytecode object.
///
#[derive(Debug, Deserialize)]
struct Bytecode {
    /// The hexadecimal bytecode, not prefixed.
    #[serde(default)]
    object: Option<String>,
}

///
/// The artifact compiler section.
///
#[derive(Debug, Deserialize)]
struct Compiler {
    /// The compiler version.
    version: String,
    /// The compiler settings.
    #[serde(default)]
    settings: Settings,
}

///
/// The artifact compiler settings.
///
#[derive(Debug, Default, Deserialize)]
struct Settings {
    /// The optimizer settings.
    #[serde(default)]
    optimizer: Optimizer,
}

///
/// The artifact optimizer settings.
///
#[derive(Debug, Default, Deserialize)]
struct Optimizer {
    /// Whether the optimizer is enabled.
    #[serde(default)]
    enabled: bool,
    /// The optimizer runs.
    #[serde(default)]
    runs: u64,
}

impl From<Compiler> for SolcInfo {
    fn from(compiler: Compiler) -> Self {
        Self {
            version: compiler.version,
            optimizer: compiler.settings.optimizer.enabled,
            runs: compiler.settings.optimizer.runs,
        }
    }
}

///
/// The flat 0x Project artifacts directory.
///
#[derive(Debug, Clone)]
pub struct ZeroExArtifacts {
    /// The artifacts directory.
    directory: PathBuf,
}

impl ZeroExArtifacts {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

impl ArtifactSource for ZeroExArtifacts {
    fn load(&self, name: &str) -> Result<ContractArtifact, Error> {
        let path = self.directory.join(format!("{name}.json"));
        if !path.exists() {
            return Err(Error::NotFound {
                name: name.to_owned(),
            });
        }

        let text = std::fs::read_to_string(path.as_path()).map_err(|error| Error::Reading {
            path: path.clone(),
            error,
        })?;
        let artifact: Artifact =
            serde_json::from_str(text.as_str()).map_err(|error| Error::Parsing {
                path: path.clone(),
                error,
            })?;

        let evm = artifact.compiler_output.evm;
        let bytecode = evm.bytecode.and_then(|bytecode| bytecode.object);
        let deployed_bytecode = evm.deployed_bytecode.and_then(|bytecode| bytecode.object);
        Ok(ContractArtifact {
            abi: artifact.compiler_output.abi,
            bytecode: super::normalize_bytecode(name, bytecode.as_deref())?,
            deployed_bytecode: super::normalize_bytecode(name, deployed_bytecode.as_deref())?,
            deployed: None,
            solc: artifact.compiler.map(SolcInfo::from),
        })
    }
}
