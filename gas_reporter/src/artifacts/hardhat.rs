//!
//! The Hardhat artifacts.
//!

use std::path::PathBuf;

use serde::Deserialize;

use crate::abi::Entry;

use super::error::Error;
use super::ArtifactSource;
use super::ContractArtifact;

///
/// The Hardhat artifact file.
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
    /// The runtime bytecode. Buidler artifacts omit it.
    #[serde(default)]
    deployed_bytecode: Option<String>,
}

///
/// The Hardhat artifacts directory, where artifacts are nested by source file.
///
#[derive(Debug, Clone)]
pub struct HardhatArtifacts {
    /// The artifacts directory.
    directory: PathBuf,
}

impl HardhatArtifacts {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    ///
    /// Finds the artifact file of the contract.
    ///
    fn find(&self, name: &str) -> Option<PathBuf> {
        let pattern = format!(
            "{}/**/{}.json",
            glob::Pattern::escape(self.directory.to_string_lossy().as_ref()),
            glob::Pattern::escape(name),
        );
        let paths = match glob::glob(pattern.as_str()) {
            Ok(paths) => paths,
            Err(error) => {
                tracing::warn!("Artifact search pattern `{pattern}` is invalid: {error}");
                return None;
            }
        };

        paths
            .filter_map(Result::ok)
            .find(|path| !path.components().any(|component| component.as_os_str() == "build-info"))
    }
}

impl ArtifactSource for HardhatArtifacts {
    fn load(&self, name: &str) -> Result<ContractArtifact, Error> {
        let path = self.find(name).ok_or_else(|| Error::NotFound {
            name: name.to_owned(),
        })?;

        let text = std::fs::read_to_string(path.as_path()).map_err(|error| Error::Reading {
            path: path.clone(),
            error,
        })?;
        let artifact: Artifact =
            serde_json::from_str(text.as_str()).map_err(|error| Error::Parsing {
                path: path.clone(),
                error,
            })?;

        Ok(ContractArtifact {
            abi: artifact.abi,
            bytecode: super::normalize_bytecode(name, artifact.bytecode.as_deref())?,
            deployed_bytecode: super::normalize_bytecode(
                name,
                artifact.deployed_bytecode.as_deref(),
            )?,
            deployed: None,
            solc: None,
        })
    }
}
