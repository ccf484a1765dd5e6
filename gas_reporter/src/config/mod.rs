//!
//! The gas reporter configuration.
//!

use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::artifacts::ArtifactType;
use crate::client::http::HttpClient;
use crate::resolver::ProxyResolverKind;

///
/// The gas reporter configuration.
///
/// Every field may be omitted from the configuration file.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    /// The client endpoint. WebSocket endpoints are queried over HTTP.
    pub url: String,
    /// The Solidity source directory.
    pub src: PathBuf,
    /// The artifacts directory. Defaults to the one of the artifact type.
    pub artifacts: Option<PathBuf>,
    /// The artifact format.
    pub artifact_type: ArtifactType,
    /// The contracts left out of the report.
    pub exclude_contracts: Vec<String>,
    /// The proxy resolver name.
    pub proxy_resolver: Option<String>,
    /// The currency the costs are reported in.
    pub currency: String,
    /// The ether price in the currency.
    pub eth_price: Option<f64>,
    /// The gas price in gwei.
    pub gas_price: Option<u64>,
    /// Whether methods with no calls are hidden.
    pub only_called_methods: bool,
    /// Whether the colors are disabled.
    pub no_colors: bool,
    /// Whether method signatures are shown instead of names.
    pub show_method_sig: bool,
    /// The report table output file.
    pub output_file: Option<PathBuf>,
    /// The ledger snapshot JSON output file.
    pub output_json: Option<PathBuf>,
    /// The block gas limit used if the chain does not report one.
    pub block_limit: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: HttpClient::DEFAULT_URL.to_owned(),
            src: PathBuf::from(Self::DEFAULT_SOURCE_DIRECTORY),
            artifacts: None,
            artifact_type: ArtifactType::default(),
            exclude_contracts: vec![],
            proxy_resolver: None,
            currency: Self::DEFAULT_CURRENCY.to_owned(),
            eth_price: None,
            gas_price: None,
            only_called_methods: true,
            no_colors: false,
            show_method_sig: false,
            output_file: None,
            output_json: None,
            block_limit: Self::DEFAULT_BLOCK_LIMIT,
        }
    }
}

impl Config {
    /// The default Solidity source directory.
    pub const DEFAULT_SOURCE_DIRECTORY: &'static str = "contracts";

    /// The default currency.
    pub const DEFAULT_CURRENCY: &'static str = "eur";

    /// The default block gas limit.
    pub const DEFAULT_BLOCK_LIMIT: u64 = 6_718_946;

    ///
    /// Returns the artifacts directory.
    ///
    pub fn artifacts_directory(&self) -> PathBuf {
        self.artifacts
            .clone()
            .unwrap_or_else(|| self.artifact_type.default_directory())
    }

    ///
    /// Parses the proxy resolver name.
    ///
    pub fn proxy_resolver_kind(&self) -> anyhow::Result<ProxyResolverKind> {
        match self.proxy_resolver.as_deref() {
            Some(name) => ProxyResolverKind::from_str(name),
            None => Ok(ProxyResolverKind::Default),
        }
    }

    ///
    /// Returns the ether and gas prices if both are known.
    ///
    pub fn prices(&self) -> Option<(f64, u64)> {
        match (self.eth_price, self.gas_price) {
            (Some(eth_price), Some(gas_price)) if eth_price > 0.0 && gas_price > 0 => {
                Some((eth_price, gas_price))
            }
            _ => None,
        }
    }
}

impl TryFrom<&Path> for Config {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Configuration file {path:?} reading: {error}"))?;
        let config: Self = serde_json::from_str(text.as_str())
            .map_err(|error| anyhow::anyhow!("Configuration file {path:?} parsing: {error}"))?;
        Ok(config)
    }
}
