//!
//! The gas reporter arguments.
//!

use std::path::PathBuf;

use clap::Parser;

///
/// The gas reporter arguments.
///
/// Every argument overrides its configuration file counterpart.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// The logging level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppresses the output completely.
    #[arg(short, long)]
    pub quiet: bool,

    /// The JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// The client endpoint.
    #[arg(short, long)]
    pub url: Option<String>,

    /// The Solidity source directory.
    #[arg(short, long)]
    pub src: Option<PathBuf>,

    /// The artifacts directory.
    #[arg(short, long)]
    pub artifacts: Option<PathBuf>,

    /// The artifact format: `truffle-v5`, `ethpm`, `hardhat-v2`, `buidler-v1`, or `0xProject-v2`.
    #[arg(long)]
    pub artifact_type: Option<gas_reporter::ArtifactType>,

    /// The contracts left out of the report.
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// The proxy resolver: `EtherRouter` or `default`.
    #[arg(long)]
    pub proxy_resolver: Option<String>,

    /// The currency the costs are reported in.
    #[arg(long)]
    pub currency: Option<String>,

    /// The ether price in the currency.
    #[arg(long)]
    pub eth_price: Option<f64>,

    /// The gas price in gwei.
    #[arg(long)]
    pub gas_price: Option<u64>,

    /// The first block to scan.
    #[arg(long, default_value_t = 0)]
    pub from_block: u64,

    /// The report table output file.
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// The JSON report output file.
    #[arg(long)]
    pub output_json: Option<PathBuf>,

    /// Disables the colors.
    #[arg(long)]
    pub no_colors: bool,

    /// Shows method signatures instead of names.
    #[arg(long)]
    pub show_method_sig: bool,

    /// Shows the methods which have not been called.
    #[arg(long)]
    pub all_methods: bool,
}

impl Arguments {
    ///
    /// Overrides the configuration with the arguments.
    ///
    pub fn apply(&self, config: &mut gas_reporter::Config) {
        if let Some(url) = self.url.as_ref() {
            config.url = url.to_owned();
        }
        if let Some(src) = self.src.as_ref() {
            config.src = src.to_owned();
        }
        if let Some(artifacts) = self.artifacts.as_ref() {
            config.artifacts = Some(artifacts.to_owned());
        }
        if let Some(artifact_type) = self.artifact_type {
            config.artifact_type = artifact_type;
        }
        config
            .exclude_contracts
            .extend(self.exclude.iter().cloned());
        if let Some(proxy_resolver) = self.proxy_resolver.as_ref() {
            config.proxy_resolver = Some(proxy_resolver.to_owned());
        }
        if let Some(currency) = self.currency.as_ref() {
            config.currency = currency.to_owned();
        }
        if self.eth_price.is_some() {
            config.eth_price = self.eth_price;
        }
        if self.gas_price.is_some() {
            config.gas_price = self.gas_price;
        }
        if let Some(output_file) = self.output_file.as_ref() {
            config.output_file = Some(output_file.to_owned());
        }
        if let Some(output_json) = self.output_json.as_ref() {
            config.output_json = Some(output_json.to_owned());
        }
        config.no_colors |= self.no_colors;
        config.show_method_sig |= self.show_method_sig;
        if self.all_methods {
            config.only_called_methods = false;
        }
    }
}
