//!
//! The gas report.
//!

pub mod json;
pub mod table;

use std::path::PathBuf;

use crate::artifacts::SolcInfo;
use crate::config::Config;
use crate::ledger::statistics::Statistics;
use crate::ledger::Snapshot;

///
/// The report presentation settings.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// The currency the costs are reported in.
    pub currency: String,
    /// The ether price in the currency and the gas price in gwei.
    pub prices: Option<(f64, u64)>,
    /// Whether methods with no calls are hidden.
    pub only_called_methods: bool,
    /// Whether method signatures are shown instead of names.
    pub show_method_sig: bool,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            currency: config.currency.to_lowercase(),
            prices: config.prices(),
            only_called_methods: config.only_called_methods,
            show_method_sig: config.show_method_sig,
        }
    }
}

///
/// The method table row.
///
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRow {
    /// The contract name.
    pub contract: String,
    /// The method name or signature.
    pub method: String,
    /// The gas statistics. `None` if the method has not been called.
    pub statistics: Option<Statistics>,
    /// The number of calls.
    pub calls: usize,
}

///
/// The deployment table row.
///
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRow {
    /// The contract name.
    pub name: String,
    /// The gas statistics.
    pub statistics: Statistics,
    /// The average gas as a percentage of the block gas limit.
    pub percent_of_limit: f64,
}

///
/// The gas report.
///
#[derive(Debug, Clone)]
pub struct Report {
    /// The ledger snapshot.
    pub snapshot: Snapshot,
    /// The compiler settings.
    pub solc: Option<SolcInfo>,
    /// The number of calls which could not be attributed.
    pub unresolved_calls: usize,
    /// The presentation settings.
    pub settings: Settings,
}

impl Report {
    ///
    /// A shortcut constructor.
    ///
    /// The configured block gas limit is used if the chain has not reported one.
    ///
    pub fn new(
        mut snapshot: Snapshot,
        solc: Option<SolcInfo>,
        unresolved_calls: usize,
        config: &Config,
    ) -> Self {
        if snapshot.block_gas_limit == 0 {
            snapshot.block_gas_limit = config.block_limit;
        }
        Self {
            snapshot,
            solc,
            unresolved_calls,
            settings: Settings::from(config),
        }
    }

    ///
    /// Returns the method rows sorted by contract and method.
    ///
    pub fn method_rows(&self) -> Vec<MethodRow> {
        let mut rows: Vec<MethodRow> = self
            .snapshot
            .methods
            .values()
            .filter(|entry| !self.settings.only_called_methods || entry.calls > 0)
            .map(|entry| MethodRow {
                contract: entry.contract.clone(),
                method: if self.settings.show_method_sig {
                    entry.signature.clone()
                } else {
                    entry.method.clone()
                },
                statistics: entry.statistics(),
                calls: entry.calls,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.contract
                .cmp(&b.contract)
                .then_with(|| a.method.cmp(&b.method))
        });
        rows
    }

    ///
    /// Returns the rows of deployed contracts sorted by name.
    ///
    pub fn deployment_rows(&self) -> Vec<DeploymentRow> {
        let mut rows: Vec<DeploymentRow> = self
            .snapshot
            .deployments
            .iter()
            .filter_map(|entry| {
                let statistics = entry.statistics()?;
                Some(DeploymentRow {
                    name: entry.name.clone(),
                    statistics,
                    percent_of_limit: gas_to_percent_of_limit(
                        statistics.average,
                        self.snapshot.block_gas_limit,
                    ),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    ///
    /// Returns the cost of the gas, if the prices are known.
    ///
    pub fn cost(&self, gas: u64) -> Option<String> {
        self.settings
            .prices
            .map(|(eth_price, gas_price)| gas_to_cost(gas, eth_price, gas_price))
    }

    ///
    /// Writes the uncolored report table to a file.
    ///
    pub fn write_to_file(&self, path: PathBuf) -> anyhow::Result<()> {
        std::fs::write(path.as_path(), self::table::render(self, false))
            .map_err(|error| anyhow::anyhow!("Report file {path:?} writing: {error}"))?;
        Ok(())
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self::table::render(self, true))
    }
}

///
/// Expresses the gas as the cost in the currency, rounded to cents.
///
pub fn gas_to_cost(gas: u64, eth_price: f64, gas_price_gwei: u64) -> String {
    format!(
        "{:.2}",
        (gas_price_gwei as f64) / 1e9 * (gas as f64) * eth_price
    )
}

///
/// Expresses the gas as the percentage of the block gas limit with one decimal.
///
pub fn gas_to_percent_of_limit(gas: u64, block_gas_limit: u64) -> f64 {
    if block_gas_limit == 0 {
        return 0.0;
    }
    (1000.0 * (gas as f64) / (block_gas_limit as f64)).round() / 10.0
}
