//!
//! The test runner lifecycle façade.
//!

use colored::Colorize;

use crate::artifacts::ArtifactSource;
use crate::client::Client;
use crate::config::Config;
use crate::report::Report;
use crate::resolver::ProxyResolver;
use crate::scanner::BlockRangeScanner;

///
/// The gas reporter driven by the test runner hooks.
///
pub struct GasReporter {
    /// The block range scanner.
    scanner: BlockRangeScanner,
    /// The reporter configuration.
    config: Config,
}

impl GasReporter {
    ///
    /// Creates the reporter with the configured proxy resolver.
    ///
    pub fn new(client: Box<dyn Client>, config: Config) -> anyhow::Result<Self> {
        let kind = config.proxy_resolver_kind()?;
        Ok(Self::with_resolver(client, config, ProxyResolver::new(kind)))
    }

    ///
    /// Creates the reporter with a custom proxy resolver.
    ///
    pub fn with_resolver(client: Box<dyn Client>, config: Config, resolver: ProxyResolver) -> Self {
        Self {
            scanner: BlockRangeScanner::new(client, resolver),
            config,
        }
    }

    ///
    /// Loads the contracts found in the source directory from the configured artifacts.
    ///
    pub fn on_suite_start(&mut self) -> anyhow::Result<()> {
        let network_id = self
            .scanner
            .client()
            .network_id()
            .map_err(|error| anyhow::anyhow!("Network identifier reading: {error}"))?;
        let names = crate::sources::list_contracts(
            self.config.src.as_path(),
            self.config.exclude_contracts.as_slice(),
        )?;
        let artifacts = self
            .config
            .artifact_type
            .source(self.config.artifacts_directory(), network_id);

        self.on_suite_start_with(names.as_slice(), artifacts.as_ref())
    }

    ///
    /// Loads the contracts and makes the first scan start after the current chain head.
    ///
    pub fn on_suite_start_with(
        &mut self,
        names: &[String],
        artifacts: &dyn ArtifactSource,
    ) -> anyhow::Result<()> {
        let names: Vec<String> = names
            .iter()
            .filter(|name| !self.config.exclude_contracts.contains(name))
            .cloned()
            .collect();
        self.scanner.initialize(names.as_slice(), artifacts)?;

        let head = self.latest_block_number()?;
        self.scanner.start_at(head + 1);

        tracing::info!(
            "{} contracts are tracked from block {}",
            self.scanner.catalog().len(),
            head + 1
        );
        Ok(())
    }

    ///
    /// Excludes the blocks mined before the test from its method window.
    ///
    pub fn on_test_boundary_before(&mut self, block: u64) {
        self.scanner.on_test_boundary_before(block);
    }

    ///
    /// Excludes the blocks mined by a setup hook from the test method window.
    ///
    pub fn on_hook_end(&mut self, block: u64) {
        self.scanner.on_hook_end(block);
    }

    ///
    /// Scans the blocks mined by the passed test.
    ///
    /// Returns the gas used by the test.
    ///
    pub fn on_test_pass(&mut self, title: &str) -> anyhow::Result<u64> {
        let gas_used = self.scanner.scan_range()?;
        println!(
            "    {} {} {}",
            "PASSED".green(),
            title,
            format!("(gas {gas_used})").bright_white()
        );
        Ok(gas_used)
    }

    ///
    /// Scans the blocks mined by the failed test.
    ///
    /// Deployments and calls of a failed test are attributed like those of a passed one.
    ///
    pub fn on_test_fail(&mut self, title: &str) -> anyhow::Result<()> {
        let gas_used = self.scanner.scan_range()?;
        println!("    {} {}", "FAILED".bright_red(), title);
        tracing::debug!("Failed test `{title}` has used {gas_used} gas");
        Ok(())
    }

    ///
    /// Scans the remaining blocks and builds the report.
    ///
    pub fn on_suite_end(&mut self) -> anyhow::Result<Report> {
        self.scanner.scan_range()?;
        Ok(self.report())
    }

    ///
    /// Makes the next scan start at the block.
    ///
    pub fn start_at(&mut self, block: u64) {
        self.scanner.start_at(block);
    }

    ///
    /// Returns the chain head block number.
    ///
    pub fn latest_block_number(&self) -> anyhow::Result<u64> {
        self.scanner
            .client()
            .latest_block_number()
            .map_err(|error| anyhow::anyhow!("Chain head reading: {error}"))
    }

    ///
    /// Builds the report of the gas recorded so far.
    ///
    pub fn report(&self) -> Report {
        Report::new(
            self.scanner.snapshot(),
            self.scanner.catalog().solc().cloned(),
            self.scanner.unresolved_calls(),
            &self.config,
        )
    }

    ///
    /// Returns the block range scanner.
    ///
    pub fn scanner(&self) -> &BlockRangeScanner {
        &self.scanner
    }

    ///
    /// Returns the reporter configuration.
    ///
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use crate::abi::selector::Selector;
    use crate::catalog::method::MethodId;
    use crate::client::memory::MemoryChain;
    use crate::client::memory::PendingTransaction;
    use crate::config::Config;
    use crate::fixtures;

    use super::GasReporter;

    fn reporter(chain: &MemoryChain, config: Config) -> GasReporter {
        let mut reporter =
            GasReporter::new(Box::new(chain.clone()), config).expect("Always valid");
        reporter
            .on_suite_start_with(
                fixtures::names(&["Wallet", "Token"]).as_slice(),
                &fixtures::source(vec![
                    ("Wallet", fixtures::wallet()),
                    ("Token", fixtures::token()),
                ]),
            )
            .expect("Always valid");
        reporter
    }

    #[test]
    fn unknown_resolver_is_rejected() {
        let config = Config {
            proxy_resolver: Some("Diamond".to_owned()),
            ..Default::default()
        };
        assert!(GasReporter::new(Box::new(MemoryChain::new()), config).is_err());
    }

    #[test]
    fn suite_lifecycle() {
        let chain = MemoryChain::new();
        let mut reporter = reporter(&chain, Config::default());
        let send_coin = fixtures::call_data("sendCoin(address,uint256)", 2);

        reporter.on_test_boundary_before(chain.head());
        let wallet = chain.deploy(
            fixtures::linked_wallet_bytecode(web3::types::Address::from_low_u64_be(0x42)).as_str(),
            fixtures::WALLET_CODE,
            450_000,
        );
        reporter.on_hook_end(chain.head());
        chain.call(wallet, send_coin.clone(), 51000);
        let gas_used = reporter.on_test_pass("sends coins").expect("Always valid");
        assert_eq!(gas_used, 51000);

        reporter.on_test_boundary_before(chain.head());
        chain.mine(vec![
            PendingTransaction::call(wallet, send_coin.clone(), 36000),
            PendingTransaction::call(wallet, send_coin.clone(), 90000).reverted(),
        ]);
        reporter
            .on_test_fail("rejects overdrafts")
            .expect("Always valid");

        chain.call(wallet, send_coin, 41000);
        let report = reporter.on_suite_end().expect("Always valid");

        let id = MethodId::new("Wallet", Selector::from_signature("sendCoin(address,uint256)"));
        assert_eq!(
            report.snapshot.methods[&id].gas_samples,
            vec![51000, 36000, 41000]
        );
        assert_eq!(report.snapshot.block_gas_limit, MemoryChain::GAS_LIMIT);
        assert_eq!(report.unresolved_calls, 0);

        let deployments = report.deployment_rows();
        assert_eq!(deployments.len(), 1);
        assert_eq!(deployments[0].name, "Wallet");
        assert_eq!(deployments[0].statistics.average, 450_000);

        let methods = report.method_rows();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].calls, 3);
    }

    #[test]
    fn blocks_before_suite_are_ignored() {
        let chain = MemoryChain::new();
        let wallet = chain.deploy(
            fixtures::linked_wallet_bytecode(web3::types::Address::from_low_u64_be(0x42)).as_str(),
            fixtures::WALLET_CODE,
            450_000,
        );
        let mut reporter = reporter(&chain, Config::default());

        chain.call(
            wallet,
            fixtures::call_data("sendCoin(address,uint256)", 2),
            51000,
        );
        let report = reporter.on_suite_end().expect("Always valid");

        assert!(report.deployment_rows().is_empty());
        let methods = report.method_rows();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].contract, "Wallet");
    }

    #[test]
    fn excluded_contracts_are_not_tracked() {
        let chain = MemoryChain::new();
        let config = Config {
            exclude_contracts: vec!["Token".to_owned()],
            ..Default::default()
        };
        let reporter = reporter(&chain, config);
        assert!(reporter.scanner().catalog().record("Token").is_none());
        assert!(reporter.scanner().catalog().record("Wallet").is_some());
    }

    #[test]
    fn suite_start_from_project_directories() {
        let directory = tempfile::tempdir().expect("Always valid");
        let sources = directory.path().join("contracts");
        let artifacts = directory.path().join("build").join("contracts");
        std::fs::create_dir_all(sources.as_path()).expect("Always valid");
        std::fs::create_dir_all(artifacts.as_path()).expect("Always valid");

        std::fs::write(
            sources.join("Token.sol"),
            "pragma solidity ^0.8.0;\n// contract Commented {}\ncontract Token {}\n",
        )
        .expect("Always valid");
        std::fs::write(
            artifacts.join("Token.json"),
            serde_json::json!({
                "abi": [
                    { "type": "function", "name": "transfer", "inputs": [{ "type": "address" }, { "type": "uint256" }], "stateMutability": "nonpayable" }
                ],
                "bytecode": fixtures::TOKEN_BYTECODE,
                "deployedBytecode": fixtures::TOKEN_CODE,
                "networks": {}
            })
            .to_string(),
        )
        .expect("Always valid");

        let chain = MemoryChain::new();
        let config = Config {
            src: sources,
            artifacts: Some(artifacts),
            ..Default::default()
        };
        let mut reporter = GasReporter::new(Box::new(chain.clone()), config).expect("Always valid");
        reporter.on_suite_start().expect("Always valid");

        assert_eq!(reporter.scanner().catalog().len(), 1);
        assert!(reporter.scanner().catalog().record("Commented").is_none());

        chain.deploy(fixtures::TOKEN_BYTECODE, fixtures::TOKEN_CODE, 600_000);
        let report = reporter.on_suite_end().expect("Always valid");
        assert_eq!(report.deployment_rows()[0].name, "Token");
    }
}
