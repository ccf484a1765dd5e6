//!
//! The block range scanner.
//!


pub mod cursor;

use crate::artifacts::ArtifactSource;
use crate::catalog::method::MethodId;
use crate::catalog::Catalog;
use crate::client::types::Receipt;
use crate::client::types::Transaction;
use crate::client::Client;
use crate::ledger::GasLedger;
use crate::ledger::Snapshot;
use crate::resolver::ProxyResolver;
use crate::resolver::Resolution;

use self::cursor::BlockCursor;

///
/// The block range scanner.
///
/// Walks the blocks mined since the previous scan in ascending order, attributing the gas
/// of every successful transaction to a contract deployment or method.
///
pub struct BlockRangeScanner {
    /// The blockchain client.
    client: Box<dyn Client>,
    /// The contract catalog.
    catalog: Catalog,
    /// The proxied call resolver.
    resolver: ProxyResolver,
    /// The gas ledger.
    ledger: GasLedger,
    /// The block cursor.
    cursor: BlockCursor,
    /// The chain head seen by the previous scan.
    last_head: Option<u64>,
}

impl BlockRangeScanner {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(client: Box<dyn Client>, resolver: ProxyResolver) -> Self {
        Self {
            client,
            catalog: Catalog::default(),
            resolver,
            ledger: GasLedger::default(),
            cursor: BlockCursor::default(),
            last_head: None,
        }
    }

    ///
    /// Loads the contract catalog.
    ///
    pub fn initialize(
        &mut self,
        names: &[String],
        artifacts: &dyn ArtifactSource,
    ) -> anyhow::Result<()> {
        self.catalog
            .initialize(self.client.as_ref(), names, artifacts, &mut self.ledger)
    }

    ///
    /// Makes the next scan start at the block.
    ///
    pub fn start_at(&mut self, block: u64) {
        self.cursor = BlockCursor::new(block);
    }

    ///
    /// Excludes the blocks up to the test start from the method window.
    ///
    pub fn on_test_boundary_before(&mut self, block: u64) {
        self.cursor.on_test_boundary_before(block);
    }

    ///
    /// Opens the method window after the setup hook which ended at the block.
    ///
    pub fn on_hook_end(&mut self, block: u64) {
        self.cursor.on_hook_end(block);
    }

    ///
    /// Scans the blocks from the cursor up to the chain head inclusive.
    ///
    /// Returns the gas used by the successful transactions of the method window.
    /// Client failures are fatal, since the accounting cannot be trusted without them.
    ///
    pub fn scan_range(&mut self) -> anyhow::Result<u64> {
        let head = self
            .client
            .latest_block_number()
            .map_err(|error| anyhow::anyhow!("Chain head reading: {error}"))?;
        if let Some(last_head) = self.last_head {
            if head < last_head {
                tracing::warn!("The chain head has regressed from block {last_head} to {head}");
            }
        }
        self.last_head = Some(head);

        let range = match self.cursor.range(head) {
            Some(range) => range,
            None => return Ok(0),
        };
        tracing::debug!("Scanning blocks {range:?}");

        let mut gas_used = 0;
        for number in range {
            let is_method_window = self.cursor.is_method_window(number);
            gas_used += self.scan_block(number, is_method_window)?;
            self.cursor.advance(number);
        }
        self.cursor.finish(head);

        Ok(gas_used)
    }

    ///
    /// Scans a single block.
    ///
    fn scan_block(&mut self, number: u64, is_method_window: bool) -> anyhow::Result<u64> {
        let block = self
            .client
            .block(number)
            .map_err(|error| anyhow::anyhow!("Block {number} reading: {error}"))?
            .ok_or_else(|| anyhow::anyhow!("Block {number} is missing"))?;

        let mut gas_used = 0;
        for hash in block.transactions.into_iter() {
            let transaction = self
                .client
                .transaction(hash)
                .map_err(|error| anyhow::anyhow!("Transaction {hash:?} reading: {error}"))?
                .ok_or_else(|| anyhow::anyhow!("Transaction {hash:?} is missing"))?;
            let receipt = self
                .client
                .receipt(hash)
                .map_err(|error| anyhow::anyhow!("Receipt {hash:?} reading: {error}"))?
                .ok_or_else(|| anyhow::anyhow!("Receipt {hash:?} is missing"))?;

            if receipt.is_reverted(transaction.gas) {
                tracing::debug!("Transaction {hash:?} in block {number} has reverted");
                continue;
            }

            if is_method_window {
                gas_used += receipt.gas_used;
            }

            if receipt.is_deployment() {
                self.record_deployment(&transaction, &receipt)?;
            } else if is_method_window {
                self.record_method_call(&transaction, &receipt)?;
            }
        }

        Ok(gas_used)
    }

    ///
    /// Attributes the deployment gas by the creation bytecode.
    ///
    fn record_deployment(
        &mut self,
        transaction: &Transaction,
        receipt: &Receipt,
    ) -> anyhow::Result<()> {
        if self.catalog.is_pre_deployed(&transaction.hash) {
            return Ok(());
        }
        let address = match receipt.contract_address {
            Some(address) => address,
            None => return Ok(()),
        };

        let name = match self
            .catalog
            .find_deployment_by_input_bytecode(transaction.input.as_slice())
        {
            Some(record) => record.name.clone(),
            None => {
                tracing::debug!("Deployment {:?} matches no known contract", transaction.hash);
                return Ok(());
            }
        };

        self.ledger
            .record_deployment_gas(name.as_str(), receipt.gas_used);
        self.catalog
            .track_address(self.client.as_ref(), name.as_str(), address)
    }

    ///
    /// Attributes the call gas to the contract method.
    ///
    /// The call target is looked up by address first. If the target has no such method, the
    /// call is proxied and handed to the resolver. If the target is still unknown, the first
    /// contract with the selector is taken.
    ///
    fn record_method_call(
        &mut self,
        transaction: &Transaction,
        receipt: &Receipt,
    ) -> anyhow::Result<()> {
        let to = match transaction.to {
            Some(to) => to,
            None => return Ok(()),
        };
        let selector = match transaction.selector() {
            Some(selector) => selector,
            None => {
                tracing::debug!("Transaction {:?} is not a method call", transaction.hash);
                return Ok(());
            }
        };
        let client = self.client.as_ref();

        let mut name = self.catalog.name_by_address(client, to)?;
        if let Some(contract) = name.as_deref() {
            if self
                .catalog
                .method(&MethodId::new(contract, selector))
                .is_none()
            {
                name = match self.resolver.resolve(&mut self.catalog, client, transaction) {
                    Some(Resolution::Name(name)) => Some(name),
                    Some(Resolution::Address(address)) => self.catalog.identify(client, address)?,
                    None => None,
                };
            }
        }
        if name.is_none() {
            name = self
                .catalog
                .find_methods_by_selector(selector)
                .first()
                .map(|method| method.contract.clone());
        }

        let is_recorded = match name {
            Some(name) => self
                .ledger
                .record_method_gas(&MethodId::new(name.as_str(), selector), receipt.gas_used),
            None => false,
        };
        if !is_recorded {
            tracing::debug!(
                "Call {:?} to {to:?} with selector {selector} is not attributed",
                transaction.hash
            );
            self.resolver.mark_unresolved();
        }

        Ok(())
    }

    ///
    /// Returns the contract catalog.
    ///
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    ///
    /// Returns the gas ledger.
    ///
    pub fn ledger(&self) -> &GasLedger {
        &self.ledger
    }

    ///
    /// Returns the block cursor.
    ///
    pub fn cursor(&self) -> &BlockCursor {
        &self.cursor
    }

    ///
    /// Returns the blockchain client.
    ///
    pub fn client(&self) -> &dyn Client {
        self.client.as_ref()
    }

    ///
    /// Returns the number of calls which could not be attributed.
    ///
    pub fn unresolved_calls(&self) -> usize {
        self.resolver.unresolved_calls()
    }

    ///
    /// Copies the ledger for reporting.
    ///
    pub fn snapshot(&self) -> Snapshot {
        self.ledger.snapshot()
    }
}
