//!
//! The in-memory blockchain used in tests.
//!

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::rc::Rc;

use super::error::Error;
use super::types::Block;
use super::types::CallRequest;
use super::types::Receipt;
use super::types::Transaction;
use super::Client;

///
/// The transaction to be mined.
///
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    /// The recipient. `None` for deployments.
    pub to: Option<web3::types::Address>,
    /// The call data or creation bytecode.
    pub input: Vec<u8>,
    /// The runtime code left at the created address.
    pub code: Vec<u8>,
    /// The gas supplied.
    pub gas: u64,
    /// The gas used.
    pub gas_used: u64,
    /// The receipt status.
    pub status: Option<u64>,
}

impl PendingTransaction {
    /// The gas supplied by default.
    pub const DEFAULT_GAS: u64 = 6_000_000;

    ///
    /// A deployment of the hexadecimal creation bytecode leaving the hexadecimal runtime code.
    ///
    pub fn deploy(input: &str, code: &str, gas_used: u64) -> Self {
        Self {
            to: None,
            input: hex::decode(crate::utils::hex_normalized(input)).expect("Always valid"),
            code: hex::decode(crate::utils::hex_normalized(code)).expect("Always valid"),
            gas: Self::DEFAULT_GAS,
            gas_used,
            status: Some(1),
        }
    }

    ///
    /// A call with the raw input.
    ///
    pub fn call(to: web3::types::Address, input: Vec<u8>, gas_used: u64) -> Self {
        Self {
            to: Some(to),
            input,
            code: vec![],
            gas: Self::DEFAULT_GAS,
            gas_used,
            status: Some(1),
        }
    }

    ///
    /// Marks the transaction as reverted.
    ///
    pub fn reverted(mut self) -> Self {
        self.status = Some(0);
        self
    }

    ///
    /// Removes the receipt status, as pre-Byzantium clients do.
    ///
    pub fn without_status(mut self) -> Self {
        self.status = None;
        self
    }

    ///
    /// Sets the gas supplied.
    ///
    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }
}

///
/// The in-memory chain state.
///
#[derive(Debug, Default)]
struct State {
    /// The mined blocks.
    blocks: Vec<Block>,
    /// The mined transactions.
    transactions: HashMap<web3::types::H256, Transaction>,
    /// The transaction receipts.
    receipts: HashMap<web3::types::H256, Receipt>,
    /// The deployed code.
    codes: HashMap<web3::types::Address, Vec<u8>>,
    /// The read-only call results by the block they take effect at.
    calls: HashMap<(web3::types::Address, Vec<u8>), BTreeMap<u64, Vec<u8>>>,
    /// Whether every request fails.
    is_offline: bool,
    /// The transaction hash counter.
    hash_counter: u64,
    /// The contract address counter.
    address_counter: u64,
}

///
/// The in-memory blockchain.
///
/// Clones share the state, so tests keep mining after handing a clone to the reporter.
///
#[derive(Debug, Clone)]
pub struct MemoryChain {
    /// The shared state.
    state: Rc<RefCell<State>>,
}

impl Default for MemoryChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryChain {
    /// The block gas limit.
    pub const GAS_LIMIT: u64 = 6_721_975;

    /// The first contract address.
    const FIRST_ADDRESS: u64 = 0x1000;

    ///
    /// Creates a chain with the empty genesis block.
    ///
    pub fn new() -> Self {
        let state = State {
            blocks: vec![Block {
                number: 0,
                gas_used: 0,
                gas_limit: Self::GAS_LIMIT,
                transactions: vec![],
            }],
            address_counter: Self::FIRST_ADDRESS,
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    ///
    /// Mines a block with the transactions.
    ///
    /// Returns the block number, the transaction hashes, and the created contract addresses.
    ///
    pub fn mine(
        &self,
        pending: Vec<PendingTransaction>,
    ) -> (u64, Vec<web3::types::H256>, Vec<Option<web3::types::Address>>) {
        let mut state = self.state.borrow_mut();
        let number = state.blocks.len() as u64;

        let mut hashes = Vec::with_capacity(pending.len());
        let mut addresses = Vec::with_capacity(pending.len());
        let mut gas_used = 0;
        for transaction in pending.into_iter() {
            state.hash_counter += 1;
            let hash = web3::types::H256::from_low_u64_be(state.hash_counter);

            let contract_address = if transaction.to.is_none() {
                state.address_counter += 1;
                let address = web3::types::Address::from_low_u64_be(state.address_counter);
                if transaction.status != Some(0) {
                    state.codes.insert(address, transaction.code.clone());
                }
                Some(address)
            } else {
                None
            };

            state.transactions.insert(
                hash,
                Transaction {
                    hash,
                    to: transaction.to,
                    input: transaction.input,
                    block_number: number,
                    gas: transaction.gas,
                },
            );
            state.receipts.insert(
                hash,
                Receipt {
                    status: transaction.status,
                    gas_used: transaction.gas_used,
                    contract_address,
                },
            );
            gas_used += transaction.gas_used;
            hashes.push(hash);
            addresses.push(contract_address);
        }

        state.blocks.push(Block {
            number,
            gas_used,
            gas_limit: Self::GAS_LIMIT,
            transactions: hashes.clone(),
        });

        (number, hashes, addresses)
    }

    ///
    /// Mines a single successful deployment and returns the created address.
    ///
    pub fn deploy(&self, input: &str, code: &str, gas_used: u64) -> web3::types::Address {
        let (_, _, addresses) = self.mine(vec![PendingTransaction::deploy(input, code, gas_used)]);
        addresses[0].expect("Always exists")
    }

    ///
    /// Mines a single call and returns its hash.
    ///
    pub fn call(
        &self,
        to: web3::types::Address,
        input: Vec<u8>,
        gas_used: u64,
    ) -> web3::types::H256 {
        let (_, hashes, _) = self.mine(vec![PendingTransaction::call(to, input, gas_used)]);
        hashes[0]
    }

    ///
    /// Sets the result of a read-only call from the chain head on.
    ///
    pub fn set_call_result(&self, to: web3::types::Address, data: Vec<u8>, result: Vec<u8>) {
        let head = self.head();
        self.set_call_result_from(to, data, head, result);
    }

    ///
    /// Sets the result of a read-only call from the specified block on.
    ///
    /// Calls at earlier blocks keep getting the previous result.
    ///
    pub fn set_call_result_from(
        &self,
        to: web3::types::Address,
        data: Vec<u8>,
        block: u64,
        result: Vec<u8>,
    ) {
        self.state
            .borrow_mut()
            .calls
            .entry((to, data))
            .or_default()
            .insert(block, result);
    }

    ///
    /// Makes every request fail, as an unreachable client does.
    ///
    pub fn set_offline(&self, is_offline: bool) {
        self.state.borrow_mut().is_offline = is_offline;
    }

    ///
    /// Returns the chain head block number.
    ///
    pub fn head(&self) -> u64 {
        self.state.borrow().blocks.len() as u64 - 1
    }

    ///
    /// Fails if the chain is offline.
    ///
    fn check_online(&self, method: &'static str) -> Result<(), Error> {
        if self.state.borrow().is_offline {
            return Err(Error::Malformed {
                method,
                reason: "the client is offline".to_owned(),
            });
        }
        Ok(())
    }
}

impl Client for MemoryChain {
    fn latest_block_number(&self) -> Result<u64, Error> {
        self.check_online("eth_blockNumber")?;
        Ok(self.head())
    }

    fn latest_block(&self) -> Result<Block, Error> {
        self.check_online("eth_getBlockByNumber")?;
        Ok(self
            .state
            .borrow()
            .blocks
            .last()
            .cloned()
            .expect("Always exists"))
    }

    fn block(&self, number: u64) -> Result<Option<Block>, Error> {
        self.check_online("eth_getBlockByNumber")?;
        Ok(self.state.borrow().blocks.get(number as usize).cloned())
    }

    fn transaction(&self, hash: web3::types::H256) -> Result<Option<Transaction>, Error> {
        self.check_online("eth_getTransactionByHash")?;
        Ok(self.state.borrow().transactions.get(&hash).cloned())
    }

    fn receipt(&self, hash: web3::types::H256) -> Result<Option<Receipt>, Error> {
        self.check_online("eth_getTransactionReceipt")?;
        Ok(self.state.borrow().receipts.get(&hash).cloned())
    }

    fn code(&self, address: web3::types::Address) -> Result<Vec<u8>, Error> {
        self.check_online("eth_getCode")?;
        Ok(self
            .state
            .borrow()
            .codes
            .get(&address)
            .cloned()
            .unwrap_or_default())
    }

    fn call(&self, request: &CallRequest, block: u64) -> Result<Vec<u8>, Error> {
        self.check_online("eth_call")?;
        self.state
            .borrow()
            .calls
            .get(&(request.to, request.data.clone()))
            .and_then(|history| history.range(..=block).next_back())
            .map(|(_, result)| result.clone())
            .ok_or_else(|| Error::Rpc {
                method: "eth_call",
                code: -32000,
                message: "execution reverted".to_owned(),
            })
    }

    fn network_id(&self) -> Result<String, Error> {
        self.check_online("net_version")?;
        Ok("5777".to_owned())
    }
}
