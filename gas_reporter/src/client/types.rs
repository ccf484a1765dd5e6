//!
//! The blockchain client value types.
//!

use crate::abi::selector::Selector;

use super::error::Error;

///
/// The mined block with transaction hashes only.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block number.
    pub number: u64,
    /// The gas used by all block transactions.
    pub gas_used: u64,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The transaction hashes in execution order.
    pub transactions: Vec<web3::types::H256>,
}

impl TryFrom<web3::types::Block<web3::types::H256>> for Block {
    type Error = Error;

    fn try_from(block: web3::types::Block<web3::types::H256>) -> Result<Self, Self::Error> {
        let number = block.number.ok_or_else(|| Error::Malformed {
            method: "eth_getBlockByNumber",
            reason: "the block is still pending".to_owned(),
        })?;

        Ok(Self {
            number: number.as_u64(),
            gas_used: block.gas_used.low_u64(),
            gas_limit: block.gas_limit.low_u64(),
            transactions: block.transactions,
        })
    }
}

///
/// The mined transaction.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The transaction hash.
    pub hash: web3::types::H256,
    /// The recipient. `None` for contract creations.
    pub to: Option<web3::types::Address>,
    /// The call data or the creation bytecode.
    pub input: Vec<u8>,
    /// The number of the block the transaction is mined in.
    pub block_number: u64,
    /// The gas supplied by the sender.
    pub gas: u64,
}

impl Transaction {
    ///
    /// Returns the called method selector, if the input carries one.
    ///
    pub fn selector(&self) -> Option<Selector> {
        Selector::from_input(self.input.as_slice())
    }
}

impl TryFrom<web3::types::Transaction> for Transaction {
    type Error = Error;

    fn try_from(transaction: web3::types::Transaction) -> Result<Self, Self::Error> {
        let block_number = transaction.block_number.ok_or_else(|| Error::Malformed {
            method: "eth_getTransactionByHash",
            reason: format!("transaction {:?} is still pending", transaction.hash),
        })?;

        Ok(Self {
            hash: transaction.hash,
            to: transaction.to,
            input: transaction.input.0,
            block_number: block_number.as_u64(),
            gas: transaction.gas.low_u64(),
        })
    }
}

///
/// The transaction receipt.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The execution status. Clients predating Byzantium do not report it.
    pub status: Option<u64>,
    /// The gas used by the transaction.
    pub gas_used: u64,
    /// The created contract address for deployments.
    pub contract_address: Option<web3::types::Address>,
}

impl Receipt {
    ///
    /// Whether the transaction has been reverted.
    ///
    /// The status flag is authoritative when present. Otherwise, a transaction which has
    /// consumed all the supplied gas is considered failed.
    ///
    pub fn is_reverted(&self, gas_supplied: u64) -> bool {
        match self.status {
            Some(status) => status == 0,
            None => self.gas_used == gas_supplied,
        }
    }

    ///
    /// Whether the transaction has created a contract.
    ///
    pub fn is_deployment(&self) -> bool {
        self.contract_address.is_some()
    }
}

impl TryFrom<web3::types::TransactionReceipt> for Receipt {
    type Error = Error;

    fn try_from(receipt: web3::types::TransactionReceipt) -> Result<Self, Self::Error> {
        let gas_used = receipt.gas_used.ok_or_else(|| Error::Malformed {
            method: "eth_getTransactionReceipt",
            reason: format!(
                "receipt of transaction {:?} has no gas used",
                receipt.transaction_hash
            ),
        })?;

        Ok(Self {
            status: receipt.status.map(|status| status.as_u64()),
            gas_used: gas_used.low_u64(),
            contract_address: receipt.contract_address,
        })
    }
}

///
/// The read-only contract call.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// The called contract.
    pub to: web3::types::Address,
    /// The call data.
    pub data: Vec<u8>,
}

impl CallRequest {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(to: web3::types::Address, data: Vec<u8>) -> Self {
        Self { to, data }
    }
}
