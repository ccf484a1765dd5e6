//!
//! The blockchain client.
//!

pub mod error;
pub mod http;
#[cfg(test)]
pub(crate) mod memory;
pub mod types;

use self::error::Error;
use self::types::Block;
use self::types::CallRequest;
use self::types::Receipt;
use self::types::Transaction;

///
/// The read-only blockchain client.
///
/// Every method blocks until the response arrives, since the test runner hooks
/// the reporter is driven by cannot suspend.
///
pub trait Client {
    ///
    /// Returns the chain head block number.
    ///
    fn latest_block_number(&self) -> Result<u64, Error>;

    ///
    /// Returns the chain head block.
    ///
    fn latest_block(&self) -> Result<Block, Error>;

    ///
    /// Returns the block by its number.
    ///
    fn block(&self, number: u64) -> Result<Option<Block>, Error>;

    ///
    /// Returns the transaction by its hash.
    ///
    fn transaction(&self, hash: web3::types::H256) -> Result<Option<Transaction>, Error>;

    ///
    /// Returns the transaction receipt by the transaction hash.
    ///
    fn receipt(&self, hash: web3::types::H256) -> Result<Option<Receipt>, Error>;

    ///
    /// Returns the code deployed at the address as of the chain head.
    ///
    fn code(&self, address: web3::types::Address) -> Result<Vec<u8>, Error>;

    ///
    /// Executes a read-only call against the state as of the specified block.
    ///
    fn call(&self, request: &CallRequest, block: u64) -> Result<Vec<u8>, Error>;

    ///
    /// Returns the network identifier.
    ///
    fn network_id(&self) -> Result<String, Error>;
}
