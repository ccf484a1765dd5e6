//!
//! The `EtherRouter` proxy resolution.
//!
//! The router keeps the address of a routing table, which maps method selectors to
//! implementation addresses. Both are queried as of the block the call is mined in.
//!

use crate::abi::selector::Selector;
use crate::client::types::Transaction;

use super::Context;
use super::Resolution;

/// The routing table getter signature.
pub const RESOLVER_SIGNATURE: &str = "resolver()";

/// The routing table lookup signature.
pub const LOOKUP_SIGNATURE: &str = "lookup(bytes4)";

///
/// Resolves the implementation address through the router and its routing table.
///
/// Falls back to the selector search if either lookup yields nothing.
///
pub fn resolve(context: &mut Context<'_>, transaction: &Transaction) -> Option<Resolution> {
    match lookup(context, transaction) {
        Some(address) => Some(Resolution::Address(address)),
        None => {
            context.mark_unresolved();
            super::resolve_by_selector(context, transaction)
        }
    }
}

///
/// Queries the router for the routing table and the routing table for the implementation.
///
fn lookup(context: &Context<'_>, transaction: &Transaction) -> Option<web3::types::Address> {
    let router = transaction.to?;
    let selector = transaction.selector()?;

    let output = context.call(
        router,
        Selector::from_signature(RESOLVER_SIGNATURE)
            .as_bytes()
            .to_vec(),
        transaction.block_number,
    )?;
    let routing_table = crate::utils::word_to_address(output.as_slice())?;

    let output = context.call(
        routing_table,
        lookup_data(selector),
        transaction.block_number,
    )?;
    crate::utils::word_to_address(output.as_slice())
}

///
/// Encodes the `lookup(bytes4)` call. Fixed-size bytes are right-padded to a word.
///
pub fn lookup_data(selector: Selector) -> Vec<u8> {
    let mut data = Vec::with_capacity(Selector::LENGTH + crate::utils::BYTE_LENGTH_FIELD);
    data.extend_from_slice(Selector::from_signature(LOOKUP_SIGNATURE).as_bytes());
    data.extend_from_slice(selector.as_bytes());
    data.extend(vec![0u8; crate::utils::BYTE_LENGTH_FIELD - Selector::LENGTH]);
    data
}
