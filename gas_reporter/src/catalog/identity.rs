//!
//! The address identity cache.
//!

use std::collections::HashMap;

///
/// The address identity cache.
///
/// An address keeps its identity for the whole run once established. Identities are also
/// keyed by the hash of the deployed code, so other instances of the same contract are
/// recognized without matching bytecode again.
///
#[derive(Debug, Default, Clone)]
pub struct IdentityCache {
    /// The contract names by deployed code hash.
    by_code_hash: HashMap<web3::types::H256, String>,
    /// The contract names by address.
    by_address: HashMap<web3::types::Address, String>,
}

impl IdentityCache {
    ///
    /// Returns the cached name of the address.
    ///
    pub fn get(&self, address: &web3::types::Address) -> Option<&str> {
        self.by_address.get(address).map(String::as_str)
    }

    ///
    /// Returns the name of the code deployed at the address, caching the address on a hit.
    ///
    pub fn get_by_code(&mut self, address: web3::types::Address, code: &[u8]) -> Option<String> {
        if code.is_empty() {
            return None;
        }
        let name = self
            .by_code_hash
            .get(&crate::utils::keccak256(code))
            .cloned()?;
        self.by_address.insert(address, name.clone());
        Some(name)
    }

    ///
    /// Caches the identity of the address and its code.
    ///
    /// Empty code is not hashed, since every externally owned account shares it.
    ///
    pub fn insert(&mut self, address: web3::types::Address, name: &str, code: &[u8]) {
        self.by_address.insert(address, name.to_owned());
        if !code.is_empty() {
            self.by_code_hash
                .insert(crate::utils::keccak256(code), name.to_owned());
        }
    }

    ///
    /// Whether the address identity is known.
    ///
    pub fn contains(&self, address: &web3::types::Address) -> bool {
        self.by_address.contains_key(address)
    }
}
