//!
//! The proxied call resolver.
//!

pub mod ether_router;

use std::str::FromStr;

use crate::abi::selector::Selector;
use crate::catalog::Catalog;
use crate::client::types::CallRequest;
use crate::client::types::Transaction;
use crate::client::Client;

///
/// The resolved call target.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The contract name.
    Name(String),
    /// The implementation address, which is yet to be identified.
    Address(web3::types::Address),
}

///
/// The resolution strategy.
///
/// Returns `None` if the call cannot be attributed. Must not fail.
///
pub type ResolveFn = dyn Fn(&mut Context<'_>, &Transaction) -> Option<Resolution>;

///
/// The resolution strategy selector.
///
#[derive(Default)]
pub enum ProxyResolverKind {
    /// The first contract with the called selector.
    #[default]
    Default,
    /// The `EtherRouter` routing table lookup.
    EtherRouter,
    /// The user-supplied strategy.
    Custom(Box<ResolveFn>),
}

impl std::fmt::Debug for ProxyResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::EtherRouter => write!(f, "EtherRouter"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl FromStr for ProxyResolverKind {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "etherrouter" => Ok(Self::EtherRouter),
            _ => anyhow::bail!(
                "Unknown proxy resolver `{string}`. Supported resolvers: default, EtherRouter"
            ),
        }
    }
}

///
/// The resolver state lent to the strategy.
///
pub struct Context<'a> {
    /// The contract catalog.
    catalog: &'a mut Catalog,
    /// The blockchain client.
    client: &'a dyn Client,
    /// The unresolved call counter.
    unresolved_calls: &'a mut usize,
}

impl<'a> Context<'a> {
    ///
    /// Returns the blockchain client.
    ///
    pub fn client(&self) -> &dyn Client {
        self.client
    }

    ///
    /// Returns the contract catalog.
    ///
    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    ///
    /// Returns the first contract with a tracked method with the selector.
    ///
    pub fn first_contract_with_selector(&self, selector: Selector) -> Option<String> {
        self.catalog
            .find_methods_by_selector(selector)
            .first()
            .map(|method| method.contract.clone())
    }

    ///
    /// Returns the cached name of the contract at the address.
    ///
    pub fn name_by_address(&mut self, address: web3::types::Address) -> Option<String> {
        match self.catalog.name_by_address(self.client, address) {
            Ok(name) => name,
            Err(error) => {
                tracing::debug!("Proxy resolution: {error}");
                None
            }
        }
    }

    ///
    /// Returns the name of the contract at the address, matching its deployed code if needed.
    ///
    pub fn resolve_by_deployed_bytecode(&mut self, address: web3::types::Address) -> Option<String> {
        match self.catalog.identify(self.client, address) {
            Ok(name) => name,
            Err(error) => {
                tracing::debug!("Proxy resolution: {error}");
                None
            }
        }
    }

    ///
    /// Executes the read-only call as of the block. Failures and empty results yield `None`.
    ///
    pub fn call(&self, to: web3::types::Address, data: Vec<u8>, block: u64) -> Option<Vec<u8>> {
        match self.client.call(&CallRequest::new(to, data), block) {
            Ok(output) if !output.is_empty() => Some(output),
            Ok(_) => None,
            Err(error) => {
                tracing::debug!("Proxy resolution call to {to:?}: {error}");
                None
            }
        }
    }

    ///
    /// Counts the call as unresolved.
    ///
    pub fn mark_unresolved(&mut self) {
        *self.unresolved_calls += 1;
    }
}

///
/// The proxied call resolver.
///
/// The strategy is selected once on construction.
///
pub struct ProxyResolver {
    /// The resolution strategy.
    resolve: Box<ResolveFn>,
    /// The number of calls which could not be attributed.
    unresolved_calls: usize,
}

impl std::fmt::Debug for ProxyResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyResolver")
            .field("unresolved_calls", &self.unresolved_calls)
            .finish_non_exhaustive()
    }
}

impl Default for ProxyResolver {
    fn default() -> Self {
        Self::new(ProxyResolverKind::Default)
    }
}

impl ProxyResolver {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(kind: ProxyResolverKind) -> Self {
        let resolve: Box<ResolveFn> = match kind {
            ProxyResolverKind::Default => Box::new(resolve_by_selector),
            ProxyResolverKind::EtherRouter => Box::new(ether_router::resolve),
            ProxyResolverKind::Custom(resolve) => resolve,
        };
        Self {
            resolve,
            unresolved_calls: 0,
        }
    }

    ///
    /// Resolves the target of the call the catalog cannot attribute directly.
    ///
    pub fn resolve(
        &mut self,
        catalog: &mut Catalog,
        client: &dyn Client,
        transaction: &Transaction,
    ) -> Option<Resolution> {
        let mut context = Context {
            catalog,
            client,
            unresolved_calls: &mut self.unresolved_calls,
        };
        (self.resolve)(&mut context, transaction)
    }

    ///
    /// Counts the call as unresolved.
    ///
    pub fn mark_unresolved(&mut self) {
        self.unresolved_calls += 1;
    }

    ///
    /// Returns the number of calls which could not be attributed.
    ///
    pub fn unresolved_calls(&self) -> usize {
        self.unresolved_calls
    }
}

///
/// Attributes the call to the first contract with the called selector.
///
/// Contracts sharing a selector are indistinguishable here, so the earliest registered wins.
///
pub fn resolve_by_selector(context: &mut Context<'_>, transaction: &Transaction) -> Option<Resolution> {
    let selector = transaction.selector()?;
    context
        .first_contract_with_selector(selector)
        .map(Resolution::Name)
}
