//!
//! The contract method identity.
//!

use serde::Serialize;

use crate::abi::selector::Selector;
use crate::abi::Entry;

///
/// The method identifier, that is, the contract name and the method selector joined with `_`.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MethodId(String);

impl MethodId {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(contract: &str, selector: Selector) -> Self {
        Self(format!("{contract}_{selector}"))
    }

    ///
    /// Returns the identifier string.
    ///
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for MethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// The ABI method table entry.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// The method name.
    pub name: String,
    /// The canonical signature.
    pub signature: String,
}

impl MethodSignature {
    ///
    /// Extracts the state-changing function from the ABI.
    ///
    /// Events, errors, constructors, fallbacks and read-only functions yield `None`.
    ///
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        if !entry.is_tracked_method() {
            return None;
        }
        Some(Self {
            name: entry.name.clone()?,
            signature: entry.signature()?,
        })
    }
}

///
/// The tracked method of a known contract.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// The method identifier.
    pub id: MethodId,
    /// The contract name.
    pub contract: String,
    /// The method name.
    pub method: String,
    /// The canonical signature.
    pub signature: String,
    /// The method selector.
    pub selector: Selector,
}

impl MethodDescriptor {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(contract: &str, selector: Selector, signature: &MethodSignature) -> Self {
        Self {
            id: MethodId::new(contract, selector),
            contract: contract.to_owned(),
            method: signature.name.clone(),
            signature: signature.signature.clone(),
            selector,
        }
    }
}
