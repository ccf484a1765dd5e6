//!
//! The gas ledger.
//!

pub mod statistics;

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Serialize;

use crate::abi::selector::Selector;
use crate::catalog::method::MethodDescriptor;
use crate::catalog::method::MethodId;

use self::statistics::Statistics;

///
/// The gas usage of a contract method.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodEntry {
    /// The contract name.
    pub contract: String,
    /// The method name.
    pub method: String,
    /// The canonical signature.
    pub signature: String,
    /// The method selector.
    pub selector: Selector,
    /// The gas samples in recording order.
    pub gas_samples: Vec<u64>,
    /// The number of recorded calls.
    pub calls: usize,
}

impl MethodEntry {
    ///
    /// Returns the statistics of the samples, if any.
    ///
    pub fn statistics(&self) -> Option<Statistics> {
        Statistics::from_samples(self.gas_samples.as_slice())
    }
}

impl From<&MethodDescriptor> for MethodEntry {
    fn from(descriptor: &MethodDescriptor) -> Self {
        Self {
            contract: descriptor.contract.clone(),
            method: descriptor.method.clone(),
            signature: descriptor.signature.clone(),
            selector: descriptor.selector,
            gas_samples: vec![],
            calls: 0,
        }
    }
}

///
/// The gas usage of contract deployments.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEntry {
    /// The contract name.
    pub name: String,
    /// The creation bytecode.
    #[serde(skip)]
    pub bytecode: String,
    /// The runtime bytecode.
    #[serde(skip)]
    pub deployed_bytecode: String,
    /// The gas samples in recording order.
    pub gas_samples: Vec<u64>,
}

impl DeploymentEntry {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(name: String, bytecode: String, deployed_bytecode: String) -> Self {
        Self {
            name,
            bytecode,
            deployed_bytecode,
            gas_samples: vec![],
        }
    }

    ///
    /// Returns the statistics of the samples, if any.
    ///
    pub fn statistics(&self) -> Option<Statistics> {
        Statistics::from_samples(self.gas_samples.as_slice())
    }
}

///
/// The read-only copy of the ledger for reporting.
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The method entries.
    pub methods: BTreeMap<MethodId, MethodEntry>,
    /// The deployment entries in registration order.
    pub deployments: Vec<DeploymentEntry>,
    /// The block gas limit.
    pub block_gas_limit: u64,
}

///
/// The gas ledger.
///
/// Gas samples are only ever appended. Statistics are computed when reporting.
///
#[derive(Debug, Default, Clone)]
pub struct GasLedger {
    /// The method entries.
    methods: BTreeMap<MethodId, MethodEntry>,
    /// The deployment entries in registration order.
    deployments: Vec<DeploymentEntry>,
    /// The deployment entry indexes by contract name.
    deployment_index: HashMap<String, usize>,
    /// The block gas limit.
    block_gas_limit: u64,
}

impl GasLedger {
    ///
    /// Registers the method. Registering an existing method has no effect.
    ///
    pub fn register_method(&mut self, descriptor: &MethodDescriptor) {
        self.methods
            .entry(descriptor.id.clone())
            .or_insert_with(|| MethodEntry::from(descriptor));
    }

    ///
    /// Registers the deployment. Registering an existing deployment has no effect.
    ///
    pub fn register_deployment(&mut self, entry: DeploymentEntry) {
        if self.deployment_index.contains_key(entry.name.as_str()) {
            return;
        }
        self.deployment_index
            .insert(entry.name.clone(), self.deployments.len());
        self.deployments.push(entry);
    }

    ///
    /// Appends the gas sample to the method and counts the call.
    ///
    /// Returns `false` if the method is not registered.
    ///
    pub fn record_method_gas(&mut self, id: &MethodId, gas: u64) -> bool {
        match self.methods.get_mut(id) {
            Some(entry) => {
                entry.gas_samples.push(gas);
                entry.calls += 1;
                true
            }
            None => false,
        }
    }

    ///
    /// Appends the gas sample to the deployment.
    ///
    /// Returns `false` if the deployment is not registered.
    ///
    pub fn record_deployment_gas(&mut self, name: &str, gas: u64) -> bool {
        match self.deployment_index.get(name) {
            Some(index) => {
                self.deployments[*index].gas_samples.push(gas);
                true
            }
            None => false,
        }
    }

    ///
    /// Sets the block gas limit.
    ///
    pub fn set_block_gas_limit(&mut self, block_gas_limit: u64) {
        self.block_gas_limit = block_gas_limit;
    }

    ///
    /// Returns the method entry.
    ///
    pub fn method(&self, id: &MethodId) -> Option<&MethodEntry> {
        self.methods.get(id)
    }

    ///
    /// Returns the deployment entry.
    ///
    pub fn deployment(&self, name: &str) -> Option<&DeploymentEntry> {
        self.deployment_index
            .get(name)
            .map(|index| &self.deployments[*index])
    }

    ///
    /// Returns the block gas limit.
    ///
    pub fn block_gas_limit(&self) -> u64 {
        self.block_gas_limit
    }

    ///
    /// Copies the ledger for reporting.
    ///
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            methods: self.methods.clone(),
            deployments: self.deployments.clone(),
            block_gas_limit: self.block_gas_limit,
        }
    }
}
