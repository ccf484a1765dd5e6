//!
//! The contract catalog.
//!


pub mod identity;
pub mod method;

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;

use crate::abi::selector::Selector;
use crate::artifacts::ArtifactSource;
use crate::artifacts::ContractArtifact;
use crate::artifacts::SolcInfo;
use crate::bytecode::BytecodePattern;
use crate::client::Client;
use crate::ledger::DeploymentEntry;
use crate::ledger::GasLedger;

use self::identity::IdentityCache;
use self::method::MethodDescriptor;
use self::method::MethodId;
use self::method::MethodSignature;

///
/// The compiled contract known to the catalog.
///
#[derive(Debug, Clone)]
pub struct ContractRecord {
    /// The contract name.
    pub name: String,
    /// The tracked functions by selector.
    pub method_table: BTreeMap<Selector, MethodSignature>,
    /// The creation bytecode, which may carry library placeholders.
    pub bytecode: String,
    /// The runtime bytecode, which may carry library placeholders.
    pub deployed_bytecode: String,
    /// The creation bytecode pattern.
    pub bytecode_pattern: BytecodePattern,
    /// The runtime bytecode pattern.
    pub deployed_bytecode_pattern: BytecodePattern,
    /// The address of the pre-existing deployment.
    pub pre_deployed_address: Option<web3::types::Address>,
}

impl ContractRecord {
    ///
    /// Builds the record from the artifact.
    ///
    pub fn new(name: &str, artifact: &ContractArtifact) -> anyhow::Result<Self> {
        let method_table = artifact
            .abi
            .iter()
            .filter_map(|entry| {
                let signature = MethodSignature::from_entry(entry)?;
                let selector = Selector::from_signature(signature.signature.as_str());
                Some((selector, signature))
            })
            .collect();

        Ok(Self {
            name: name.to_owned(),
            method_table,
            bytecode: artifact.bytecode.clone(),
            deployed_bytecode: artifact.deployed_bytecode.clone(),
            bytecode_pattern: BytecodePattern::new(artifact.bytecode.as_str())?,
            deployed_bytecode_pattern: BytecodePattern::new(artifact.deployed_bytecode.as_str())?,
            pre_deployed_address: artifact.deployed.as_ref().map(|deployed| deployed.address),
        })
    }

    ///
    /// Returns the methods whose gas is tracked.
    ///
    pub fn tracked_methods(&self) -> impl Iterator<Item = MethodDescriptor> + '_ {
        self.method_table
            .iter()
            .map(|(selector, signature)| {
                MethodDescriptor::new(self.name.as_str(), *selector, signature)
            })
    }
}

///
/// The contract catalog.
///
/// Holds the compiled contracts of the project and resolves on-chain addresses to them.
///
#[derive(Debug, Default)]
pub struct Catalog {
    /// The contract records in registration order.
    records: Vec<ContractRecord>,
    /// The contract record indexes by name.
    record_index: HashMap<String, usize>,
    /// The tracked methods in registration order.
    methods: Vec<MethodDescriptor>,
    /// The tracked method indexes by identifier.
    method_index: HashMap<MethodId, usize>,
    /// The address identity cache.
    identity: IdentityCache,
    /// The pre-existing deployment transactions, whose gas is already recorded.
    pre_deployed_transactions: HashSet<web3::types::H256>,
    /// The compiler settings of the first artifact providing them.
    solc: Option<SolcInfo>,
    /// Whether the catalog has been initialized.
    is_initialized: bool,
}

impl Catalog {
    ///
    /// Loads the contracts and records the gas of their pre-existing deployments.
    ///
    /// Contracts without artifacts, with malformed artifacts, and interfaces are skipped.
    /// Client failures are fatal.
    ///
    pub fn initialize(
        &mut self,
        client: &dyn Client,
        names: &[String],
        artifacts: &dyn ArtifactSource,
        ledger: &mut GasLedger,
    ) -> anyhow::Result<()> {
        if self.is_initialized {
            anyhow::bail!("The contract catalog is already initialized");
        }
        self.is_initialized = true;

        let block = client
            .latest_block()
            .map_err(|error| anyhow::anyhow!("Block gas limit reading: {error}"))?;
        ledger.set_block_gas_limit(block.gas_limit);

        for name in names.iter() {
            if self.record_index.contains_key(name.as_str()) {
                tracing::debug!("Contract `{name}` is defined more than once");
                continue;
            }

            let artifact = match artifacts.load(name.as_str()) {
                Ok(artifact) => artifact,
                Err(error) if error.is_not_found() => {
                    tracing::debug!("{error}");
                    continue;
                }
                Err(error) => {
                    tracing::warn!("Contract `{name}` is skipped: {error}");
                    continue;
                }
            };
            if artifact.is_interface() {
                tracing::debug!("Contract `{name}` is an interface");
                continue;
            }

            let record = match ContractRecord::new(name.as_str(), &artifact) {
                Ok(record) => record,
                Err(error) => {
                    tracing::warn!("Contract `{name}` is skipped: {error}");
                    continue;
                }
            };
            if self.solc.is_none() {
                self.solc = artifact.solc.clone();
            }
            self.register(record, ledger);

            if let Some(deployed) = artifact.deployed {
                let receipt = client.receipt(deployed.transaction_hash).map_err(|error| {
                    anyhow::anyhow!("Contract `{name}` deployment receipt reading: {error}")
                })?;
                match receipt {
                    Some(receipt) => {
                        ledger.record_deployment_gas(name.as_str(), receipt.gas_used);
                        self.pre_deployed_transactions
                            .insert(deployed.transaction_hash);
                        self.track_address(client, name.as_str(), deployed.address)?;
                    }
                    None => tracing::warn!(
                        "Contract `{name}` deployment transaction {:?} is not found",
                        deployed.transaction_hash
                    ),
                }
            }
        }

        tracing::debug!(
            "{} contracts with {} methods are loaded",
            self.records.len(),
            self.methods.len()
        );
        Ok(())
    }

    ///
    /// Adds the contract record, registering its deployment and methods in the ledger.
    ///
    pub fn register(&mut self, record: ContractRecord, ledger: &mut GasLedger) {
        if self.record_index.contains_key(record.name.as_str()) {
            return;
        }

        ledger.register_deployment(DeploymentEntry::new(
            record.name.clone(),
            record.bytecode.clone(),
            record.deployed_bytecode.clone(),
        ));
        for descriptor in record.tracked_methods() {
            if self.method_index.contains_key(&descriptor.id) {
                continue;
            }
            ledger.register_method(&descriptor);
            self.method_index
                .insert(descriptor.id.clone(), self.methods.len());
            self.methods.push(descriptor);
        }

        self.record_index
            .insert(record.name.clone(), self.records.len());
        self.records.push(record);
    }

    ///
    /// Returns the name of the contract at the address.
    ///
    /// Consults the address cache first, then the code hash cache.
    ///
    pub fn name_by_address(
        &mut self,
        client: &dyn Client,
        address: web3::types::Address,
    ) -> anyhow::Result<Option<String>> {
        if let Some(name) = self.identity.get(&address) {
            return Ok(Some(name.to_owned()));
        }
        let code = client
            .code(address)
            .map_err(|error| anyhow::anyhow!("Code reading at {address:?}: {error}"))?;
        Ok(self.identity.get_by_code(address, code.as_slice()))
    }

    ///
    /// Remembers the contract deployed at the address. Known addresses are left intact.
    ///
    pub fn track_address(
        &mut self,
        client: &dyn Client,
        name: &str,
        address: web3::types::Address,
    ) -> anyhow::Result<()> {
        if self.identity.contains(&address) {
            return Ok(());
        }
        let code = client
            .code(address)
            .map_err(|error| anyhow::anyhow!("Code reading at {address:?}: {error}"))?;
        self.identity.insert(address, name, code.as_slice());
        Ok(())
    }

    ///
    /// Returns the name of the contract at the address, matching the deployed code against
    /// the runtime bytecode of known contracts if the address is not cached yet.
    ///
    pub fn identify(
        &mut self,
        client: &dyn Client,
        address: web3::types::Address,
    ) -> anyhow::Result<Option<String>> {
        if let Some(name) = self.identity.get(&address) {
            return Ok(Some(name.to_owned()));
        }
        let code = client
            .code(address)
            .map_err(|error| anyhow::anyhow!("Code reading at {address:?}: {error}"))?;
        if let Some(name) = self.identity.get_by_code(address, code.as_slice()) {
            return Ok(Some(name));
        }

        let name = match self.find_deployment_by_deployed_bytecode(code.as_slice()) {
            Some(record) => record.name.clone(),
            None => return Ok(None),
        };
        self.identity
            .insert(address, name.as_str(), code.as_slice());
        Ok(Some(name))
    }

    ///
    /// Finds the contract whose creation bytecode the deployment input starts with.
    ///
    /// Interfaces never match.
    ///
    pub fn find_deployment_by_input_bytecode(&self, input: &[u8]) -> Option<&ContractRecord> {
        if input.is_empty() {
            return None;
        }
        let input = hex::encode(input);
        self.records.iter().find(|record| {
            !record.bytecode_pattern.is_empty() && record.bytecode_pattern.matches(input.as_str())
        })
    }

    ///
    /// Finds the contract whose runtime bytecode matches the code deployed at an address.
    ///
    /// Interfaces never match.
    ///
    pub fn find_deployment_by_deployed_bytecode(&self, code: &[u8]) -> Option<&ContractRecord> {
        if code.is_empty() {
            return None;
        }
        let code = hex::encode(code);
        self.records.iter().find(|record| {
            !record.deployed_bytecode_pattern.is_empty()
                && record.deployed_bytecode_pattern.matches(code.as_str())
        })
    }

    ///
    /// Returns the tracked methods with the selector in registration order.
    ///
    pub fn find_methods_by_selector(&self, selector: Selector) -> Vec<&MethodDescriptor> {
        self.methods
            .iter()
            .filter(|method| method.selector == selector)
            .collect()
    }

    ///
    /// Returns the tracked method.
    ///
    pub fn method(&self, id: &MethodId) -> Option<&MethodDescriptor> {
        self.method_index.get(id).map(|index| &self.methods[*index])
    }

    ///
    /// Returns the contract record.
    ///
    pub fn record(&self, name: &str) -> Option<&ContractRecord> {
        self.record_index
            .get(name)
            .map(|index| &self.records[*index])
    }

    ///
    /// Whether the transaction is a pre-existing deployment whose gas is already recorded.
    ///
    pub fn is_pre_deployed(&self, transaction_hash: &web3::types::H256) -> bool {
        self.pre_deployed_transactions.contains(transaction_hash)
    }

    ///
    /// Returns the compiler settings.
    ///
    pub fn solc(&self) -> Option<&SolcInfo> {
        self.solc.as_ref()
    }

    ///
    /// Returns the number of known contracts.
    ///
    pub fn len(&self) -> usize {
        self.records.len()
    }

    ///
    /// Whether no contracts are known.
    ///
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
