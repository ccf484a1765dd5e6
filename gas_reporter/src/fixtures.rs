//!
//! The contract fixtures shared by tests.
//!

use crate::abi::selector::Selector;
use crate::artifacts::error::Error;
use crate::artifacts::ContractArtifact;
use crate::artifacts::Deployed;

/// The `Wallet` creation bytecode, linking a library.
pub const WALLET_BYTECODE: &str =
    "0x608060405234801561001057600080fd5b5073__MathLib_______________________________63a5f3c23b";
/// The `Wallet` runtime bytecode.
pub const WALLET_CODE: &str = "0x6080604052600436106100415760003560e01c806390b98a11";

/// The `Token` creation bytecode.
pub const TOKEN_BYTECODE: &str = "0x608060405234801561001057600080fd5b506102a4806100206000396000f3fe";
/// The `Token` runtime bytecode.
pub const TOKEN_CODE: &str = "0x6080604052600436106100415760003560e01c8063a9059cbb";

/// The `Proxy` creation bytecode.
pub const PROXY_BYTECODE: &str = "0x608060405234801561001057600080fd5b5061013b806100206000396000f3fe";
/// The `Proxy` runtime bytecode.
pub const PROXY_CODE: &str = "0x60806040526004361061001e5760003560e01c806304f3bcec";

/// The `VersionA` creation bytecode.
pub const VERSION_A_BYTECODE: &str =
    "0x608060405234801561001057600080fd5b50610152806100206000396000f3fe";
/// The `VersionA` runtime bytecode.
pub const VERSION_A_CODE: &str = "0x6080604052348015600f57600080fd5b5060043610602b5760003560e01c80635524";

/// The `VersionB` creation bytecode.
pub const VERSION_B_BYTECODE: &str =
    "0x608060405234801561001057600080fd5b5061017c806100206000396000f3fe";
/// The `VersionB` runtime bytecode.
pub const VERSION_B_CODE: &str = "0x6080604052348015600f57600080fd5b5060043610603c5760003560e01c80635524";

/// The `Resolver` creation bytecode.
pub const RESOLVER_BYTECODE: &str =
    "0x608060405234801561001057600080fd5b5061031d806100206000396000f3fe";
/// The `Resolver` runtime bytecode.
pub const RESOLVER_CODE: &str = "0x6080604052348015600f57600080fd5b5060043610603c5760003560e01c8063a3";

///
/// Builds the artifact from the ABI and the bytecode.
///
pub fn artifact(abi: serde_json::Value, bytecode: &str, deployed_bytecode: &str) -> ContractArtifact {
    ContractArtifact {
        abi: serde_json::from_value(abi).expect("Always valid"),
        bytecode: bytecode.to_owned(),
        deployed_bytecode: deployed_bytecode.to_owned(),
        deployed: None,
        solc: None,
    }
}

///
/// The wallet with a state-changing method, a view, and an event.
///
pub fn wallet() -> ContractArtifact {
    artifact(
        serde_json::json!([
            { "type": "function", "name": "sendCoin", "inputs": [{ "type": "address" }, { "type": "uint256" }], "stateMutability": "nonpayable" },
            { "type": "function", "name": "getBalance", "inputs": [{ "type": "address" }], "stateMutability": "view" },
            { "type": "event", "name": "Transfer", "inputs": [{ "type": "address" }, { "type": "address" }, { "type": "uint256" }] }
        ]),
        WALLET_BYTECODE,
        WALLET_CODE,
    )
}

///
/// The token sharing the `sendCoin` selector with the wallet.
///
pub fn token() -> ContractArtifact {
    artifact(
        serde_json::json!([
            { "type": "function", "name": "transfer", "inputs": [{ "type": "address" }, { "type": "uint256" }], "stateMutability": "nonpayable" },
            { "type": "function", "name": "sendCoin", "inputs": [{ "type": "address" }, { "type": "uint256" }], "stateMutability": "nonpayable" }
        ]),
        TOKEN_BYTECODE,
        TOKEN_CODE,
    )
}

///
/// The token interface.
///
pub fn token_interface() -> ContractArtifact {
    artifact(
        serde_json::json!([
            { "type": "function", "name": "transfer", "inputs": [{ "type": "address" }, { "type": "uint256" }], "stateMutability": "nonpayable" }
        ]),
        "0x",
        "0x",
    )
}

///
/// The routing proxy, which has no `setValue` of its own.
///
pub fn proxy() -> ContractArtifact {
    artifact(
        serde_json::json!([
            { "type": "function", "name": "resolver", "inputs": [], "stateMutability": "view" },
            { "type": "function", "name": "setResolver", "inputs": [{ "type": "address" }], "stateMutability": "nonpayable" },
            { "type": "fallback", "stateMutability": "payable" }
        ]),
        PROXY_BYTECODE,
        PROXY_CODE,
    )
}

///
/// The implementation the proxy routes `setValue` to before the upgrade.
///
pub fn version_a() -> ContractArtifact {
    artifact(
        serde_json::json!([
            { "type": "function", "name": "setValue", "inputs": [{ "type": "uint256" }], "stateMutability": "nonpayable" }
        ]),
        VERSION_A_BYTECODE,
        VERSION_A_CODE,
    )
}

///
/// The implementation the proxy routes `setValue` to.
///
pub fn version_b() -> ContractArtifact {
    artifact(
        serde_json::json!([
            { "type": "function", "name": "setValue", "inputs": [{ "type": "uint256" }], "stateMutability": "nonpayable" }
        ]),
        VERSION_B_BYTECODE,
        VERSION_B_CODE,
    )
}

///
/// The routing table.
///
pub fn resolver() -> ContractArtifact {
    artifact(
        serde_json::json!([
            { "type": "function", "name": "lookup", "inputs": [{ "type": "bytes4" }], "stateMutability": "view" },
            { "type": "function", "name": "register", "inputs": [{ "type": "string" }, { "type": "address" }], "stateMutability": "nonpayable" }
        ]),
        RESOLVER_BYTECODE,
        RESOLVER_CODE,
    )
}

///
/// Marks the artifact as deployed before the test run.
///
pub fn pre_deployed(
    mut artifact: ContractArtifact,
    address: web3::types::Address,
    transaction_hash: web3::types::H256,
) -> ContractArtifact {
    artifact.deployed = Some(Deployed {
        address,
        transaction_hash,
    });
    artifact
}

///
/// Creates the artifact source over the named artifacts.
///
pub fn source(
    artifacts: Vec<(&'static str, ContractArtifact)>,
) -> impl Fn(&str) -> Result<ContractArtifact, Error> {
    move |name: &str| {
        artifacts
            .iter()
            .find(|(artifact_name, _)| *artifact_name == name)
            .map(|(_, artifact)| artifact.clone())
            .ok_or_else(|| Error::NotFound {
                name: name.to_owned(),
            })
    }
}

///
/// Converts the contract names.
///
pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

///
/// Returns the raw bytes of the hexadecimal string.
///
pub fn bytes(hex: &str) -> Vec<u8> {
    hex::decode(crate::utils::hex_normalized(hex)).expect("Always valid")
}

///
/// Builds the call data with zeroed arguments.
///
pub fn call_data(signature: &str, arguments: usize) -> Vec<u8> {
    let mut data = Selector::from_signature(signature).as_bytes().to_vec();
    data.extend(vec![0u8; arguments * crate::utils::BYTE_LENGTH_FIELD]);
    data
}

///
/// Left-pads the address into an ABI word.
///
pub fn address_word(address: web3::types::Address) -> Vec<u8> {
    let mut word = vec![0u8; crate::utils::BYTE_LENGTH_FIELD - crate::utils::BYTE_LENGTH_ETH_ADDRESS];
    word.extend_from_slice(address.as_bytes());
    word
}

///
/// Links the library address into the `Wallet` creation bytecode.
///
pub fn linked_wallet_bytecode(library: web3::types::Address) -> String {
    WALLET_BYTECODE.replace(
        "__MathLib_______________________________",
        hex::encode(library.as_bytes()).as_str(),
    )
}
