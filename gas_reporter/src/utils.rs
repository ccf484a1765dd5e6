//!
//! The gas reporter utils.
//!

use sha3::Digest;

/// The byte length of an EVM word.
pub const BYTE_LENGTH_FIELD: usize = 32;

/// The byte length of an Ethereum address.
pub const BYTE_LENGTH_ETH_ADDRESS: usize = 20;

///
/// Returns a `keccak256` selector of the specified contract method.
///
pub fn selector(signature: &str) -> [u8; 4] {
    let hash_bytes = sha3::Keccak256::digest(signature.as_bytes());
    hash_bytes[0..4].try_into().expect("Always valid")
}

///
/// Returns the `keccak256` hash of the specified data.
///
pub fn keccak256(data: &[u8]) -> web3::types::H256 {
    web3::types::H256::from_slice(sha3::Keccak256::digest(data).as_slice())
}

///
/// Converts the first word of an ABI-encoded return value into `Address`.
///
/// Returns `None` if the data is shorter than a word or the address is zero.
///
pub fn word_to_address(data: &[u8]) -> Option<web3::types::Address> {
    if data.len() < BYTE_LENGTH_FIELD {
        return None;
    }
    let address = web3::types::Address::from_slice(
        &data[BYTE_LENGTH_FIELD - BYTE_LENGTH_ETH_ADDRESS..BYTE_LENGTH_FIELD],
    );
    if address.is_zero() {
        return None;
    }
    Some(address)
}

///
/// Strips the optional `0x` prefix and lowercases a hexadecimal string.
///
pub fn hex_normalized(value: &str) -> String {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    #[test]
    fn selector_send_coin() {
        assert_eq!(
            super::selector("sendCoin(address,uint256)"),
            [0x90, 0xb9, 0x8a, 0x11]
        );
    }

    #[test]
    fn word_to_address_strips_padding() {
        let mut word = vec![0u8; 32];
        word[31] = 0x2a;
        assert_eq!(
            super::word_to_address(word.as_slice()),
            Some(web3::types::Address::from_low_u64_be(0x2a))
        );
    }

    #[test]
    fn word_to_address_rejects_empty_and_zero() {
        assert_eq!(super::word_to_address(&[]), None);
        assert_eq!(super::word_to_address(vec![0u8; 32].as_slice()), None);
    }

    #[test]
    fn hex_normalized() {
        assert_eq!(super::hex_normalized("0xABcd"), "abcd");
        assert_eq!(super::hex_normalized("ef01"), "ef01");
    }
}
