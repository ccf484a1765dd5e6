//!
//! The contract method selector.
//!

use std::str::FromStr;

///
/// The 4-byte contract method selector.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// The selector byte length.
    pub const LENGTH: usize = 4;

    ///
    /// Computes the selector of a canonical method signature.
    ///
    pub fn from_signature(signature: &str) -> Self {
        Self(crate::utils::selector(signature))
    }

    ///
    /// Extracts the selector from the transaction input.
    ///
    /// Returns `None` if the input is too short to carry a selector.
    ///
    pub fn from_input(input: &[u8]) -> Option<Self> {
        input
            .get(..Self::LENGTH)
            .map(|bytes| Self(bytes.try_into().expect("Always valid")))
    }

    ///
    /// Returns the selector bytes.
    ///
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl FromStr for Selector {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(crate::utils::hex_normalized(string))
            .map_err(|error| anyhow::anyhow!("Selector `{string}` is not hexadecimal: {error}"))?;
        let bytes: [u8; 4] = bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("Selector `{string}` must be 4 bytes long"))?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl serde::Serialize for Selector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}
