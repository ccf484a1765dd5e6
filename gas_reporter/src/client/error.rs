//!
//! The blockchain client error.
//!

///
/// The blockchain client error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP transport error.
    #[error("Client transport: {0}")]
    Transport(#[from] reqwest::Error),
    /// The JSON-RPC error object returned by the client.
    #[error("Client method `{method}` error {code}: {message}")]
    Rpc {
        /// The JSON-RPC method.
        method: &'static str,
        /// The JSON-RPC error code.
        code: i64,
        /// The JSON-RPC error message.
        message: String,
    },
    /// The response could not be decoded.
    #[error("Client method `{method}` response decoding: {error}")]
    Decoding {
        /// The JSON-RPC method.
        method: &'static str,
        /// The underlying JSON error.
        error: serde_json::Error,
    },
    /// The response is well-formed JSON but does not make sense.
    #[error("Client method `{method}` response is malformed: {reason}")]
    Malformed {
        /// The JSON-RPC method.
        method: &'static str,
        /// The description.
        reason: String,
    },
}
