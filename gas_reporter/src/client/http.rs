//!
//! The blocking JSON-RPC client over HTTP.
//!

use std::str::FromStr;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use super::error::Error;
use super::types::Block;
use super::types::CallRequest;
use super::types::Receipt;
use super::types::Transaction;
use super::Client;

///
/// The JSON-RPC request envelope.
///
#[derive(Debug, Serialize)]
struct Request<'a, P> {
    /// The protocol version.
    jsonrpc: &'static str,
    /// The method name.
    method: &'a str,
    /// The method parameters.
    params: P,
    /// The request identifier.
    id: u64,
}

///
/// The JSON-RPC response envelope.
///
#[derive(Debug, Deserialize)]
struct Response {
    /// The method result. `null` if the entity is not found.
    #[serde(default)]
    result: serde_json::Value,
    /// The error object.
    #[serde(default)]
    error: Option<ResponseError>,
}

///
/// The JSON-RPC error object.
///
#[derive(Debug, Deserialize)]
struct ResponseError {
    /// The error code.
    code: i64,
    /// The error message.
    message: String,
}

///
/// The blocking JSON-RPC client over HTTP.
///
/// `reqwest` runs its asynchronous machinery on a background thread and parks the caller
/// until the response arrives.
///
#[derive(Debug)]
pub struct HttpClient {
    /// The `reqwest` HTTP client.
    http_client: reqwest::blocking::Client,
    /// The client endpoint.
    url: reqwest::Url,
    /// The next request identifier.
    next_id: AtomicU64,
}

impl HttpClient {
    /// The default client endpoint.
    pub const DEFAULT_URL: &'static str = "http://localhost:8545";

    /// The connection timeout.
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

    /// The empty parameter list, which must be serialized as `[]` rather than `null`.
    const NO_PARAMS: [(); 0] = [];

    ///
    /// A shortcut constructor.
    ///
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let url = Self::normalize_url(url);
        let url = reqwest::Url::from_str(url.as_str())
            .map_err(|error| anyhow::anyhow!("Client URL `{url}` is invalid: {error}"))?;

        let mut http_client_builder = reqwest::blocking::ClientBuilder::new();
        http_client_builder = http_client_builder.connect_timeout(Self::CONNECT_TIMEOUT);
        http_client_builder = http_client_builder.pool_idle_timeout(Self::CONNECT_TIMEOUT);
        http_client_builder = http_client_builder.timeout(None);
        let http_client = http_client_builder.build()?;

        Ok(Self {
            http_client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    ///
    /// Replaces the WebSocket scheme with its HTTP counterpart.
    ///
    pub fn normalize_url(url: &str) -> String {
        if let Some(rest) = url.strip_prefix("ws://") {
            format!("http://{rest}")
        } else if let Some(rest) = url.strip_prefix("wss://") {
            format!("https://{rest}")
        } else {
            url.to_owned()
        }
    }

    ///
    /// Sends a JSON-RPC request and decodes its result.
    ///
    fn request<P, R>(&self, method: &'static str, params: P) -> Result<R, Error>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = Request {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let response: Response = self
            .http_client
            .post(self.url.clone())
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = response.error {
            return Err(Error::Rpc {
                method,
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(response.result).map_err(|error| Error::Decoding { method, error })
    }

    ///
    /// Formats the block number as a JSON-RPC block tag.
    ///
    fn block_tag(number: u64) -> web3::types::BlockNumber {
        web3::types::BlockNumber::Number(web3::types::U64::from(number))
    }
}

impl Client for HttpClient {
    fn latest_block_number(&self) -> Result<u64, Error> {
        let number: web3::types::U64 = self.request("eth_blockNumber", Self::NO_PARAMS)?;
        Ok(number.as_u64())
    }

    fn latest_block(&self) -> Result<Block, Error> {
        let block: Option<web3::types::Block<web3::types::H256>> = self.request(
            "eth_getBlockByNumber",
            (web3::types::BlockNumber::Latest, false),
        )?;
        let block = block.ok_or_else(|| Error::Malformed {
            method: "eth_getBlockByNumber",
            reason: "the latest block is missing".to_owned(),
        })?;
        Block::try_from(block)
    }

    fn block(&self, number: u64) -> Result<Option<Block>, Error> {
        let block: Option<web3::types::Block<web3::types::H256>> =
            self.request("eth_getBlockByNumber", (Self::block_tag(number), false))?;
        block.map(Block::try_from).transpose()
    }

    fn transaction(&self, hash: web3::types::H256) -> Result<Option<Transaction>, Error> {
        let transaction: Option<web3::types::Transaction> =
            self.request("eth_getTransactionByHash", (hash,))?;
        transaction.map(Transaction::try_from).transpose()
    }

    fn receipt(&self, hash: web3::types::H256) -> Result<Option<Receipt>, Error> {
        let receipt: Option<web3::types::TransactionReceipt> =
            self.request("eth_getTransactionReceipt", (hash,))?;
        receipt.map(Receipt::try_from).transpose()
    }

    fn code(&self, address: web3::types::Address) -> Result<Vec<u8>, Error> {
        let code: web3::types::Bytes = self.request(
            "eth_getCode",
            (address, web3::types::BlockNumber::Latest),
        )?;
        Ok(code.0)
    }

    fn call(&self, request: &CallRequest, block: u64) -> Result<Vec<u8>, Error> {
        let call = web3::types::CallRequest {
            to: Some(request.to),
            data: Some(web3::types::Bytes(request.data.clone())),
            ..Default::default()
        };
        let result: web3::types::Bytes =
            self.request("eth_call", (call, Self::block_tag(block)))?;
        Ok(result.0)
    }

    fn network_id(&self) -> Result<String, Error> {
        self.request("net_version", Self::NO_PARAMS)
    }
}

#[cfg(test)]
mod tests {
    use super::HttpClient;

    #[test]
    fn normalize_url() {
        assert_eq!(
            HttpClient::normalize_url("ws://localhost:8545"),
            "http://localhost:8545"
        );
        assert_eq!(
            HttpClient::normalize_url("wss://node.example:443/rpc"),
            "https://node.example:443/rpc"
        );
        assert_eq!(
            HttpClient::normalize_url(HttpClient::DEFAULT_URL),
            HttpClient::DEFAULT_URL
        );
    }

    #[test]
    fn invalid_url() {
        assert!(HttpClient::new("not a url").is_err());
    }
}
