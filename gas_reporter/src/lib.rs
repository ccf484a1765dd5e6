//!
//! The gas reporter library.
//!

pub mod abi;
pub mod artifacts;
pub mod bytecode;
pub mod catalog;
pub mod client;
pub mod config;
pub mod ledger;
pub mod report;
pub mod reporter;
pub mod resolver;
pub mod scanner;
pub mod sources;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::artifacts::ArtifactSource;
pub use self::artifacts::ArtifactType;
pub use self::catalog::Catalog;
pub use self::client::http::HttpClient;
pub use self::client::Client;
pub use self::config::Config;
pub use self::ledger::GasLedger;
pub use self::report::json::Json;
pub use self::report::Report;
pub use self::reporter::GasReporter;
pub use self::resolver::ProxyResolver;
pub use self::resolver::ProxyResolverKind;
pub use self::scanner::BlockRangeScanner;
