//!
//! The Solidity source listing.
//!

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

/// The block and line comments.
static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("Always valid"));

/// The contract, library, and interface definitions.
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:abstract\s+)?(?:contract|library|interface)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*(?:is\b|\{)",
    )
    .expect("Always valid")
});

///
/// Lists the names of contracts defined in the Solidity files of the directory.
///
/// Names from the exclusion list are skipped. Each name is listed once, in the order
/// of first definition.
///
pub fn list_contracts(directory: &Path, exclude: &[String]) -> anyhow::Result<Vec<String>> {
    let pattern = format!(
        "{}/**/*.sol",
        glob::Pattern::escape(directory.to_string_lossy().as_ref())
    );
    let mut paths: Vec<_> = glob::glob(pattern.as_str())
        .map_err(|error| anyhow::anyhow!("Source pattern `{pattern}` is invalid: {error}"))?
        .filter_map(Result::ok)
        .collect();
    paths.sort();

    let mut names: Vec<String> = Vec::new();
    for path in paths.into_iter() {
        let code = match std::fs::read_to_string(path.as_path()) {
            Ok(code) => code,
            Err(error) => {
                tracing::warn!("Source file {path:?} is skipped: {error}");
                continue;
            }
        };

        for name in contract_names(code.as_str()).into_iter() {
            if exclude.contains(&name) || names.contains(&name) {
                continue;
            }
            names.push(name);
        }
    }

    Ok(names)
}

///
/// Extracts the contract names defined in the Solidity code.
///
pub fn contract_names(code: &str) -> Vec<String> {
    let code = COMMENT.replace_all(code, " ");
    DEFINITION
        .captures_iter(code.as_ref())
        .map(|captures| captures[1].to_owned())
        .collect()
}
