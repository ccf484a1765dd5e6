//!
//! The gas report JSON export.
//!

use std::path::PathBuf;

use serde::Serialize;

use crate::artifacts::SolcInfo;
use crate::ledger::Snapshot;

use super::Report;

///
/// The serialized gas report.
///
#[derive(Debug, Clone)]
pub struct Json {
    /// The JSON text.
    pub content: String,
}

///
/// The exported document layout.
///
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    /// The ledger snapshot.
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    /// The compiler settings.
    solc: Option<&'a SolcInfo>,
    /// The number of calls which could not be attributed.
    unresolved_calls: usize,
}

impl Json {
    ///
    /// Writes the JSON text to a file.
    ///
    pub fn write_to_file(self, path: PathBuf) -> anyhow::Result<()> {
        std::fs::write(path.as_path(), self.content)
            .map_err(|error| anyhow::anyhow!("Report JSON file {path:?} writing: {error}"))?;
        Ok(())
    }
}

impl TryFrom<&Report> for Json {
    type Error = anyhow::Error;

    fn try_from(report: &Report) -> Result<Self, Self::Error> {
        let document = Document {
            snapshot: &report.snapshot,
            solc: report.solc.as_ref(),
            unresolved_calls: report.unresolved_calls,
        };
        let content = serde_json::to_string_pretty(&document)
            .map_err(|error| anyhow::anyhow!("Report serializing: {error}"))?;
        Ok(Self { content })
    }
}
