//!
//! The contract ABI.
//!

pub mod selector;

use serde::Deserialize;

use self::selector::Selector;

///
/// The ABI entry type.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A contract function. The ABI specification makes it the default.
    #[default]
    Function,
    /// An event.
    Event,
    /// A custom error.
    Error,
    /// The constructor.
    Constructor,
    /// The fallback function.
    Fallback,
    /// The receive function.
    Receive,
    /// Anything newer compilers may emit.
    #[serde(other)]
    Other,
}

///
/// The ABI entry parameter.
///
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// The parameter type, e.g. `uint256` or `tuple[]`.
    #[serde(rename = "type")]
    pub r#type: String,
    /// The tuple components.
    #[serde(default)]
    pub components: Vec<Parameter>,
}

impl Parameter {
    ///
    /// Returns the canonical type used in method signatures.
    ///
    /// Tuples are expanded into their component types, keeping the array suffix.
    ///
    pub fn canonical_type(&self) -> String {
        match self.r#type.strip_prefix("tuple") {
            Some(suffix) => format!(
                "({}){suffix}",
                self.components
                    .iter()
                    .map(Parameter::canonical_type)
                    .collect::<Vec<String>>()
                    .join(",")
            ),
            None => self.r#type.clone(),
        }
    }
}

///
/// The ABI entry.
///
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// The entry type.
    #[serde(rename = "type", default)]
    pub r#type: EntryType,
    /// The entry name. Absent for constructors, fallbacks, and receive functions.
    #[serde(default)]
    pub name: Option<String>,
    /// The input parameters.
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    /// The legacy constant flag.
    #[serde(default)]
    pub constant: Option<bool>,
    /// The state mutability.
    #[serde(default)]
    pub state_mutability: Option<String>,
}

impl Entry {
    ///
    /// Whether the entry is a read-only call.
    ///
    pub fn is_constant(&self) -> bool {
        self.constant.unwrap_or_default()
            || matches!(self.state_mutability.as_deref(), Some("view" | "pure"))
    }

    ///
    /// Whether the entry is an event.
    ///
    pub fn is_event(&self) -> bool {
        self.r#type == EntryType::Event
    }

    ///
    /// Returns the canonical signature, e.g. `transfer(address,uint256)`.
    ///
    pub fn signature(&self) -> Option<String> {
        let name = self.name.as_deref().filter(|name| !name.is_empty())?;
        Some(format!(
            "{name}({})",
            self.inputs
                .iter()
                .map(Parameter::canonical_type)
                .collect::<Vec<String>>()
                .join(",")
        ))
    }

    ///
    /// Returns the method selector.
    ///
    pub fn selector(&self) -> Option<Selector> {
        self.signature()
            .map(|signature| Selector::from_signature(signature.as_str()))
    }

    ///
    /// Whether the entry is a named, state-changing function, that is, one worth tracking.
    ///
    pub fn is_tracked_method(&self) -> bool {
        self.r#type == EntryType::Function
            && !self.is_constant()
            && !self.is_event()
            && self.signature().is_some()
    }
}
