//! Argument objects passed to backend functions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The argument object for one backend function call.
///
/// Always a JSON object; functions that take no arguments receive the empty
/// object. Call sites that have nothing to pass can use `()`:
///
/// ```rust
/// use strata_link::FunctionArgs;
///
/// let none: FunctionArgs = ().into();
/// assert!(none.is_empty());
///
/// let args = FunctionArgs::new().insert("channel", "general");
/// assert_eq!(args.get("channel"), Some(&serde_json::json!("general")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionArgs(Map<String, Value>);

impl FunctionArgs {
    /// Create an empty argument object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one named argument, builder-style.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up an argument by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// `true` when no arguments are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into a `serde_json::Value::Object`.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<()> for FunctionArgs {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<Map<String, Value>> for FunctionArgs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
