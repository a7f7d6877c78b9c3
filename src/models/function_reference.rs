//! Opaque handles naming backend functions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of backend functions a client can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    /// Read-only function whose result can be subscribed to.
    Query,
    /// State-changing function, optionally paired with an optimistic update.
    Mutation,
    /// Side-effecting function with no subscription or optimistic support.
    Action,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Query => write!(f, "query"),
            FunctionKind::Mutation => write!(f, "mutation"),
            FunctionKind::Action => write!(f, "action"),
        }
    }
}

/// Serializable handle identifying a named backend function.
///
/// The name is resolved to a transport-level identifier by the backend
/// client at call time; this crate treats it as opaque.
///
/// # Examples
///
/// ```rust
/// use strata_link::FunctionReference;
///
/// let list = FunctionReference::query("messages:list");
/// let send = FunctionReference::mutation("messages:send");
/// assert_eq!(list.name(), "messages:list");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionReference {
    kind: FunctionKind,
    name: String,
}

impl FunctionReference {
    /// Create a reference to a named function of the given kind.
    pub fn new(kind: FunctionKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Reference a public query, e.g. `messages:list`.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(FunctionKind::Query, name)
    }

    /// Reference a public mutation, e.g. `messages:send`.
    pub fn mutation(name: impl Into<String>) -> Self {
        Self::new(FunctionKind::Mutation, name)
    }

    /// Reference a public action, e.g. `ai:generate`.
    pub fn action(name: impl Into<String>) -> Self {
        Self::new(FunctionKind::Action, name)
    }

    /// The function kind this reference names.
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The transport-level function name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FunctionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}
