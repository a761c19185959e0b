/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation kind declared by every procedure
/// Read operations are queries, write operations are mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => f.pad("query"),
            OperationKind::Mutation => f.pad("mutation"),
        }
    }
}

/// Authorization requirement declared by every procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthRequirement {
    Public,
    Protected, // Requires a resolved principal
}

impl fmt::Display for AuthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthRequirement::Public => f.pad("public"),
            AuthRequirement::Protected => f.pad("protected"),
        }
    }
}
