//! Shared supporting types for Conflux CRDs

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A recursive boolean predicate over log record fields
///
/// Used both as a flow's routing gate and as a per-rewrite guard. Nesting
/// is the only precedence mechanism: the compiler never flattens or
/// reorders children, so the tree shape written by the operator is the
/// tree shape the daemon evaluates.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum MatchExpr {
    /// Pattern match against a named field
    Regexp(RegexpMatchExpr),
    /// Logical negation of a child expression
    Not(Box<MatchExpr>),
    /// Conjunction of child expressions, evaluated in declaration order
    And(Vec<MatchExpr>),
    /// Disjunction of child expressions, evaluated in declaration order
    Or(Vec<MatchExpr>),
}

/// Leaf predicate: a regular-expression match on one field
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegexpMatchExpr {
    /// Pattern to match
    pub pattern: String,

    /// Field reference the pattern is applied to
    pub value: String,

    /// Optional value-type annotation (e.g., "string")
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_: Option<String>,
}

/// Secret material used inside a destination configuration
///
/// Either an inline literal, embedded verbatim in the rendered document,
/// or a reference to a namespaced secret store entry that is materialized
/// as a mounted file. Mounted references never leak the secret bytes into
/// the document - only the deterministic mount path appears.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum SecretRef {
    /// Inline literal value, rendered unchanged
    Value(String),
    /// Reference to a secret store entry, rendered as a mount path
    MountFrom(SecretKeySelector),
}

/// Selects one key of a namespaced secret
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Name of the secret
    pub name: String,

    /// Key within the secret
    pub key: String,
}
