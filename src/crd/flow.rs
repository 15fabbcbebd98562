//! LogFlow CRD - a named routing rule

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::MatchExpr;

/// LogFlow pairs an optional match condition and an ordered filter chain
/// with one or more destination references.
///
/// Filter order is semantically significant: the daemon executes the
/// chain sequentially, so the compiler renders and references filters in
/// exactly the order they are declared.
///
/// Example:
/// ```yaml
/// apiVersion: conflux.dev/v1alpha1
/// kind: LogFlow
/// metadata:
///   name: nginx
///   namespace: default
/// spec:
///   match:
///     regexp:
///       pattern: nginx
///       value: kubernetes.labels.app
///   filters:
///     - rewrite:
///         set:
///           fieldName: cluster
///           value: prod
///   localOutputRefs:
///     - my-syslog-out
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "conflux.dev",
    version = "v1alpha1",
    kind = "LogFlow",
    namespaced,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct LogFlowSpec {
    /// Root routing gate for the flow; records not matching it skip the
    /// whole flow
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "match")]
    pub match_: Option<MatchExpr>,

    /// Ordered filter chain applied to records routed through this flow
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FlowFilter>,

    /// Names of outputs in the flow's namespace to deliver to, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local_output_refs: Vec<String>,
}

/// One element of a flow's filter chain
///
/// Identified either by the explicit `id` or, absent that, by its
/// zero-based position in the chain. The identifier is embedded verbatim
/// in the emitted block name - including spaces.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowFilter {
    /// Explicit user-supplied filter identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The filter operation; a filter with no operation renders nothing
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FilterConfig>,
}

/// The operation a filter performs, exactly one per filter
///
/// Adding a new operation kind only requires a new variant here and a
/// keyword mapping in the renderer's `BlockKind`; the flow assembler and
/// the identifier namer are untouched.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum FilterConfig {
    /// Field rewrite operation
    Rewrite(RewriteConfig),
    /// Structuring parser operation
    Parser(ParserConfig),
}

/// A rewrite operation applied to each routed record
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum RewriteConfig {
    /// Set a field to a fixed value
    Set(SetConfig),
    /// Remove a field
    Unset(UnsetConfig),
}

/// Sets a field to a value, optionally guarded by a condition
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetConfig {
    /// Field to set
    pub field_name: String,

    /// Value written into the field
    pub value: String,

    /// Guard applied per record; the rewrite runs only when it matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<MatchExpr>,
}

/// Removes a field, optionally guarded by a condition
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnsetConfig {
    /// Field to remove
    pub field_name: String,

    /// Guard applied per record; the rewrite runs only when it matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<MatchExpr>,
}

/// A structuring parser operation
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ParserConfig {
    /// Regular-expression field extractor
    Regexp(RegexpParser),
}

/// Extracts fields with one or more regular expressions
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegexpParser {
    /// Patterns tried in order; named capture groups become fields
    pub patterns: Vec<String>,

    /// Prefix prepended to every extracted field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Pattern flags (e.g., "ignore-case")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}
