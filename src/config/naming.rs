//! Deterministic block identifiers
//!
//! Every emitted block gets a name composed from the owning resource's
//! role, namespace, and name, plus an optional disambiguator. Names are
//! pure concatenation with `_` - suffixes are preserved verbatim
//! (including embedded spaces), and no escaping of the delimiter is
//! performed, so callers must not feed identity strings that collide
//! after concatenation.

/// Compose the identifier for an emitted block
pub(crate) fn block_id(
    role: &str,
    namespace: &str,
    name: &str,
    suffix: Option<&str>,
) -> String {
    let mut id = format!("{role}_{namespace}_{name}");
    if let Some(suffix) = suffix {
        id.push('_');
        id.push_str(suffix);
    }
    id
}

/// Identifier of the destination block for an output resource
///
/// Stable and independent of rendering order, so flows can reference it
/// without knowing where in the document the block landed.
pub(crate) fn output_id(namespace: &str, name: &str) -> String {
    block_id("output", namespace, name, None)
}

/// Identifier of a flow's root match filter block
pub(crate) fn flow_match_id(namespace: &str, name: &str) -> String {
    block_id("flow", namespace, name, Some("match"))
}

/// Identifier of one element of a flow's filter chain
///
/// `key` is the user-supplied filter ID when present, otherwise the
/// zero-based position rendered in decimal.
pub(crate) fn flow_filter_id(namespace: &str, name: &str, key: &str) -> String {
    block_id("flow", namespace, name, Some(&format!("filters_{key}")))
}
