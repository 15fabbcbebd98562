//! Flow assembly
//!
//! A flow becomes one contiguous run of blocks: an optional root match
//! filter, the filter chain blocks, and the `log { }` execution block
//! tying the shared source, the built-in namespace gate, the filter
//! references, and the destination references together in a fixed order.

use std::collections::HashMap;

use crate::crd::LogFlow;
use crate::{Error, Result, MAIN_INPUT_SOURCE_NAME};

use super::expr::render_match_expr;
use super::filter::render_flow_filters;
use super::naming::flow_match_id;
use super::writer::{value_ref, ConfigWriter, DriverCall};

/// Render one flow into its section of the document
///
/// `output_ids` indexes declared outputs by `(namespace, name)`; every
/// entry in the flow's `localOutputRefs` must resolve against it within
/// the flow's own namespace, otherwise the whole render fails with a
/// dangling reference.
pub(crate) fn render_flow(
    flow: &LogFlow,
    output_ids: &HashMap<(String, String), String>,
) -> Result<String> {
    let namespace = flow.metadata.namespace.as_deref().unwrap_or_default();
    let name = flow.metadata.name.as_deref().unwrap_or_default();

    // Resolve destination references before emitting anything so a
    // dangling reference produces no partial section.
    let mut destinations = Vec::with_capacity(flow.spec.local_output_refs.len());
    for output_ref in &flow.spec.local_output_refs {
        let key = (namespace.to_string(), output_ref.clone());
        let id = output_ids
            .get(&key)
            .ok_or_else(|| Error::DanglingReference {
                flow_namespace: namespace.to_string(),
                flow_name: name.to_string(),
                output_ref: output_ref.clone(),
            })?;
        destinations.push(id.clone());
    }

    let mut writer = ConfigWriter::new();

    let match_id = match &flow.spec.match_ {
        Some(expr) => {
            let id = flow_match_id(namespace, name);
            writer.open_named("filter", &id);
            writer.stmt(&render_match_expr(expr)?);
            writer.close();
            Some(id)
        }
        None => None,
    };

    let filter_refs = render_flow_filters(namespace, name, &flow.spec.filters, &mut writer)?;

    writer.open("log");
    writer.stmt(
        &DriverCall::new("source")
            .arg_quoted(MAIN_INPUT_SOURCE_NAME)
            .render(),
    );

    // Built-in structural gate: only records from the flow's own
    // namespace enter the flow. Not user-configurable.
    writer.open("filter");
    writer.stmt(
        &DriverCall::new("match")
            .arg_quoted(namespace)
            .arg(value_ref("json.kubernetes.namespace_name"))
            .option_quoted("type", "string")
            .render(),
    );
    writer.close();

    if let Some(id) = match_id {
        writer.stmt(&DriverCall::new("filter").arg_quoted(&id).render());
    }
    for filter_ref in &filter_refs {
        writer.stmt(
            &DriverCall::new(filter_ref.kind.keyword())
                .arg_quoted(&filter_ref.id)
                .render(),
        );
    }
    for destination in &destinations {
        writer.stmt(&DriverCall::new("destination").arg_quoted(destination).render());
    }
    writer.close();

    Ok(writer.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{
        FilterConfig, FlowFilter, LogFlowSpec, MatchExpr, ParserConfig, RegexpMatchExpr,
        RegexpParser, RewriteConfig, UnsetConfig,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn flow(namespace: &str, name: &str, spec: LogFlowSpec) -> LogFlow {
        LogFlow {
            metadata: ObjectMeta {
                namespace: Some(namespace.to_string()),
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec,
        }
    }

    fn outputs(entries: &[(&str, &str)]) -> HashMap<(String, String), String> {
        entries
            .iter()
            .map(|(ns, name)| {
                (
                    (ns.to_string(), name.to_string()),
                    format!("output_{ns}_{name}"),
                )
            })
            .collect()
    }

    #[test]
    fn log_block_keeps_the_fixed_statement_order() {
        let flow = flow(
            "default",
            "test-flow",
            LogFlowSpec {
                match_: Some(MatchExpr::Regexp(RegexpMatchExpr {
                    pattern: "nginx".into(),
                    value: "kubernetes.labels.app".into(),
                    type_: None,
                })),
                filters: vec![FlowFilter {
                    id: None,
                    config: Some(FilterConfig::Rewrite(RewriteConfig::Unset(UnsetConfig {
                        field_name: "MESSAGE".into(),
                        condition: None,
                    }))),
                }],
                local_output_refs: vec!["out".into()],
            },
        );
        let text = render_flow(&flow, &outputs(&[("default", "out")])).unwrap();

        let source = text.find("source(\"main_input\")").unwrap();
        let namespace_gate = text
            .find("match(\"default\" value(\"json.kubernetes.namespace_name\") type(\"string\"))")
            .unwrap();
        let match_ref = text.find("filter(\"flow_default_test-flow_match\")").unwrap();
        let rewrite_ref = text
            .find("rewrite(\"flow_default_test-flow_filters_0\")")
            .unwrap();
        let destination_ref = text.find("destination(\"output_default_out\")").unwrap();

        assert!(source < namespace_gate);
        assert!(namespace_gate < match_ref);
        assert!(match_ref < rewrite_ref);
        assert!(rewrite_ref < destination_ref);
    }

    #[test]
    fn filter_references_follow_declaration_order() {
        let flow = flow(
            "default",
            "ordered",
            LogFlowSpec {
                match_: None,
                filters: vec![
                    FlowFilter {
                        id: None,
                        config: Some(FilterConfig::Parser(ParserConfig::Regexp(RegexpParser {
                            patterns: vec![".*".into()],
                            prefix: None,
                            flags: vec![],
                        }))),
                    },
                    FlowFilter {
                        id: None,
                        config: Some(FilterConfig::Rewrite(RewriteConfig::Unset(UnsetConfig {
                            field_name: "MESSAGE".into(),
                            condition: None,
                        }))),
                    },
                ],
                local_output_refs: vec![],
            },
        );
        let text = render_flow(&flow, &HashMap::new()).unwrap();

        let parser_ref = text.find("parser(\"flow_default_ordered_filters_0\");").unwrap();
        let rewrite_ref = text
            .find("rewrite(\"flow_default_ordered_filters_1\");")
            .unwrap();
        assert!(parser_ref < rewrite_ref);
    }

    #[test]
    fn destination_references_follow_ref_order() {
        let flow = flow(
            "default",
            "fanout",
            LogFlowSpec {
                match_: None,
                filters: vec![],
                local_output_refs: vec!["b".into(), "a".into()],
            },
        );
        let text =
            render_flow(&flow, &outputs(&[("default", "a"), ("default", "b")])).unwrap();
        let b = text.find("destination(\"output_default_b\");").unwrap();
        let a = text.find("destination(\"output_default_a\");").unwrap();
        assert!(b < a);
    }

    #[test]
    fn dangling_references_abort_the_flow() {
        let flow = flow(
            "default",
            "broken",
            LogFlowSpec {
                match_: None,
                filters: vec![],
                local_output_refs: vec!["missing".into()],
            },
        );
        let err = render_flow(&flow, &HashMap::new()).unwrap_err();
        match err {
            Error::DanglingReference {
                flow_namespace,
                flow_name,
                output_ref,
            } => {
                assert_eq!(flow_namespace, "default");
                assert_eq!(flow_name, "broken");
                assert_eq!(output_ref, "missing");
            }
            other => panic!("expected dangling reference, got {other:?}"),
        }
    }

    /// Output references are local: a flow only sees outputs declared in
    /// its own namespace, so a same-named output elsewhere does not
    /// satisfy the reference.
    #[test]
    fn references_do_not_cross_namespaces() {
        let flow = flow(
            "default",
            "scoped",
            LogFlowSpec {
                match_: None,
                filters: vec![],
                local_output_refs: vec!["out".into()],
            },
        );
        assert!(render_flow(&flow, &outputs(&[("logging", "out")])).is_err());
    }
}
