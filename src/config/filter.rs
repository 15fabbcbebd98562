//! Filter chain rendering
//!
//! Each element of a flow's filter chain becomes one named block plus a
//! recorded `(identifier, kind)` pair the flow assembler later turns into
//! an ordered reference inside the `log { }` execution block.

use crate::crd::{FilterConfig, FlowFilter, ParserConfig, RegexpParser, RewriteConfig};
use crate::Result;

use super::expr::render_match_expr;
use super::naming::flow_filter_id;
use super::writer::{value_ref, ConfigWriter, DriverCall};

/// The block keyword a filter renders under, also used for the reference
/// statement inside the execution block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockKind {
    /// `rewrite "id" { ... };` / `rewrite("id");`
    Rewrite,
    /// `parser "id" { ... };` / `parser("id");`
    Parser,
}

impl BlockKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Rewrite => "rewrite",
            Self::Parser => "parser",
        }
    }
}

/// An emitted filter block, referenced later from the execution block
#[derive(Clone, Debug)]
pub(crate) struct FilterRef {
    pub id: String,
    pub kind: BlockKind,
}

/// Render a flow's filter chain in declaration order
///
/// Returns the ordered references for the execution block. Filters
/// without an operation are skipped entirely - no block, no reference.
pub(crate) fn render_flow_filters(
    flow_namespace: &str,
    flow_name: &str,
    filters: &[FlowFilter],
    writer: &mut ConfigWriter,
) -> Result<Vec<FilterRef>> {
    let mut refs = Vec::with_capacity(filters.len());
    for (index, filter) in filters.iter().enumerate() {
        let Some(config) = &filter.config else {
            continue;
        };
        let key = match &filter.id {
            Some(id) => id.clone(),
            None => index.to_string(),
        };
        let id = flow_filter_id(flow_namespace, flow_name, &key);
        let kind = match config {
            FilterConfig::Rewrite(_) => BlockKind::Rewrite,
            FilterConfig::Parser(_) => BlockKind::Parser,
        };

        writer.open_named(kind.keyword(), &id);
        match config {
            FilterConfig::Rewrite(rewrite) => writer.stmt(&render_rewrite(rewrite)?),
            FilterConfig::Parser(parser) => writer.stmt(&render_parser(parser)),
        }
        writer.close();

        refs.push(FilterRef { id, kind });
    }
    Ok(refs)
}

fn render_rewrite(rewrite: &RewriteConfig) -> Result<String> {
    match rewrite {
        RewriteConfig::Set(set) => Ok(DriverCall::new("set")
            .arg_quoted(&set.value)
            .arg(value_ref(&set.field_name))
            .arg_opt(render_condition(set.condition.as_ref())?)
            .render()),
        RewriteConfig::Unset(unset) => Ok(DriverCall::new("unset")
            .arg(value_ref(&unset.field_name))
            .arg_opt(render_condition(unset.condition.as_ref())?)
            .render()),
    }
}

fn render_condition(condition: Option<&crate::crd::MatchExpr>) -> Result<Option<String>> {
    condition
        .map(|expr| Ok(format!("condition({})", render_match_expr(expr)?)))
        .transpose()
}

fn render_parser(parser: &ParserConfig) -> String {
    match parser {
        ParserConfig::Regexp(regexp) => render_regexp_parser(regexp),
    }
}

fn render_regexp_parser(parser: &RegexpParser) -> String {
    let patterns = parser
        .patterns
        .iter()
        .fold(DriverCall::new("patterns"), |call, p| call.arg_quoted(p));
    let flags = parser
        .flags
        .iter()
        .fold(DriverCall::new("flags"), |call, f| call.arg_quoted(f));

    let mut call = DriverCall::new("regexp-parser").arg(patterns.render());
    call = call.option_quoted_opt("prefix", parser.prefix.as_deref());
    if !flags.is_empty() {
        call = call.arg(flags.render());
    }
    call.render()
}
