//! Match expression translation
//!
//! Compiles the recursive [`MatchExpr`] tree into the daemon's nested
//! predicate syntax. The tree's nesting is the only precedence mechanism:
//! children render in declaration order and nothing is flattened, so the
//! emitted parentheses mirror the resource exactly.

use crate::crd::{MatchExpr, RegexpMatchExpr};
use crate::{Error, Result};

use super::writer::{value_ref, DriverCall};

/// Render a match expression tree into predicate syntax
pub(crate) fn render_match_expr(expr: &MatchExpr) -> Result<String> {
    match expr {
        MatchExpr::Regexp(leaf) => Ok(render_leaf(leaf)),
        MatchExpr::Not(child) => Ok(format!("(not {})", render_match_expr(child)?)),
        MatchExpr::And(children) => render_combinator(children, "and"),
        MatchExpr::Or(children) => render_combinator(children, "or"),
    }
}

fn render_leaf(leaf: &RegexpMatchExpr) -> String {
    DriverCall::new("match")
        .arg_quoted(&leaf.pattern)
        .arg(value_ref(&leaf.value))
        .option_quoted_opt("type", leaf.type_.as_deref())
        .render()
}

fn render_combinator(children: &[MatchExpr], operator: &str) -> Result<String> {
    if children.is_empty() {
        return Err(Error::malformed_expression(format!(
            "empty {operator} expression"
        )));
    }
    let rendered = children
        .iter()
        .map(render_match_expr)
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("({})", rendered.join(&format!(" {operator} "))))
}
