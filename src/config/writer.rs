//! Low-level emitters for the syslog-ng configuration syntax
//!
//! Two small builders keep the textual rules in one place: every
//! statement ends with `;`, every block closes with `};`, nesting indents
//! by four spaces, and driver parameters are space-separated inside the
//! driver's parentheses.

use std::fmt::Display;

const INDENT: &str = "    ";

/// Accumulates indented statements and blocks into a document fragment
#[derive(Debug, Default)]
pub(crate) struct ConfigWriter {
    buf: String,
    depth: usize,
}

impl ConfigWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one indented line verbatim
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write one statement, appending the terminator
    pub fn stmt(&mut self, text: &str) {
        self.line(&format!("{text};"));
    }

    /// Write an unindented blank line
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Open an anonymous block: `header {`
    pub fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.depth += 1;
    }

    /// Open a named block: `keyword "identifier" {`
    pub fn open_named(&mut self, keyword: &str, identifier: &str) {
        self.open(&format!("{keyword} \"{identifier}\""));
    }

    /// Close the innermost block
    pub fn close(&mut self) {
        self.depth -= 1;
        self.line("};");
    }

    pub fn into_string(self) -> String {
        debug_assert_eq!(self.depth, 0, "unbalanced block nesting");
        self.buf
    }
}

/// Builds one driver invocation: `name(arg1 arg2 ...)`
///
/// Positional arguments come first, named options render as
/// `option(value)`. Unset options contribute nothing - the daemon's own
/// defaults apply when an option is absent, so the builder never emits
/// empty parentheses for them.
#[derive(Debug)]
pub(crate) struct DriverCall {
    name: &'static str,
    args: Vec<String>,
}

impl DriverCall {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// Append a raw argument (pre-rendered nested call or raw string)
    pub fn arg(mut self, raw: impl Into<String>) -> Self {
        self.args.push(raw.into());
        self
    }

    /// Append a raw argument when present
    pub fn arg_opt(self, raw: Option<String>) -> Self {
        match raw {
            Some(raw) => self.arg(raw),
            None => self,
        }
    }

    /// Append a quoted positional argument
    pub fn arg_quoted(self, value: &str) -> Self {
        self.arg(format!("\"{value}\""))
    }

    /// Append `option(value)` with the value rendered by Display
    pub fn option(self, option: &'static str, value: impl Display) -> Self {
        self.arg(format!("{option}({value})"))
    }

    /// Append `option("value")`
    pub fn option_quoted(self, option: &'static str, value: &str) -> Self {
        self.arg(format!("{option}(\"{value}\")"))
    }

    /// Append `option(value)` when the value is set
    pub fn option_opt(self, option: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.option(option, value),
            None => self,
        }
    }

    /// Append `option("value")` when the value is set
    pub fn option_quoted_opt(self, option: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.option_quoted(option, value),
            None => self,
        }
    }

    /// Append `option(yes)` / `option(no)` when the flag is set
    pub fn option_bool_opt(self, option: &'static str, value: Option<bool>) -> Self {
        match value {
            Some(value) => self.option(option, if value { "yes" } else { "no" }),
            None => self,
        }
    }

    /// Append `option(raw)` with the value embedded verbatim when set
    pub fn option_raw_opt(self, option: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.arg(format!("{option}({value})")),
            None => self,
        }
    }

    /// True when no argument has been appended
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Render the full invocation text
    pub fn render(self) -> String {
        format!("{}({})", self.name, self.args.join(" "))
    }

    /// Render only the accumulated arguments, space separated
    ///
    /// For option groups that are inline arguments of an enclosing driver
    /// rather than a nested call of their own (batching, bulk options).
    pub fn render_args(self) -> String {
        self.args.join(" ")
    }
}

/// Render a `value("field")` field reference
pub(crate) fn value_ref(field: &str) -> String {
    format!("value(\"{field}\")")
}
