//! The configuration compiler
//!
//! Translates a [`RenderInput`] - one pipeline plus its flows and
//! outputs - into the complete syslog-ng configuration document. The
//! document is assembled fully in memory and written to the caller's
//! sink in one step, so an error during rendering never leaves partial
//! output behind.
//!
//! Section order is fixed and matches resource declaration order:
//! version pragma, include pragma, optional global options, the shared
//! ingestion source, one destination block per output, then one block
//! run per flow. Major sections are separated by a single blank line.

mod expr;
mod filter;
mod flow;
mod naming;
mod output;
mod secret;
mod writer;

pub use secret::{MountedSecretResolver, SecretResolver};

use std::collections::HashMap;
use std::fmt;

use crate::crd::{GlobalOptions, LogFlow, LogOutput, LogPipeline};
use crate::{
    Error, Result, CONFIG_VERSION, DEFAULT_STATS_FREQ, JSON_PREFIX, MAIN_INPUT_SOURCE_NAME,
    SCL_INCLUDE,
};

use flow::render_flow;
use output::render_output;
use writer::{ConfigWriter, DriverCall};

/// Everything one render call consumes
///
/// Constructed fresh per render and treated as read-only throughout;
/// concurrent renders over independent inputs need no coordination.
pub struct RenderInput<'a> {
    /// The owning pipeline resource
    pub pipeline: LogPipeline,
    /// Declared outputs, rendered in declaration order
    pub outputs: Vec<LogOutput>,
    /// Declared flows, rendered in declaration order
    pub flows: Vec<LogFlow>,
    /// Port the shared ingestion source listens on
    pub source_port: u16,
    /// Secret resolution capability, injected per render
    pub secrets: &'a dyn SecretResolver,
}

/// Render the full configuration document into `out`
///
/// On error the sink contents are untouched: the document is assembled
/// in memory first and flushed only on success.
pub fn render_config_into(input: &RenderInput<'_>, out: &mut dyn fmt::Write) -> Result<()> {
    let pipeline_name = input.pipeline.metadata.name.as_deref().unwrap_or_default();
    let spec = input
        .pipeline
        .spec
        .syslog_ng
        .as_ref()
        .ok_or_else(|| Error::missing_spec(pipeline_name))?;

    tracing::debug!(
        pipeline = %pipeline_name,
        outputs = input.outputs.len(),
        flows = input.flows.len(),
        "rendering syslog-ng configuration"
    );

    let mut sections: Vec<String> = Vec::new();
    sections.push(format!("@version: {CONFIG_VERSION}\n"));
    sections.push(format!("@include \"{SCL_INCLUDE}\"\n"));

    if let Some(options) = &spec.global_options {
        if !options.is_empty() {
            sections.push(render_global_options(options));
        }
    }
    sections.push(render_main_input(input.source_port));

    let mut output_ids: HashMap<(String, String), String> = HashMap::new();
    for declared in &input.outputs {
        let namespace = declared.metadata.namespace.as_deref().unwrap_or_default();
        let name = declared.metadata.name.as_deref().unwrap_or_default();
        let (id, text) = render_output(declared, input.secrets)?;
        let previous = output_ids.insert((namespace.to_string(), name.to_string()), id);
        if previous.is_some() {
            // Silently overwriting an earlier block reference would leave
            // flows pointing at whichever block rendered last.
            return Err(Error::validation(format!(
                "duplicate output {namespace}/{name}"
            )));
        }
        sections.push(text);
    }

    for declared in &input.flows {
        sections.push(render_flow(declared, &output_ids)?);
    }

    out.write_str(&sections.join("\n"))?;
    Ok(())
}

/// Render the `options { }` block
///
/// The stats level is emitted verbatim; the stats frequency substitutes
/// the fixed default when declared-but-zero or absent, since zero means
/// "unset" for this option rather than "disable".
fn render_global_options(options: &GlobalOptions) -> String {
    let stats_freq = match options.stats_freq {
        Some(freq) if freq != 0 => freq,
        _ => DEFAULT_STATS_FREQ,
    };

    let mut writer = ConfigWriter::new();
    writer.open("options");
    if let Some(stats_level) = options.stats_level {
        writer.stmt(&format!("stats_level({stats_level})"));
    }
    writer.stmt(&format!("stats_freq({stats_freq})"));
    writer.close();
    writer.into_string()
}

/// Render the shared ingestion source block
///
/// A network listener feeding a JSON structuring parser: the upstream
/// forwarder ships records as raw JSON lines, parsed here once under a
/// fixed field prefix so flows and filters address structured fields.
fn render_main_input(port: u16) -> String {
    let mut writer = ConfigWriter::new();
    writer.open_named("source", MAIN_INPUT_SOURCE_NAME);
    writer.open("channel");
    writer.open("source");
    writer.stmt(
        &DriverCall::new("network")
            .option_quoted("flags", "no-parse")
            .option("port", port)
            .option_quoted("transport", "tcp")
            .render(),
    );
    writer.close();
    writer.open("parser");
    writer.stmt(
        &DriverCall::new("json-parser")
            .option_quoted("prefix", JSON_PREFIX)
            .render(),
    );
    writer.close();
    writer.close();
    writer.close();
    writer.into_string()
}
