//! LogPipeline CRD - the owning logging pipeline resource

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// LogPipeline owns a rendered syslog-ng configuration.
///
/// Flows and outputs attach to a pipeline by namespace; the pipeline
/// itself carries the daemon-wide tuning knobs.
///
/// Example:
/// ```yaml
/// apiVersion: conflux.dev/v1alpha1
/// kind: LogPipeline
/// metadata:
///   name: prod
///   namespace: logging
/// spec:
///   syslogNg:
///     globalOptions:
///       statsLevel: 3
///       statsFreq: 0
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "conflux.dev",
    version = "v1alpha1",
    kind = "LogPipeline",
    namespaced,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct LogPipelineSpec {
    /// The syslog-ng configuration section. Rendering fails if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog_ng: Option<SyslogNgSpec>,
}

/// Daemon-level configuration carried by the pipeline
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyslogNgSpec {
    /// Global tuning options rendered into the `options { }` block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_options: Option<GlobalOptions>,
}

/// Global tuning options
///
/// Both fields distinguish "absent" from an explicit zero: an operator
/// writing `statsFreq: 0` gets the daemon default substituted (10), not a
/// disabled stats timer. Destination options never default this way.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalOptions {
    /// Stats verbosity level, rendered verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_level: Option<i32>,

    /// Stats emission interval in seconds; zero means "use the default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_freq: Option<i32>,
}

impl GlobalOptions {
    /// Returns true if no option is set and the block should be omitted
    pub fn is_empty(&self) -> bool {
        self.stats_level.is_none() && self.stats_freq.is_none()
    }
}
