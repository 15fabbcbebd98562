//! Custom Resource Definitions for Conflux
//!
//! This module contains all CRD definitions consumed by the compiler:
//! the owning pipeline, its routing flows, and its destination outputs.

mod flow;
mod output;
mod pipeline;
mod types;

pub use flow::{
    FilterConfig, FlowFilter, LogFlow, LogFlowSpec, ParserConfig, RegexpParser, RewriteConfig,
    SetConfig, UnsetConfig,
};
pub use output::{
    Batch, Bulk, DiskBuffer, LogOutput, LogOutputSpec, MongoDbOutput, OutputKind, RedisOutput,
    SyslogOutput, Tls, ValuePairs,
};
pub use pipeline::{GlobalOptions, LogPipeline, LogPipelineSpec, SyslogNgSpec};
pub use types::{MatchExpr, RegexpMatchExpr, SecretKeySelector, SecretRef};

#[cfg(test)]
mod tests {
    use super::*;
    use kube::CustomResourceExt;

    /// The generated definitions carry the group, served version, and
    /// printcolumns the platform registers them under.
    #[test]
    fn generated_definitions_carry_group_version_and_printcolumns() {
        for crd in [LogPipeline::crd(), LogFlow::crd(), LogOutput::crd()] {
            assert_eq!(crd.spec.group, "conflux.dev");
            let version = &crd.spec.versions[0];
            assert_eq!(version.name, "v1alpha1");
            let columns = version
                .additional_printer_columns
                .as_ref()
                .expect("printcolumns");
            assert_eq!(columns[0].name, "Age");
            assert_eq!(columns[0].type_, "date");
        }
    }
}
