//! Shared fixtures for the golden-document tests

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use conflux::config::{render_config_into, MountedSecretResolver, RenderInput, SecretResolver};
use conflux::crd::{
    LogFlow, LogFlowSpec, LogOutput, LogOutputSpec, LogPipeline, LogPipelineSpec, OutputKind,
    SyslogNgSpec,
};

/// The fixed document head every render over port 601 starts with
pub const PREAMBLE: &str = r#"@version: 3.37

@include "scl.conf"

source "main_input" {
    channel {
        source {
            network(flags("no-parse") port(601) transport("tcp"));
        };
        parser {
            json-parser(prefix("json."));
        };
    };
};
"#;

pub fn meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        namespace: Some(namespace.to_string()),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn pipeline() -> LogPipeline {
    LogPipeline {
        metadata: meta("logging", "test"),
        spec: LogPipelineSpec {
            syslog_ng: Some(SyslogNgSpec::default()),
        },
    }
}

pub fn output(namespace: &str, name: &str, kind: Option<OutputKind>) -> LogOutput {
    LogOutput {
        metadata: meta(namespace, name),
        spec: LogOutputSpec { kind },
    }
}

pub fn flow(namespace: &str, name: &str, spec: LogFlowSpec) -> LogFlow {
    LogFlow {
        metadata: meta(namespace, name),
        spec,
    }
}

/// A secret store holding one entry, mounted at the conventional path
pub fn secret_store(namespace: &str, name: &str, key: &str) -> MountedSecretResolver {
    let mut data = BTreeMap::new();
    data.insert(key.to_string(), k8s_openapi::ByteString(b"asdf".to_vec()));
    MountedSecretResolver::new(
        vec![Secret {
            metadata: meta(namespace, name),
            data: Some(data),
            ..Default::default()
        }],
        "/etc/syslog-ng/secret",
    )
}

/// Render with an empty secret store and return the document
pub fn render(
    outputs: Vec<LogOutput>,
    flows: Vec<LogFlow>,
) -> Result<String, conflux::Error> {
    let secrets = MountedSecretResolver::default();
    render_with(pipeline(), outputs, flows, &secrets)
}

pub fn render_with(
    pipeline: LogPipeline,
    outputs: Vec<LogOutput>,
    flows: Vec<LogFlow>,
    secrets: &dyn SecretResolver,
) -> Result<String, conflux::Error> {
    let input = RenderInput {
        pipeline,
        outputs,
        flows,
        source_port: 601,
        secrets,
    };
    let mut buf = String::new();
    render_config_into(&input, &mut buf)?;
    Ok(buf)
}
