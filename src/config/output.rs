//! Destination block rendering
//!
//! One named `destination { }` block per output resource, dispatched
//! exhaustively on the populated backend kind. Unset optional
//! sub-structures are omitted entirely; an output with no kind at all
//! still emits a syntactically valid empty block. Every driver statement
//! ends with a `persist_name` carrying the block's own identifier so the
//! daemon keeps stable delivery state across reloads.

use crate::crd::{
    Batch, Bulk, DiskBuffer, LogOutput, MongoDbOutput, OutputKind, RedisOutput, SyslogOutput, Tls,
    ValuePairs,
};
use crate::Result;

use super::naming::output_id;
use super::secret::SecretResolver;
use super::writer::{ConfigWriter, DriverCall};

/// Render one output into its destination block
///
/// Returns the block identifier and the block text. The identifier is
/// derived purely from the output's identity, independent of rendering
/// order.
pub(crate) fn render_output(
    output: &LogOutput,
    secrets: &dyn SecretResolver,
) -> Result<(String, String)> {
    let namespace = output.metadata.namespace.as_deref().unwrap_or_default();
    let name = output.metadata.name.as_deref().unwrap_or_default();
    let id = output_id(namespace, name);

    let mut writer = ConfigWriter::new();
    writer.open_named("destination", &id);
    match &output.spec.kind {
        Some(OutputKind::Syslog(syslog)) => {
            writer.stmt(&render_syslog(syslog, &id, namespace, secrets)?)
        }
        Some(OutputKind::Mongodb(mongodb)) => writer.stmt(&render_mongodb(mongodb, &id)),
        Some(OutputKind::Redis(redis)) => {
            writer.stmt(&render_redis(redis, &id, namespace, secrets)?)
        }
        // An output whose backend is not chosen yet still gets a valid
        // empty block so references to it keep working.
        None => writer.blank(),
    }
    writer.close();

    Ok((id, writer.into_string()))
}

fn render_syslog(
    syslog: &SyslogOutput,
    id: &str,
    namespace: &str,
    secrets: &dyn SecretResolver,
) -> Result<String> {
    Ok(DriverCall::new("syslog")
        .arg_quoted(&syslog.host)
        .option_opt("port", syslog.port)
        .option_quoted_opt("transport", syslog.transport.as_deref())
        .arg_opt(render_tls(syslog.tls.as_ref(), namespace, secrets)?)
        .arg_opt(render_disk_buffer(syslog.disk_buffer.as_ref()))
        .arg_opt(render_batch(&syslog.batch))
        .option_quoted("persist_name", id)
        .render())
}

fn render_mongodb(mongodb: &MongoDbOutput, id: &str) -> String {
    DriverCall::new("mongodb")
        .option_quoted("collection", &mongodb.collection)
        .option_quoted_opt("uri", mongodb.uri.as_deref())
        .arg_opt(render_value_pairs(mongodb.value_pairs.as_ref()))
        .arg_opt(render_disk_buffer(mongodb.disk_buffer.as_ref()))
        .arg_opt(render_batch(&mongodb.batch))
        .arg_opt(render_bulk(&mongodb.bulk))
        .option_quoted("persist_name", id)
        .render()
}

fn render_redis(
    redis: &RedisOutput,
    id: &str,
    namespace: &str,
    secrets: &dyn SecretResolver,
) -> Result<String> {
    let auth = redis
        .auth
        .as_ref()
        .map(|secret| secrets.resolve(namespace, secret))
        .transpose()?;

    Ok(DriverCall::new("redis")
        .option_quoted_opt("host", redis.host.as_deref())
        .option_opt("port", redis.port)
        .option_quoted_opt("auth", auth.as_deref())
        .arg_opt(render_disk_buffer(redis.disk_buffer.as_ref()))
        .arg_opt(render_batch(&redis.batch))
        .option_quoted("persist_name", id)
        .render())
}

fn render_tls(
    tls: Option<&Tls>,
    namespace: &str,
    secrets: &dyn SecretResolver,
) -> Result<Option<String>> {
    let Some(tls) = tls else {
        return Ok(None);
    };

    let resolve = |secret: Option<&crate::crd::SecretRef>| -> Result<Option<String>> {
        secret.map(|s| secrets.resolve(namespace, s)).transpose()
    };

    let call = DriverCall::new("tls")
        .option_quoted_opt("ca_dir", resolve(tls.ca_dir.as_ref())?.as_deref())
        .option_quoted_opt("ca_file", resolve(tls.ca_file.as_ref())?.as_deref())
        .option_quoted_opt("cert_file", resolve(tls.cert_file.as_ref())?.as_deref())
        .option_quoted_opt("key_file", resolve(tls.key_file.as_ref())?.as_deref())
        .option_bool_opt("peer_verify", tls.peer_verify);
    Ok(Some(call.render()))
}

fn render_disk_buffer(disk_buffer: Option<&DiskBuffer>) -> Option<String> {
    let disk_buffer = disk_buffer?;
    Some(
        DriverCall::new("disk_buffer")
            .option_bool_opt("reliable", disk_buffer.reliable)
            .option_bool_opt("compaction", disk_buffer.compaction)
            .option_quoted_opt("dir", disk_buffer.dir.as_deref())
            .option_opt("disk_buf_size", disk_buffer.disk_buf_size)
            .option_opt("mem_buf_length", disk_buffer.mem_buf_length)
            .option_opt("mem_buf_size", disk_buffer.mem_buf_size)
            .render(),
    )
}

// Batch and bulk options are inline arguments of the enclosing driver,
// not nested calls of their own.

fn render_batch(batch: &Batch) -> Option<String> {
    let call = DriverCall::new("batch")
        .option_opt("batch_lines", batch.batch_lines)
        .option_opt("batch_timeout", batch.batch_timeout);
    if call.is_empty() {
        return None;
    }
    Some(call.render_args())
}

fn render_bulk(bulk: &Bulk) -> Option<String> {
    let call = DriverCall::new("bulk")
        .option_bool_opt("bulk", bulk.bulk)
        .option_bool_opt("bulk_bypass_validation", bulk.bulk_bypass_validation);
    if call.is_empty() {
        return None;
    }
    Some(call.render_args())
}

fn render_value_pairs(value_pairs: Option<&ValuePairs>) -> Option<String> {
    let value_pairs = value_pairs?;
    // Raw sub-grammar: the operator writes the inner quoting themselves.
    Some(
        DriverCall::new("value_pairs")
            .option_raw_opt("scope", value_pairs.scope.as_deref())
            .option_raw_opt("exclude", value_pairs.exclude.as_deref())
            .option_raw_opt("key", value_pairs.key.as_deref())
            .option_raw_opt("pair", value_pairs.pair.as_deref())
            .render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::MountedSecretResolver;
    use crate::crd::{LogOutputSpec, SecretKeySelector, SecretRef};
    use k8s_openapi::api::core::v1::Secret;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn output(namespace: &str, name: &str, kind: Option<OutputKind>) -> LogOutput {
        LogOutput {
            metadata: ObjectMeta {
                namespace: Some(namespace.to_string()),
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: LogOutputSpec { kind },
        }
    }

    fn no_secrets() -> MountedSecretResolver {
        MountedSecretResolver::default()
    }

    #[test]
    fn syslog_renders_host_then_set_options() {
        let out = output(
            "default",
            "test-syslog-out",
            Some(OutputKind::Syslog(SyslogOutput {
                host: "test.local".into(),
                transport: Some("tcp".into()),
                ..Default::default()
            })),
        );
        let (id, text) = render_output(&out, &no_secrets()).unwrap();
        assert_eq!(id, "output_default_test-syslog-out");
        assert_eq!(
            text,
            "destination \"output_default_test-syslog-out\" {\n    syslog(\"test.local\" transport(\"tcp\") persist_name(\"output_default_test-syslog-out\"));\n};\n"
        );
    }

    #[test]
    fn syslog_tls_material_resolves_to_mount_paths() {
        let mut data = BTreeMap::new();
        data.insert("tls.crt".to_string(), k8s_openapi::ByteString(b"asdf".to_vec()));
        let secrets = MountedSecretResolver::new(
            vec![Secret {
                metadata: ObjectMeta {
                    namespace: Some("default".into()),
                    name: Some("my-secret".into()),
                    ..Default::default()
                },
                data: Some(data),
                ..Default::default()
            }],
            "/etc/syslog-ng/secret",
        );

        let out = output(
            "default",
            "my-output",
            Some(OutputKind::Syslog(SyslogOutput {
                host: "127.0.0.1".into(),
                tls: Some(Tls {
                    ca_file: Some(SecretRef::MountFrom(SecretKeySelector {
                        name: "my-secret".into(),
                        key: "tls.crt".into(),
                    })),
                    ..Default::default()
                }),
                ..Default::default()
            })),
        );
        let (_, text) = render_output(&out, &secrets).unwrap();
        assert_eq!(
            text,
            "destination \"output_default_my-output\" {\n    syslog(\"127.0.0.1\" tls(ca_file(\"/etc/syslog-ng/secret/default-my-secret-tls.crt\")) persist_name(\"output_default_my-output\"));\n};\n"
        );
        assert!(!text.contains("asdf"));
    }

    #[test]
    fn mongodb_renders_collection_uri_and_bulk_options() {
        let out = output(
            "default",
            "docs",
            Some(OutputKind::Mongodb(MongoDbOutput {
                collection: "syslog".into(),
                uri: Some("mongodb://127.0.0.1:27017/syslog".into()),
                value_pairs: Some(ValuePairs {
                    scope: Some("\"selected-macros\" \"nv-pairs\"".into()),
                    ..Default::default()
                }),
                bulk: Bulk {
                    bulk: Some(true),
                    bulk_bypass_validation: Some(false),
                },
                ..Default::default()
            })),
        );
        let (_, text) = render_output(&out, &no_secrets()).unwrap();
        assert!(text.contains(
            "mongodb(collection(\"syslog\") uri(\"mongodb://127.0.0.1:27017/syslog\") value_pairs(scope(\"selected-macros\" \"nv-pairs\")) bulk(yes) bulk_bypass_validation(no) persist_name(\"output_default_docs\"));"
        ));
    }

    #[test]
    fn redis_options_render_only_when_set() {
        let out = output(
            "default",
            "kv",
            Some(OutputKind::Redis(RedisOutput {
                host: Some("redis.local".into()),
                port: Some(6379),
                auth: Some(SecretRef::Value("hunter2".into())),
                ..Default::default()
            })),
        );
        let (_, text) = render_output(&out, &no_secrets()).unwrap();
        assert!(text.contains(
            "redis(host(\"redis.local\") port(6379) auth(\"hunter2\") persist_name(\"output_default_kv\"));"
        ));
    }

    #[test]
    fn disk_buffer_and_batch_render_inline() {
        let out = output(
            "default",
            "buffered",
            Some(OutputKind::Syslog(SyslogOutput {
                host: "test.local".into(),
                disk_buffer: Some(DiskBuffer {
                    reliable: Some(true),
                    disk_buf_size: Some(1048576),
                    ..Default::default()
                }),
                batch: Batch {
                    batch_lines: Some(100),
                    batch_timeout: Some(10000),
                },
                ..Default::default()
            })),
        );
        let (_, text) = render_output(&out, &no_secrets()).unwrap();
        assert!(text.contains(
            "syslog(\"test.local\" disk_buffer(reliable(yes) disk_buf_size(1048576)) batch_lines(100) batch_timeout(10000) persist_name(\"output_default_buffered\"));"
        ));
    }

    /// Zero populated kinds is not an error: the block renders empty
    /// but syntactically valid.
    #[test]
    fn outputs_without_a_kind_render_an_empty_block() {
        let out = output("default", "test-redis-out", None);
        let (id, text) = render_output(&out, &no_secrets()).unwrap();
        assert_eq!(id, "output_default_test-redis-out");
        assert_eq!(
            text,
            "destination \"output_default_test-redis-out\" {\n\n};\n"
        );
    }
}
