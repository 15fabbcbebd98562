//! LogOutput CRD - a named destination for routed log records

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::SecretRef;

/// LogOutput configures one destination backend.
///
/// Exactly one destination kind is populated per output. An output with
/// no kind at all still renders a syntactically valid empty destination
/// block - flows may reference it before the backend is chosen.
///
/// Example:
/// ```yaml
/// apiVersion: conflux.dev/v1alpha1
/// kind: LogOutput
/// metadata:
///   name: my-syslog-out
///   namespace: default
/// spec:
///   syslog:
///     host: syslog.example.com
///     port: 601
///     transport: tls
///     tls:
///       caFile:
///         mountFrom:
///           name: tls-material
///           key: ca.crt
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "conflux.dev",
    version = "v1alpha1",
    kind = "LogOutput",
    namespaced,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct LogOutputSpec {
    /// The destination backend configuration, at most one kind
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<OutputKind>,
}

/// The supported destination backends
///
/// One variant per backend; the renderer matches exhaustively, so adding
/// a kind is a compile-time-checked addition rather than a runtime
/// nil-payload probe.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum OutputKind {
    /// Syslog protocol transport
    Syslog(SyslogOutput),
    /// MongoDB document store
    Mongodb(MongoDbOutput),
    /// Redis key-value store
    Redis(RedisOutput),
}

/// Syslog protocol destination
///
/// Options render only when explicitly set; there is no defaulting at
/// this layer, in contrast with the pipeline's global options.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyslogOutput {
    /// Destination host
    pub host: String,

    /// Destination port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Transport protocol ("tcp", "udp", "tls")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,

    /// TLS material for the connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,

    /// Disk-buffer options for loss protection across restarts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_buffer: Option<DiskBuffer>,

    /// Batching parameters
    #[serde(flatten)]
    pub batch: Batch,
}

/// MongoDB document-store destination
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MongoDbOutput {
    /// Collection log messages are stored in
    pub collection: String,

    /// Connection URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Name-value mapping built from each message's data and metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_pairs: Option<ValuePairs>,

    /// Disk-buffer options for loss protection across restarts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_buffer: Option<DiskBuffer>,

    /// Batching parameters
    #[serde(flatten)]
    pub batch: Batch,

    /// Bulk operation options
    #[serde(flatten)]
    pub bulk: Bulk,
}

/// Redis key-value-store destination
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedisOutput {
    /// Server host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Server port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Authentication credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<SecretRef>,

    /// Disk-buffer options for loss protection across restarts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_buffer: Option<DiskBuffer>,

    /// Batching parameters
    #[serde(flatten)]
    pub batch: Batch,
}

/// TLS material for a destination connection
///
/// File-typed fields accept secret references; mounted references render
/// as the secret's deterministic mount path, never the secret bytes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tls {
    /// Directory of CA certificates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_dir: Option<SecretRef>,

    /// CA certificate file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<SecretRef>,

    /// Client certificate file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<SecretRef>,

    /// Client key file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<SecretRef>,

    /// Whether to verify the peer's certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_verify: Option<bool>,
}

/// Disk-buffer options shared by all destination kinds
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiskBuffer {
    /// Reliable mode survives daemon crashes at the cost of throughput
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reliable: Option<bool>,

    /// Compact the buffer file on restart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compaction: Option<bool>,

    /// Directory the buffer files are stored in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Maximum size of the disk buffer in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_buf_size: Option<i64>,

    /// Maximum number of messages held in memory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem_buf_length: Option<i64>,

    /// Maximum memory buffer size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem_buf_size: Option<i64>,
}

/// Batching parameters shared by all destination kinds
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Number of lines flushed together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_lines: Option<i64>,

    /// Maximum milliseconds a batch may wait before flushing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_timeout: Option<i64>,
}

/// Bulk operation options for the document store
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bulk {
    /// Enables bulk insert mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk: Option<bool>,

    /// Disables bulk operation validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_bypass_validation: Option<bool>,
}

/// Raw name-value mapping sub-grammar for the document store
///
/// Field values are embedded verbatim (they carry their own inner
/// quoting, e.g. `scope("selected-macros" "nv-pairs")`).
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuePairs {
    /// Macro scopes included in the mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Fields excluded from the mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Explicit keys included in the mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Explicit key-value pairs added to the mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
}
