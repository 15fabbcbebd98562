//! Conflux - CRD-driven syslog-ng configuration compiler
//!
//! Conflux turns declarative logging-pipeline resources into the exact
//! textual configuration a syslog-ng daemon loads. Cluster operators
//! declare pipelines as structured resources (a pipeline, its routing
//! flows, and its destination outputs); the compiler walks those
//! resources, resolves secret indirections into mounted file paths,
//! assigns every emitted block a stable unique identifier, and streams
//! out a deterministic, byte-exact document.
//!
//! # Modules
//!
//! - [`crd`] - Custom Resource Definitions (LogPipeline, LogFlow, LogOutput)
//! - [`config`] - The configuration compiler (renderers, naming, secrets)
//! - [`error`] - Error types for the compiler
//!
//! # Rendering
//!
//! Rendering is single-threaded and synchronous: one call to
//! [`config::render_config_into`] produces one complete document. Output
//! ordering is semantically load-bearing in the target syntax, so the
//! compiler never reorders flows, filters, or destination references.
//! All text is assembled in memory before anything is written to the
//! caller's sink; a failed render leaves nothing half-written.

#![deny(missing_docs)]

pub mod config;
pub mod crd;
pub mod error;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Default Configuration Constants
// =============================================================================
// These constants define the fixed points of the emitted syslog-ng syntax.
// Centralizing them here keeps the renderers and the golden tests in sync.

/// Config format version emitted in the `@version` pragma
pub const CONFIG_VERSION: &str = "3.37";

/// Standard component library pulled in by the `@include` pragma
pub const SCL_INCLUDE: &str = "scl.conf";

/// Name of the shared ingestion source block every log path starts from
pub const MAIN_INPUT_SOURCE_NAME: &str = "main_input";

/// Field prefix applied by the JSON structuring parser on the main input
pub const JSON_PREFIX: &str = "json.";

/// Stats emission frequency substituted when the declared value is zero
/// or absent. Zero denotes "unset" for this option, not "disable".
pub const DEFAULT_STATS_FREQ: i32 = 10;

/// Default directory secrets are mounted under inside the daemon pod
pub const DEFAULT_SECRET_MOUNT_PATH: &str = "/etc/syslog-ng/secret";
