//! Error types for the Conflux compiler

use thiserror::Error;

/// Main error type for configuration rendering
///
/// Every variant is terminal for the current render call: there is no
/// partial-success mode and no retry policy inside the compiler. Retries,
/// if desired, belong to the caller issuing a fresh render attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The pipeline resource has no syslog-ng configuration section
    #[error("pipeline {pipeline:?} has no syslog-ng configuration section")]
    MissingSpec {
        /// Name of the offending pipeline resource
        pipeline: String,
    },

    /// A flow references an output that was never declared
    #[error("flow {flow_namespace}/{flow_name} references undeclared output {output_ref:?}")]
    DanglingReference {
        /// Namespace of the referencing flow
        flow_namespace: String,
        /// Name of the referencing flow
        flow_name: String,
        /// The output name that could not be resolved
        output_ref: String,
    },

    /// An external secret lookup failed during rendering
    #[error("failed to resolve secret {namespace}/{name} key {key:?}: {reason}")]
    SecretResolution {
        /// Namespace the secret was looked up in
        namespace: String,
        /// Name of the secret store entry
        name: String,
        /// Key within the secret that was requested
        key: String,
        /// Underlying failure reported by the secret store
        reason: String,
    },

    /// A match expression node carries no renderable content
    #[error("malformed match expression: {0}")]
    MalformedExpression(String),

    /// Validation error for resource specs
    #[error("validation error: {0}")]
    Validation(String),

    /// Failed to write the assembled document to the caller's sink
    #[error("failed to write rendered configuration: {0}")]
    Write(#[from] std::fmt::Error),
}

impl Error {
    /// Create a missing-spec error for the given pipeline name
    pub fn missing_spec(pipeline: impl Into<String>) -> Self {
        Self::MissingSpec {
            pipeline: pipeline.into(),
        }
    }

    /// Create a malformed-expression error with the given message
    pub fn malformed_expression(msg: impl Into<String>) -> Self {
        Self::MalformedExpression(msg.into())
    }

    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
