//! Secret resolution for destination configurations
//!
//! Destinations embed secret material either inline or as a reference to
//! a namespaced secret store entry. References are never rendered as
//! plaintext: they resolve to the deterministic path the entry is mounted
//! at inside the daemon pod, `<mountPath>/<namespace>-<name>-<key>`.
//!
//! The resolver is an injected capability so the compiler stays free of
//! any process-wide secret-store state and tests run against an in-memory
//! store. Resolution is synchronous and performed exactly once per
//! reference encountered - identical references resolve identically, so
//! caching would buy nothing.

use k8s_openapi::api::core::v1::Secret;

use crate::crd::SecretRef;
use crate::{Error, Result, DEFAULT_SECRET_MOUNT_PATH};

/// Resolves secret references against one namespace
pub trait SecretResolver {
    /// Resolve a reference to the text embedded in the rendered document:
    /// the literal value for inline secrets, the mount path for external
    /// references. Fails with [`Error::SecretResolution`] when the store
    /// has no matching entry.
    fn resolve(&self, namespace: &str, secret: &SecretRef) -> Result<String>;
}

/// Resolver backed by a set of Kubernetes Secret objects
///
/// The hosting controller lists the secrets it has mounted into the
/// daemon pod and hands them here; the resolver only checks that a
/// referenced entry exists before emitting its mount path.
#[derive(Debug, Default)]
pub struct MountedSecretResolver {
    secrets: Vec<Secret>,
    mount_path: String,
}

impl MountedSecretResolver {
    /// Create a resolver over the given secrets, mounted at `mount_path`
    pub fn new(secrets: Vec<Secret>, mount_path: impl Into<String>) -> Self {
        Self {
            secrets,
            mount_path: mount_path.into(),
        }
    }

    /// Create a resolver with the conventional daemon mount path
    pub fn with_default_mount_path(secrets: Vec<Secret>) -> Self {
        Self::new(secrets, DEFAULT_SECRET_MOUNT_PATH)
    }

    fn lookup(&self, namespace: &str, name: &str, key: &str) -> Option<&Secret> {
        self.secrets.iter().find(|s| {
            s.metadata.namespace.as_deref() == Some(namespace)
                && s.metadata.name.as_deref() == Some(name)
                && (s.data.as_ref().is_some_and(|d| d.contains_key(key))
                    || s.string_data.as_ref().is_some_and(|d| d.contains_key(key)))
        })
    }
}

impl SecretResolver for MountedSecretResolver {
    fn resolve(&self, namespace: &str, secret: &SecretRef) -> Result<String> {
        match secret {
            SecretRef::Value(value) => Ok(value.clone()),
            SecretRef::MountFrom(selector) => {
                if self.lookup(namespace, &selector.name, &selector.key).is_none() {
                    return Err(Error::SecretResolution {
                        namespace: namespace.to_string(),
                        name: selector.name.clone(),
                        key: selector.key.clone(),
                        reason: "not found".to_string(),
                    });
                }
                Ok(format!(
                    "{}/{}-{}-{}",
                    self.mount_path, namespace, selector.name, selector.key
                ))
            }
        }
    }
}
