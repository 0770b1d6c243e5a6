use crate::{
    AnonymousCredentialPolicy, AnonymousSigner, Credential, Policy, PolicyFactory, PolicyOptions,
};
use std::sync::Arc;

/// Credential for unauthenticated access.
///
/// Its policies forward requests untouched; useful for public resources and
/// for exercising pipeline composition without real signing.
#[derive(Debug, Clone, Default)]
pub struct AnonymousCredential;

impl AnonymousCredential {
    /// Create a new anonymous credential.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyFactory for AnonymousCredential {
    fn create(&self, next: Arc<dyn Policy>, options: &PolicyOptions) -> Arc<dyn Policy> {
        Arc::new(AnonymousCredentialPolicy::new(AnonymousSigner, next, options))
    }
}

impl Credential for AnonymousCredential {}
