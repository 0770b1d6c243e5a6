//! The policy chain a request travels through before transport.

use crate::{Request, Response, Result};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

mod credential_policy;
pub use credential_policy::{AnonymousCredentialPolicy, AnonymousSigner, CredentialPolicy, SignRequest};

mod shared_key;
pub use shared_key::{SharedKeyCredentialPolicy, SharedKeySigner};

mod token;
pub use token::{BearerTokenSigner, TokenCredentialPolicy};

mod request_id;
pub use request_id::{RequestIdPolicy, RequestIdPolicyFactory};

/// A node in the request pipeline.
///
/// Each policy receives a request, applies its transformation and forwards
/// the result to its successor exactly once, unless it fails fatally before
/// forwarding. The terminal policy is the transport sender, which is
/// supplied by the caller and out of scope for this crate.
#[async_trait]
pub trait Policy: Debug + Send + Sync + 'static {
    /// Process the request and return the response of the terminal policy.
    ///
    /// Errors returned by a successor must pass through unchanged.
    async fn handle(&self, req: Request) -> Result<Response>;
}

/// Factory producing one pipeline node.
///
/// `create` must be pure and repeatable: no side effects, no I/O, and every
/// invocation yields an independent policy observing the same underlying
/// state, so a single factory can serve multiple pipelines.
pub trait PolicyFactory: Debug + Send + Sync + 'static {
    /// Produce a policy forwarding to `next`.
    fn create(&self, next: Arc<dyn Policy>, options: &PolicyOptions) -> Arc<dyn Policy>;
}

/// Options shared by every policy of one pipeline.
///
/// Carried through [`PolicyFactory::create`] so cross-cutting configuration
/// reaches each node at assembly time.
#[derive(Debug, Clone, Default)]
pub struct PolicyOptions {}
