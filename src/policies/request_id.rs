use crate::constants::X_MS_CLIENT_REQUEST_ID;
use crate::{Policy, PolicyFactory, PolicyOptions, Request, Response, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Cross-cutting policy assigning a unique `x-ms-client-request-id`.
///
/// An id already set by a higher layer is kept. Placed before the signing
/// policy, the header takes part in canonicalization like any other
/// storage-prefixed header.
#[derive(Debug)]
pub struct RequestIdPolicy {
    next: Arc<dyn Policy>,
}

impl RequestIdPolicy {
    /// Create a new request id policy.
    pub fn new(next: Arc<dyn Policy>, _options: &PolicyOptions) -> Self {
        Self { next }
    }
}

#[async_trait]
impl Policy for RequestIdPolicy {
    async fn handle(&self, mut req: Request) -> Result<Response> {
        if !req.headers.contains_key(X_MS_CLIENT_REQUEST_ID) {
            let id: [u8; 16] = rand::random();
            req.headers
                .insert(X_MS_CLIENT_REQUEST_ID, hex::encode(id).parse()?);
        }

        self.next.handle(req).await
    }
}

/// Factory for [`RequestIdPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RequestIdPolicyFactory;

impl RequestIdPolicyFactory {
    /// Create a new request id policy factory.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyFactory for RequestIdPolicyFactory {
    fn create(&self, next: Arc<dyn Policy>, options: &PolicyOptions) -> Arc<dyn Policy> {
        Arc::new(RequestIdPolicy::new(next, options))
    }
}
