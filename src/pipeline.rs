use crate::{
    Credential, Policy, PolicyFactory, PolicyOptions, Request, RequestIdPolicyFactory, Response,
    Result,
};
use std::sync::Arc;

/// An assembled request pipeline.
///
/// The node sequence is built once per pipeline: cross-cutting factories in
/// the given order, then the credential's signing policy, then the
/// transport terminal. Keeping the signing policy immediately before
/// transport means a retry driven by an outer policy re-enters the chain
/// from the top and is re-signed with a fresh timestamp instead of reusing
/// a stale signature.
///
/// There is no per-request state: every [`send`](Pipeline::send) traverses
/// the same immutable chain independently, so one pipeline may serve any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Pipeline {
    head: Arc<dyn Policy>,
}

impl Pipeline {
    /// Assemble the standard pipeline: request id assignment followed by
    /// the credential's signing policy.
    pub fn new(credential: &dyn Credential, transport: Arc<dyn Policy>) -> Self {
        Self::with_factories(
            vec![Arc::new(RequestIdPolicyFactory::new())],
            credential,
            transport,
            PolicyOptions::default(),
        )
    }

    /// Assemble a pipeline from explicit cross-cutting factories.
    ///
    /// `credential.create` is invoked exactly once; the resulting policy
    /// sits after every factory-produced node and directly before
    /// `transport`.
    pub fn with_factories(
        factories: Vec<Arc<dyn PolicyFactory>>,
        credential: &dyn Credential,
        transport: Arc<dyn Policy>,
        options: PolicyOptions,
    ) -> Self {
        let mut next = credential.create(transport, &options);
        for factory in factories.iter().rev() {
            next = factory.create(next, &options);
        }

        Self { head: next }
    }

    /// Send a request through the chain.
    ///
    /// Errors, whether raised by a policy or by the transport, surface
    /// through the same result channel and pass each node unchanged.
    pub async fn send(&self, req: Request) -> Result<Response> {
        self.head.handle(req).await
    }
}
