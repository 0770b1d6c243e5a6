use crate::{Policy, PolicyOptions, Request, Response, Result};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// The signing transformation of a credential policy.
///
/// Pure computation: no I/O, no suspension points. The default is the
/// identity, which lets the base contract be instantiated directly as
/// [`AnonymousCredentialPolicy`].
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Transform the request before it is forwarded. Identity by default.
    fn sign(&self, req: Request) -> Result<Request> {
        Ok(req)
    }
}

/// A pipeline node that signs a request and forwards it to its successor.
///
/// `handle` is fixed for every credential policy: compute the signer's
/// transformation synchronously, then forward the signed request exactly
/// once. A fatal signing error aborts the request before it is forwarded;
/// an error returned by the successor passes through unchanged.
#[derive(Debug)]
pub struct CredentialPolicy<S: SignRequest> {
    signer: S,
    next: Arc<dyn Policy>,
}

impl<S: SignRequest> CredentialPolicy<S> {
    /// Create a policy applying `signer` before forwarding to `next`.
    pub fn new(signer: S, next: Arc<dyn Policy>, _options: &PolicyOptions) -> Self {
        Self { signer, next }
    }

    /// Apply the signing transformation without forwarding.
    pub fn sign(&self, req: Request) -> Result<Request> {
        self.signer.sign(req)
    }
}

#[async_trait]
impl<S: SignRequest> Policy for CredentialPolicy<S> {
    async fn handle(&self, req: Request) -> Result<Response> {
        let signed = self.signer.sign(req)?;
        self.next.handle(signed).await
    }
}

/// Signer that leaves requests untouched.
#[derive(Debug, Clone, Default)]
pub struct AnonymousSigner;

impl SignRequest for AnonymousSigner {}

/// Credential policy that forwards requests untouched.
pub type AnonymousCredentialPolicy = CredentialPolicy<AnonymousSigner>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Body, Request};
    use http::Method;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct NoopTransport;

    #[async_trait]
    impl Policy for NoopTransport {
        async fn handle(&self, _: Request) -> Result<Response> {
            Ok(Response::new(http::StatusCode::OK))
        }
    }

    #[test]
    fn test_default_sign_is_identity() {
        let policy = AnonymousCredentialPolicy::new(
            AnonymousSigner,
            Arc::new(NoopTransport),
            &PolicyOptions::default(),
        );

        let req = Request::new(Method::PUT, "https://myacct.blob.core.windows.net/c/b?comp=list")
            .unwrap()
            .with_header("x-ms-blob-type", "BlockBlob")
            .unwrap()
            .with_body(Body::Text("hello".to_string()));

        let signed = policy.sign(req.clone()).unwrap();
        assert_eq!(signed, req);
    }

    #[tokio::test]
    async fn test_handle_forwards_to_successor() {
        let policy = AnonymousCredentialPolicy::new(
            AnonymousSigner,
            Arc::new(NoopTransport),
            &PolicyOptions::default(),
        );

        let req = Request::new(Method::GET, "https://myacct.blob.core.windows.net/c").unwrap();
        let resp = policy.handle(req).await.unwrap();
        assert_eq!(resp.status, http::StatusCode::OK);
    }
}
