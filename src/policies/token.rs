use crate::{CredentialPolicy, Request, Result, SignRequest, TokenCredential};
use http::{header, HeaderValue};

/// Credential policy attaching a bearer token.
pub type TokenCredentialPolicy = CredentialPolicy<BearerTokenSigner>;

/// Signer attaching the credential's current bearer token.
///
/// The token is read from the credential at sign time, never cached, so a
/// rotation performed by the credential's owner is visible to the next
/// request through this signer.
#[derive(Debug)]
pub struct BearerTokenSigner {
    credential: TokenCredential,
}

impl BearerTokenSigner {
    /// Create a signer backed by `credential`.
    pub fn new(credential: TokenCredential) -> Self {
        Self { credential }
    }
}

impl SignRequest for BearerTokenSigner {
    fn sign(&self, mut req: Request) -> Result<Request> {
        let mut value: HeaderValue = format!("Bearer {}", self.credential.token()).parse()?;
        value.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, value);

        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use pretty_assertions::assert_eq;

    fn request() -> Request {
        Request::new(Method::GET, "https://myacct.blob.core.windows.net/c").unwrap()
    }

    #[test]
    fn test_sign_sets_bearer_authorization() {
        let signer = BearerTokenSigner::new(TokenCredential::new("token"));

        let signed = signer.sign(request()).unwrap();
        assert_eq!(
            signed.headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer token"
        );
    }

    #[test]
    fn test_sign_reads_token_fresh() {
        let credential = TokenCredential::new("before");
        let signer = BearerTokenSigner::new(credential.clone());

        let signed = signer.sign(request()).unwrap();
        assert_eq!(
            signed.headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer before"
        );

        credential.set_token("after");
        let signed = signer.sign(request()).unwrap();
        assert_eq!(
            signed.headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer after"
        );
    }
}
