use crate::hash::{base64_decode, base64_hmac_sha256};
use crate::{
    Credential, Policy, PolicyFactory, PolicyOptions, Result, SharedKeyCredentialPolicy,
    SharedKeySigner,
};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Storage account credential holding the account's shared key.
///
/// The key is decoded from its base64 encoding once, at construction, and
/// is immutable afterwards. The credential is cheap to clone; clones and
/// the policies created from them all share the same secret.
#[derive(Clone)]
pub struct SharedKeyCredential {
    inner: Arc<Inner>,
}

struct Inner {
    account_name: String,
    account_key: Vec<u8>,
}

impl SharedKeyCredential {
    /// Create a credential from an account name and a base64 encoded
    /// account key.
    ///
    /// A malformed key encoding is a fatal configuration error.
    pub fn new(account_name: &str, account_key: &str) -> Result<Self> {
        let account_key = base64_decode(account_key)?;

        Ok(Self {
            inner: Arc::new(Inner {
                account_name: account_name.to_string(),
                account_key,
            }),
        })
    }

    /// The storage account name.
    pub fn account_name(&self) -> &str {
        &self.inner.account_name
    }

    /// Base64 encoded HMAC-SHA256 of `content` under the account key.
    pub(crate) fn compute_hmac_sha256(&self, content: &str) -> Result<String> {
        base64_hmac_sha256(&self.inner.account_key, content.as_bytes())
    }
}

impl Debug for SharedKeyCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedKeyCredential")
            .field("account_name", &self.inner.account_name)
            .field("account_key", &"***")
            .finish()
    }
}

impl PolicyFactory for SharedKeyCredential {
    fn create(&self, next: Arc<dyn Policy>, options: &PolicyOptions) -> Arc<dyn Policy> {
        Arc::new(SharedKeyCredentialPolicy::new(
            SharedKeySigner::new(self.clone()),
            next,
            options,
        ))
    }
}

impl Credential for SharedKeyCredential {}
