use crate::{
    BearerTokenSigner, Credential, Policy, PolicyFactory, PolicyOptions, TokenCredentialPolicy,
};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

/// Rotatable bearer token credential.
///
/// The token is mutable from outside the pipeline: an external refresh
/// actor may call [`set_token`](TokenCredential::set_token) at any time,
/// and the next sign operation will pick up the new value. The contract is
/// eventually consistent: a sign operation overlapping a rotation observes
/// either the old or the new token, never a partial write. Policies read
/// the value fresh on every sign and never cache it.
#[derive(Clone)]
pub struct TokenCredential {
    token: Arc<Mutex<String>>,
}

impl TokenCredential {
    /// Create a credential from a raw bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(token.into())),
        }
    }

    /// Read the current token value.
    pub fn token(&self) -> String {
        self.token.lock().expect("lock poisoned").clone()
    }

    /// Replace the token value, e.g. after an OAuth refresh.
    ///
    /// Sign operations already past their read point complete with the old
    /// value; subsequent ones observe the new value.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.lock().expect("lock poisoned") = token.into();
    }
}

impl Debug for TokenCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCredential")
            .field("token", &"***")
            .finish()
    }
}

impl PolicyFactory for TokenCredential {
    fn create(&self, next: Arc<dyn Policy>, options: &PolicyOptions) -> Arc<dyn Policy> {
        Arc::new(TokenCredentialPolicy::new(
            BearerTokenSigner::new(self.clone()),
            next,
            options,
        ))
    }
}

impl Credential for TokenCredential {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_is_visible_through_clones() {
        let cred = TokenCredential::new("initial");
        let shared = cred.clone();

        assert_eq!(shared.token(), "initial");
        cred.set_token("rotated");
        assert_eq!(shared.token(), "rotated");
    }

    #[test]
    fn test_debug_redacts_token() {
        let cred = TokenCredential::new("very-secret");
        assert!(!format!("{cred:?}").contains("very-secret"));
    }
}
