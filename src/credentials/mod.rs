//! Credentials that produce the signing policy of a pipeline.

use crate::PolicyFactory;

mod shared_key;
pub use shared_key::SharedKeyCredential;

mod token;
pub use token::TokenCredential;

mod anonymous;
pub use anonymous::AnonymousCredential;

/// A credential is a [`PolicyFactory`] whose policies attach authentication
/// to requests.
///
/// The single operation is inherited from the factory contract:
/// `create(next, options)` produces an independent signing policy; every
/// policy created from one credential observes the same underlying secret
/// or token source, so one credential can back multiple pipelines.
pub trait Credential: PolicyFactory {}
